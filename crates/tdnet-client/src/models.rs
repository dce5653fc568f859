//! Domain model for TDnet timely disclosures.
//!
//! [`Disclosure`] values are validated on construction and have no mutators;
//! a corrected record is a new record.

use crate::category::{categorize, Category};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use thiserror::Error;

const MAX_ID_LEN: usize = 20;
const MAX_COMPANY_NAME_LEN: usize = 200;
const MAX_TITLE_LEN: usize = 500;
const MAX_URL_LEN: usize = 500;
const MAX_EXCHANGE_LEN: usize = 20;
const MAX_UPDATE_HISTORY_LEN: usize = 500;

/// Format used for `pubdate` in the caller-facing projection; sub-second
/// precision is appended as microseconds when present
pub const PUBDATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const PUBDATE_FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Why a single upstream record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("item is not a disclosure object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("company code {0:?} is not 4 digits")]
    InvalidCode(String),

    #[error("unparseable publication date {0:?}")]
    InvalidDate(String),
}

/// Field values for a disclosure about to be validated
#[derive(Debug, Clone, Default)]
pub struct NewDisclosure {
    pub id: String,
    pub published_at: Option<NaiveDateTime>,
    pub company_code: String,
    pub company_name: String,
    pub title: String,
    pub document_url: Option<String>,
    pub xbrl_url: Option<String>,
    pub exchange: String,
    pub update_history: Option<String>,
}

/// A single timely disclosure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    id: String,
    published_at: NaiveDateTime,
    company_code: String,
    company_name: String,
    title: String,
    document_url: Option<String>,
    xbrl_url: Option<String>,
    exchange: String,
    category: Category,
    update_history: Option<String>,
}

impl Disclosure {
    /// Validate `fields` and derive the category from the title.
    ///
    /// `company_code` must already be normalized to 4 digits and
    /// `company_name` is trimmed here.
    pub fn new(fields: NewDisclosure) -> Result<Self, RecordError> {
        if fields.id.is_empty() {
            return Err(RecordError::MissingField("id"));
        }
        check_len("id", &fields.id, MAX_ID_LEN)?;

        let published_at = fields
            .published_at
            .ok_or(RecordError::MissingField("pubdate"))?;

        if !is_stock_code(&fields.company_code) {
            return Err(RecordError::InvalidCode(fields.company_code));
        }

        let company_name = fields.company_name.trim().to_string();
        check_len("company_name", &company_name, MAX_COMPANY_NAME_LEN)?;
        check_len("title", &fields.title, MAX_TITLE_LEN)?;
        check_opt_len("document_url", fields.document_url.as_deref(), MAX_URL_LEN)?;
        check_opt_len("url_xbrl", fields.xbrl_url.as_deref(), MAX_URL_LEN)?;
        check_len("markets_string", &fields.exchange, MAX_EXCHANGE_LEN)?;
        check_opt_len(
            "update_history",
            fields.update_history.as_deref(),
            MAX_UPDATE_HISTORY_LEN,
        )?;

        let category = categorize(&fields.title);

        Ok(Self {
            id: fields.id,
            published_at,
            company_code: fields.company_code,
            company_name,
            title: fields.title,
            document_url: fields.document_url,
            xbrl_url: fields.xbrl_url,
            exchange: fields.exchange,
            category,
            update_history: fields.update_history,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn published_at(&self) -> NaiveDateTime {
        self.published_at
    }

    pub fn company_code(&self) -> &str {
        &self.company_code
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn document_url(&self) -> Option<&str> {
        self.document_url.as_deref()
    }

    pub fn xbrl_url(&self) -> Option<&str> {
        self.xbrl_url.as_deref()
    }

    /// Listed market label(s), e.g. "東"
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn update_history(&self) -> Option<&str> {
        self.update_history.as_deref()
    }
}

/// Query result envelope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureList {
    /// Upstream's reported total; may exceed `disclosures.len()`
    pub total_count: u64,
    /// Upstream order (newest first)
    pub disclosures: Vec<Disclosure>,
    /// Set only by date-scoped queries
    pub query_date: Option<String>,
}

#[derive(Serialize)]
struct DisclosureListView<'a> {
    total_count: u64,
    query_date: Option<&'a str>,
    disclosures: Vec<DisclosureView<'a>>,
}

#[derive(Serialize)]
struct DisclosureView<'a> {
    id: &'a str,
    pubdate: String,
    company_code: &'a str,
    company_name: &'a str,
    title: &'a str,
    category: Category,
    document_url: Option<&'a str>,
    exchange: &'a str,
}

impl DisclosureList {
    pub fn new(total_count: u64, disclosures: Vec<Disclosure>) -> Self {
        Self {
            total_count,
            disclosures,
            query_date: None,
        }
    }

    pub fn with_query_date(mut self, query_date: impl Into<String>) -> Self {
        self.query_date = Some(query_date.into());
        self
    }

    pub fn len(&self) -> usize {
        self.disclosures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disclosures.is_empty()
    }

    /// Caller-facing JSON projection (omits `xbrl_url` and `update_history`)
    pub fn to_json(&self) -> serde_json::Value {
        let view = DisclosureListView {
            total_count: self.total_count,
            query_date: self.query_date.as_deref(),
            disclosures: self
                .disclosures
                .iter()
                .map(|d| DisclosureView {
                    id: d.id(),
                    pubdate: format_pubdate(d.published_at()),
                    company_code: d.company_code(),
                    company_name: d.company_name(),
                    title: d.title(),
                    category: d.category(),
                    document_url: d.document_url(),
                    exchange: d.exchange(),
                })
                .collect(),
        };

        // Only strings, integers and unit enums: conversion cannot fail
        serde_json::to_value(view).unwrap_or(serde_json::Value::Null)
    }
}

/// `2026-02-14T15:30:00`, or `2026-02-14T15:30:00.250000` with a fraction
pub fn format_pubdate(at: NaiveDateTime) -> String {
    let format = if at.nanosecond() == 0 {
        PUBDATE_FORMAT
    } else {
        PUBDATE_FRACTION_FORMAT
    };
    at.format(format).to_string()
}

/// True for exactly four ASCII digits
pub fn is_stock_code(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), RecordError> {
    if value.chars().count() > max {
        return Err(RecordError::TooLong { field, max });
    }
    Ok(())
}

fn check_opt_len(field: &'static str, value: Option<&str>, max: usize) -> Result<(), RecordError> {
    match value {
        Some(v) => check_len(field, v, max),
        None => Ok(()),
    }
}
