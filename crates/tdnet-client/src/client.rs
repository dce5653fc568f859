//! TDnet client facade.
//!
//! Every query goes through one [`HttpFetcher`], so all calls on a client share
//! its rate limit and its lazily created connection.

use crate::api::fetcher::HttpFetcher;
use crate::api::transport::{ReqwestTransport, Transport};
use crate::error::{Result, TdnetError};
use crate::models::{is_stock_code, DisclosureList};
use crate::parser;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use shared::TdnetConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Largest page the mirror serves
pub const MAX_LIMIT: u32 = 300;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 50;

const RECENT: &str = "recent";
const SELECTOR_DATE_FORMAT: &str = "%Y%m%d";

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is a valid regex"));

/// Client for the Yanoshin TDnet mirror
pub struct TdnetClient {
    fetcher: HttpFetcher,
    transport: Arc<dyn Transport>,
}

impl TdnetClient {
    /// Create a client backed by reqwest; no connection is opened yet
    pub fn new(config: &TdnetConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over an explicit transport
    pub fn with_transport(config: &TdnetConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            fetcher: HttpFetcher::new(config, Arc::clone(&transport)),
            transport,
        }
    }

    /// Most recent disclosures, newest first
    pub async fn get_recent(&self, limit: u32) -> Result<DisclosureList> {
        let limit = clamp_limit(limit);
        info!(limit, "Fetching recent disclosures");
        self.list(RECENT, limit).await
    }

    /// Disclosures published on `date`
    pub async fn get_by_date(&self, date: NaiveDate) -> Result<DisclosureList> {
        info!(date = %date, "Fetching disclosures by date");
        let selector = date.format(SELECTOR_DATE_FORMAT).to_string();
        let result = self.list(&selector, MAX_LIMIT).await?;
        Ok(result.with_query_date(date.to_string()))
    }

    /// Disclosures published between `start` and `end`, both inclusive
    pub async fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<DisclosureList> {
        info!(start = %start, end = %end, "Fetching disclosures by date range");
        let selector = format!(
            "{}-{}",
            start.format(SELECTOR_DATE_FORMAT),
            end.format(SELECTOR_DATE_FORMAT)
        );
        let result = self.list(&selector, MAX_LIMIT).await?;
        Ok(result.with_query_date(format!("{} to {}", start, end)))
    }

    /// Disclosures for one company, by 4-digit stock code
    pub async fn get_by_code(&self, code: &str, limit: u32) -> Result<DisclosureList> {
        validate_code(code)?;
        let limit = clamp_limit(limit);
        info!(code, limit, "Fetching company disclosures");
        self.list(code, limit).await
    }

    /// Filter the latest full page by title, company name or exact code.
    ///
    /// `total_count` of the result is the number of matches returned.
    pub async fn search(&self, keyword: &str, limit: usize) -> Result<DisclosureList> {
        info!(keyword, limit, "Searching recent disclosures");
        let recent = self.list(RECENT, MAX_LIMIT).await?;

        let needle = keyword.to_lowercase();
        let matches: Vec<_> = recent
            .disclosures
            .into_iter()
            .filter(|d| {
                d.title().to_lowercase().contains(&needle)
                    || d.company_name().to_lowercase().contains(&needle)
                    || d.company_code() == keyword
            })
            .take(limit)
            .collect();

        debug!(keyword, matches = matches.len(), "Search complete");
        Ok(DisclosureList::new(matches.len() as u64, matches))
    }

    /// Probe the mirror; never fails
    pub async fn test_connection(&self) -> bool {
        match self.fetcher.fetch(RECENT, &[("limit", "1".to_string())]).await {
            Ok(body) => body.get("items").is_some(),
            Err(e) => {
                debug!(error = %e, "Connection test failed");
                false
            }
        }
    }

    /// Release the connection; safe to call any number of times
    pub async fn close(&self) {
        self.transport.close().await;
    }

    async fn list(&self, selector: &str, limit: u32) -> Result<DisclosureList> {
        let body = self
            .fetcher
            .fetch(selector, &[("limit", limit.to_string())])
            .await?;
        Ok(parser::parse(&body))
    }
}

/// Clamp a requested page size into `1..=MAX_LIMIT`
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// Check that `code` is exactly four ASCII digits
pub fn validate_code(code: &str) -> Result<()> {
    if is_stock_code(code) {
        Ok(())
    } else {
        Err(TdnetError::InvalidArgument(format!(
            "Invalid stock code: {:?} (must be 4 digits)",
            code
        )))
    }
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let invalid = || {
        TdnetError::InvalidArgument(format!(
            "Invalid date: {:?} (expected YYYY-MM-DD)",
            value
        ))
    };

    if !ISO_DATE.is_match(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}
