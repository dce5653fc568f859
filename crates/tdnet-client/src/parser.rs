//! Turns a mirror response body into a [`DisclosureList`].
//!
//! Bad items are dropped one by one; a batch never fails as a whole.

use crate::api::types::{lenient_text, RawDisclosure, RawItem};
use crate::models::{Disclosure, DisclosureList, NewDisclosure, RecordError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const PUBDATE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a raw response body.
///
/// `total_count` is passed through as reported; it falls back to the number
/// of items only when upstream omits it.
pub fn parse(raw: &Value) -> DisclosureList {
    let items = raw
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let total_count = raw
        .get("total_count")
        .and_then(count_value)
        .unwrap_or(items.len() as u64);

    let mut disclosures = Vec::with_capacity(items.len());
    for item in items {
        match parse_item(item) {
            Ok(disclosure) => disclosures.push(disclosure),
            Err(e) => {
                debug!(
                    item_id = item_id(item).as_deref().unwrap_or("<none>"),
                    error = %e,
                    "Skipping invalid disclosure item"
                );
            }
        }
    }

    DisclosureList::new(total_count, disclosures)
}

/// Build a single disclosure from one `items` entry
pub fn parse_item(item: &Value) -> Result<Disclosure, RecordError> {
    let record = RawItem::deserialize(item)
        .map_err(|_| RecordError::NotAnObject)?
        .into_record();

    Disclosure::new(into_fields(record)?)
}

fn into_fields(record: RawDisclosure) -> Result<NewDisclosure, RecordError> {
    let pubdate = record.pubdate.ok_or(RecordError::MissingField("pubdate"))?;
    let published_at =
        parse_pubdate(&pubdate).ok_or_else(|| RecordError::InvalidDate(pubdate.clone()))?;

    let code = record
        .company_code
        .ok_or(RecordError::MissingField("company_code"))?;

    Ok(NewDisclosure {
        id: record.id.unwrap_or_default(),
        published_at: Some(published_at),
        company_code: normalize_code(&code),
        company_name: record.company_name.unwrap_or_default(),
        title: record.title.unwrap_or_default(),
        document_url: record.document_url,
        xbrl_url: record.url_xbrl,
        exchange: record.markets_string.unwrap_or_default(),
        update_history: record.update_history,
    })
}

/// Five-character codes carry a trailing check digit; keep the first four
pub fn normalize_code(code: &str) -> String {
    if code.chars().count() == 5 {
        code.chars().take(4).collect()
    } else {
        code.to_string()
    }
}

/// Parse the mirror's naive local timestamp
pub fn parse_pubdate(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    PUBDATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn item_id(item: &Value) -> Option<String> {
    item.get("Tdnet")
        .unwrap_or(item)
        .get("id")
        .and_then(lenient_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "total_count": 2,
            "items": [
                {
                    "Tdnet": {
                        "id": "1001",
                        "pubdate": "2026-02-14 15:30:00",
                        "company_code": "72030",
                        "company_name": "トヨタ自動車",
                        "title": "2025年3月期 決算短信〔日本基準〕（連結）",
                        "document_url": "https://example.com/doc1.pdf",
                        "url_xbrl": "https://example.com/doc1.zip",
                        "markets_string": "東",
                        "update_history": null
                    }
                },
                {
                    "Tdnet": {
                        "id": "1002",
                        "pubdate": "2026-02-14 16:00:00",
                        "company_code": "67580",
                        "company_name": "ソニーグループ",
                        "title": "配当予想の修正に関するお知らせ",
                        "document_url": "https://example.com/doc2.pdf",
                        "url_xbrl": null,
                        "markets_string": "東",
                        "update_history": null
                    }
                }
            ]
        })
    }

    #[test]
    fn test_parse_sample() {
        let result = parse(&sample_response());

        assert_eq!(result.total_count, 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result.query_date, None);

        let first = &result.disclosures[0];
        assert_eq!(first.id(), "1001");
        assert_eq!(first.company_code(), "7203");
        assert_eq!(first.company_name(), "トヨタ自動車");
        assert_eq!(first.category(), Category::Earnings);
        assert_eq!(first.xbrl_url(), Some("https://example.com/doc1.zip"));
        assert_eq!(first.exchange(), "東");

        let second = &result.disclosures[1];
        assert_eq!(second.company_code(), "6758");
        assert_eq!(second.category(), Category::Dividend);
        assert_eq!(second.xbrl_url(), None);
    }

    #[test]
    fn test_four_digit_code_passes_through() {
        let item = json!({
            "Tdnet": {
                "id": "99",
                "pubdate": "2026-01-01 09:00:00",
                "company_code": "6758",
                "company_name": "ソニー",
                "title": "お知らせ"
            }
        });

        let d = parse_item(&item).unwrap();
        assert_eq!(d.company_code(), "6758");
        assert_eq!(d.category(), Category::Other);
        assert_eq!(d.document_url(), None);
        assert_eq!(d.exchange(), "");
    }

    #[test]
    fn test_company_name_is_trimmed() {
        let item = json!({
            "Tdnet": {
                "id": "12345",
                "pubdate": "2026-02-14 15:30:00",
                "company_code": "72030",
                "company_name": "トヨタ自動車  ",
                "title": "2025年3月期 決算短信〔日本基準〕"
            }
        });

        assert_eq!(parse_item(&item).unwrap().company_name(), "トヨタ自動車");
    }

    #[test]
    fn test_flat_items_are_accepted() {
        let raw = json!({
            "items": [{
                "id": "3003",
                "pubdate": "2026-02-13T10:00:00",
                "company_code": "9984",
                "company_name": "ソフトバンクグループ",
                "title": "自己株式の取得状況に関するお知らせ"
            }]
        });

        let result = parse(&raw);
        assert_eq!(result.len(), 1);
        assert_eq!(result.disclosures[0].category(), Category::Buyback);
    }

    #[test]
    fn test_invalid_records_are_dropped_but_total_is_kept() {
        let raw = json!({
            "total_count": 5,
            "items": [
                { "Tdnet": { "id": "1", "pubdate": "2026-02-14 09:00:00", "company_code": "123456", "title": "x" } },
                { "Tdnet": { "id": "2", "pubdate": "not a date", "company_code": "7203", "title": "x" } },
                { "Tdnet": { "id": "3", "company_code": "7203", "title": "x" } },
                { "Tdnet": { "id": "4", "pubdate": "2026-02-14 09:00:00", "company_code": "ABCDE", "title": "x" } },
                { "Tdnet": { "id": "5", "pubdate": "2026-02-14 09:00:00", "company_code": "7203", "title": "ok" } },
                42
            ]
        });

        let result = parse(&raw);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result.disclosures[0].id(), "5");
    }

    #[test]
    fn test_order_is_preserved() {
        let raw = json!({
            "items": [
                { "Tdnet": { "id": "30", "pubdate": "2026-02-14 09:00:00", "company_code": "1301", "title": "a" } },
                { "Tdnet": { "id": "10", "pubdate": "2026-02-14 11:00:00", "company_code": "1301", "title": "b" } },
                { "Tdnet": { "id": "20", "pubdate": "2026-02-14 10:00:00", "company_code": "1301", "title": "c" } }
            ]
        });

        let ids: Vec<_> = parse(&raw).disclosures.iter().map(|d| d.id().to_string()).collect();
        assert_eq!(ids, ["30", "10", "20"]);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        assert_eq!(parse(&json!({})), DisclosureList::default());
        assert_eq!(parse(&json!([])), DisclosureList::default());

        let raw = json!({
            "items": [
                { "Tdnet": { "id": "1", "pubdate": "2026-02-14 09:00:00", "company_code": "7203" } }
            ]
        });
        let result = parse(&raw);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.disclosures[0].title(), "");
    }

    #[test]
    fn test_total_count_as_string() {
        let raw = json!({ "total_count": "120", "items": [] });
        assert_eq!(parse(&raw).total_count, 120);

        let raw = json!({ "total_count": -3, "items": [] });
        assert_eq!(parse(&raw).total_count, 0);
    }

    #[test]
    fn test_item_id_for_logging() {
        assert_eq!(item_id(&json!({ "Tdnet": { "id": "1001" } })).as_deref(), Some("1001"));
        assert_eq!(item_id(&json!({ "Tdnet": { "id": 1001 } })).as_deref(), Some("1001"));
        assert_eq!(item_id(&json!({ "id": 7 })).as_deref(), Some("7"));
        assert_eq!(item_id(&json!({ "Tdnet": {} })), None);
        assert_eq!(item_id(&json!(42)), None);
    }

    #[test]
    fn test_parse_item_borrows_input() {
        let item = json!({
            "Tdnet": {
                "id": 555,
                "pubdate": "2026-02-14 09:00:00",
                "company_code": 72030,
                "title": "お知らせ"
            }
        });

        let d = parse_item(&item).unwrap();
        assert_eq!(d.id(), "555");
        assert_eq!(d.company_code(), "7203");
        assert_eq!(item["Tdnet"]["id"], 555);

        assert!(matches!(parse_item(&json!("text")), Err(RecordError::NotAnObject)));
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("72030"), "7203");
        assert_eq!(normalize_code("6758"), "6758");
        assert_eq!(normalize_code("123456"), "123456");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn test_parse_pubdate_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap();

        assert_eq!(parse_pubdate("2026-02-14 15:30:00"), Some(expected));
        assert_eq!(parse_pubdate("2026-02-14T15:30:00"), Some(expected));
        assert_eq!(parse_pubdate("2026-02-14 15:30"), Some(expected));
        assert_eq!(
            parse_pubdate("2026-02-14"),
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_pubdate("14/02/2026"), None);
        assert_eq!(parse_pubdate(""), None);
    }
}
