//! Tool definitions advertised to clients.

use crate::protocol::Tool;
use serde_json::json;
use tdnet_client::{DEFAULT_LIMIT, MAX_LIMIT};

pub const GET_LATEST: &str = "get_latest_disclosures";
pub const SEARCH: &str = "search_disclosures";
pub const GET_COMPANY: &str = "get_company_disclosures";
pub const GET_BY_DATE: &str = "get_disclosures_by_date";

pub const SEARCH_DEFAULT_LIMIT: u32 = 20;
pub const SEARCH_MAX_LIMIT: u32 = 100;
pub const KEYWORD_MAX_CHARS: usize = 100;

pub const INSTRUCTIONS: &str = "\
TDNET server provides tools for accessing Japanese timely disclosures \
(適時開示情報) from the Tokyo Stock Exchange.

Available tools:
- get_latest_disclosures: Get today's or recent disclosures
- search_disclosures: Search by keyword or company name
- get_company_disclosures: Get disclosures for a specific company
- get_disclosures_by_date: Get disclosures for a specific date

Disclosure categories: earnings (決算短信), dividend (配当), \
forecast_revision (業績予想修正), buyback (自社株買い), offering (増資), \
governance (ガバナンス), other.

Data source: TDNET via Yanoshin Web API. No authentication required.
Note: Only the last ~30 days of data are available.";

/// All tools, in the order they are listed
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_LATEST.into(),
            description: "Get the most recent TDNET disclosures: earnings reports (決算短信), \
                dividend changes, forecast revisions, buybacks and other corporate announcements. \
                Each disclosure includes company code, name, title, category and document URL."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_LIMIT,
                        "default": DEFAULT_LIMIT,
                        "description": "Maximum results (default: 50, max: 300)"
                    }
                }
            }),
        },
        Tool {
            name: SEARCH.into(),
            description: "Search recent TDNET disclosures by company name, stock code or title \
                keyword. Examples: \"トヨタ\", \"7203\", \"決算短信\", \"配当\""
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "maxLength": KEYWORD_MAX_CHARS,
                        "description": "Search keyword (company name, code, or disclosure title)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": SEARCH_MAX_LIMIT,
                        "default": SEARCH_DEFAULT_LIMIT,
                        "description": "Maximum results (default: 20)"
                    }
                },
                "required": ["keyword"]
            }),
        },
        Tool {
            name: GET_COMPANY.into(),
            description: "Get recent disclosures for one company by its 4-digit stock code. \
                Example: get_company_disclosures(\"7203\") returns Toyota's disclosures."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "code": {
                        "type": ["string", "integer"],
                        "pattern": "^\\d{4}$",
                        "description": "4-digit stock code (e.g., '7203' for Toyota)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_LIMIT,
                        "default": DEFAULT_LIMIT,
                        "description": "Maximum results (default: 50)"
                    }
                },
                "required": ["code"]
            }),
        },
        Tool {
            name: GET_BY_DATE.into(),
            description: "Get all TDNET disclosures filed on a date. Only the last ~30 days are \
                available. Example: get_disclosures_by_date(\"2026-02-14\")"
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "target_date": {
                        "type": "string",
                        "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
                        "maxLength": 10,
                        "description": "Date in YYYY-MM-DD format"
                    }
                },
                "required": ["target_date"]
            }),
        },
    ]
}
