//! Yanoshin TDnet mirror response types.
//!
//! The mirror wraps each record as `{"Tdnet": {...}}`, but flat records are
//! accepted too. Every field is optional here; required fields are enforced
//! when the record is turned into a [`crate::Disclosure`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One entry of the `items` array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Nested {
        #[serde(rename = "Tdnet")]
        tdnet: RawDisclosure,
    },
    Flat(RawDisclosure),
}

impl RawItem {
    pub fn into_record(self) -> RawDisclosure {
        match self {
            RawItem::Nested { tdnet } => tdnet,
            RawItem::Flat(record) => record,
        }
    }
}

/// Disclosure record as published by the mirror
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDisclosure {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pubdate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub document_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_xbrl: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub markets_string: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub update_history: Option<String>,
}

/// Accept strings and numbers (the mirror is not consistent about ids and
/// codes); null and anything else become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_text))
}

/// Text of a string or number value
pub(crate) fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
