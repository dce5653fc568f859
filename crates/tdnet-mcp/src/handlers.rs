//! Tool handlers.
//!
//! Arguments are validated here before the client is touched, so a bad call
//! never opens a connection.

use serde_json::Value;
use std::sync::Arc;
use tdnet_client::{parse_iso_date, validate_code, DisclosureList, TdnetError, DEFAULT_LIMIT, MAX_LIMIT};
use tracing::{debug, warn};

use crate::protocol::ToolCallResult;
use crate::provider::ClientProvider;
use crate::tools::{
    GET_BY_DATE, GET_COMPANY, GET_LATEST, KEYWORD_MAX_CHARS, SEARCH, SEARCH_DEFAULT_LIMIT,
    SEARCH_MAX_LIMIT,
};

type Result<T> = std::result::Result<T, TdnetError>;

/// Dispatches `tools/call` requests to the shared client
pub struct ToolHandlers {
    provider: Arc<ClientProvider>,
}

impl ToolHandlers {
    pub fn new(provider: Arc<ClientProvider>) -> Self {
        Self { provider }
    }

    /// Handle a tool call by name; failures become error results
    pub async fn handle(&self, name: &str, args: Value) -> ToolCallResult {
        match self.dispatch(name, &args).await {
            Ok(list) => ToolCallResult::json(&list.to_json()),
            Err(e) => {
                if e.is_invalid_argument() {
                    debug!(tool = name, error = %e, "Rejected tool arguments");
                } else {
                    warn!(tool = name, error = %e, "Tool call failed");
                }
                ToolCallResult::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, args: &Value) -> Result<DisclosureList> {
        match name {
            GET_LATEST => {
                let limit = limit_arg(args, DEFAULT_LIMIT, MAX_LIMIT)?;
                self.provider.get().await.get_recent(limit).await
            }
            SEARCH => {
                let keyword = keyword_arg(args)?;
                let limit = limit_arg(args, SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT)?;
                self.provider
                    .get()
                    .await
                    .search(&keyword, limit as usize)
                    .await
            }
            GET_COMPANY => {
                let code = code_arg(args)?;
                let limit = limit_arg(args, DEFAULT_LIMIT, MAX_LIMIT)?;
                self.provider.get().await.get_by_code(&code, limit).await
            }
            GET_BY_DATE => {
                let raw = string_arg(args, "target_date")?;
                let date = parse_iso_date(raw)?;
                let result = self.provider.get().await.get_by_date(date).await?;
                Ok(result)
            }
            _ => Err(TdnetError::InvalidArgument(format!("Unknown tool: {}", name))),
        }
    }
}

/// Optional integer in `1..=max`, `default` when absent
fn limit_arg(args: &Value, default: u32, max: u32) -> Result<u32> {
    let out_of_range = || {
        TdnetError::InvalidArgument(format!("limit must be an integer between 1 and {}", max))
    };

    match args.get("limit") {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let limit = value.as_u64().ok_or_else(out_of_range)?;
            if (1..=u64::from(max)).contains(&limit) {
                Ok(limit as u32)
            } else {
                Err(out_of_range())
            }
        }
    }
}

fn string_arg<'a>(args: &'a Value, name: &str) -> Result<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| TdnetError::InvalidArgument(format!("{} is required", name)))
}

fn keyword_arg(args: &Value) -> Result<String> {
    let keyword = string_arg(args, "keyword")?;
    if keyword.chars().count() > KEYWORD_MAX_CHARS {
        return Err(TdnetError::InvalidArgument(format!(
            "keyword must be at most {} characters",
            KEYWORD_MAX_CHARS
        )));
    }
    Ok(keyword.to_string())
}

/// Stock code given as a string or a bare number
fn code_arg(args: &Value) -> Result<String> {
    let code = match args.get("code") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(TdnetError::InvalidArgument("code is required".to_string())),
    };
    validate_code(&code)?;
    Ok(code)
}
