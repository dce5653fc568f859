//! Title-based disclosure categorization.
//!
//! Patterns are evaluated in priority order and the first match wins. A title
//! such as "配当予想の修正" matches both the dividend and the forecast revision
//! keywords; it is a dividend disclosure because dividend comes first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse classification tag derived from a disclosure title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Earnings,
    Dividend,
    ForecastRevision,
    Buyback,
    Offering,
    Governance,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Earnings => "earnings",
            Category::Dividend => "dividend",
            Category::ForecastRevision => "forecast_revision",
            Category::Buyback => "buyback",
            Category::Offering => "offering",
            Category::Governance => "governance",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earnings" => Ok(Category::Earnings),
            "dividend" => Ok(Category::Dividend),
            "forecast_revision" => Ok(Category::ForecastRevision),
            "buyback" => Ok(Category::Buyback),
            "offering" => Ok(Category::Offering),
            "governance" => Ok(Category::Governance),
            "other" => Ok(Category::Other),
            _ => Err(format!("Invalid disclosure category: {}", s)),
        }
    }
}

// Order matters.
static PATTERNS: Lazy<Vec<(Regex, Category)>> = Lazy::new(|| {
    [
        ("決算短信|四半期報告|決算補足", Category::Earnings),
        ("配当", Category::Dividend),
        ("業績予想.*修正|通期.*修正|予想.*変更", Category::ForecastRevision),
        ("自己株式|自社株", Category::Buyback),
        ("新株|増資|公募", Category::Offering),
        ("ガバナンス|役員|取締役", Category::Governance),
    ]
    .into_iter()
    .map(|(pattern, category)| {
        (
            Regex::new(pattern).expect("category patterns are valid regexes"),
            category,
        )
    })
    .collect()
});

/// Categorize a disclosure by its title
pub fn categorize(title: &str) -> Category {
    PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(title))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other)
}
