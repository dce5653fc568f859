//! Text and JSON rendering of query results.

use std::fmt::Write;
use tdnet_client::DisclosureList;

/// Which query produced a result; selects the header and line layout
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a> {
    Latest,
    Search { keyword: &'a str },
    Company { code: &'a str },
    ByDate { date: &'a str },
    Range,
}

/// Pretty JSON projection, non-ASCII kept as-is
pub fn render_json(list: &DisclosureList) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&list.to_json())
}

/// Human-readable listing
pub fn render_text(list: &DisclosureList, listing: Listing<'_>) -> String {
    let mut out = String::new();

    let header = match listing {
        Listing::Latest => format!("Latest disclosures ({} total)", list.total_count),
        Listing::Search { keyword } => {
            format!("Search results for: \"{}\" ({} found)", keyword, list.total_count)
        }
        Listing::Company { code } => format!("Disclosures for {} ({} total)", code, list.total_count),
        Listing::ByDate { date } => format!("Disclosures for {} ({} total)", date, list.total_count),
        Listing::Range => format!(
            "Disclosures for {} ({} total)",
            list.query_date.as_deref().unwrap_or("range"),
            list.total_count
        ),
    };
    let _ = writeln!(out, "{}\n", header);

    let time_format = match listing {
        Listing::Latest | Listing::ByDate { .. } => "%H:%M",
        _ => "%Y-%m-%d %H:%M",
    };

    for d in &list.disclosures {
        let time = d.published_at().format(time_format);
        match listing {
            Listing::Company { .. } => {
                let _ = writeln!(out, "  [{}] {}", time, d.company_name());
            }
            _ => {
                let _ = writeln!(out, "  [{}] {} {}", time, d.company_code(), d.company_name());
            }
        }
        let _ = writeln!(out, "    {}", d.title());
        if !matches!(listing, Listing::ByDate { .. }) {
            let _ = writeln!(out, "    [{}]", d.category());
        }
        out.push('\n');
    }

    out
}
