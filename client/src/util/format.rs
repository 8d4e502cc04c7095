//! Display formatting helpers for admin tables and the news editor.

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;

use time::OffsetDateTime;
use time::macros::format_description;

/// Short date for table cells, e.g. `2026-03-02`.
#[must_use]
pub fn short_date(ts: OffsetDateTime) -> String {
    let desc = format_description!("[year]-[month]-[day]");
    ts.format(&desc).unwrap_or_default()
}

/// Date + time for detail views, e.g. `2026-03-02 14:05 UTC`.
#[must_use]
pub fn date_time(ts: OffsetDateTime) -> String {
    let desc = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    ts.to_offset(time::UtcOffset::UTC).format(&desc).unwrap_or_default()
}

/// Render a markdown body to HTML for the news preview pane.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new(markdown);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Truncate display text on a char boundary, appending an ellipsis.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
