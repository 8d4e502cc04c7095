use time::macros::datetime;

use super::*;

#[test]
fn short_date_renders_ymd() {
    assert_eq!(short_date(datetime!(2026-03-02 14:05 UTC)), "2026-03-02");
}

#[test]
fn date_time_normalizes_to_utc() {
    assert_eq!(date_time(datetime!(2026-03-02 16:05 +2)), "2026-03-02 14:05 UTC");
}

#[test]
fn markdown_renders_basic_structure() {
    let html = markdown_to_html("# Rates\n\nNew *savings* rates.");
    assert!(html.contains("<h1>Rates</h1>"));
    assert!(html.contains("<em>savings</em>"));
}

#[test]
fn truncate_keeps_short_text_and_cuts_long_text() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer summary line", 8), "a longer…");
}
