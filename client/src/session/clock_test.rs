use super::*;

#[test]
fn parses_utc_timestamp_to_epoch_ms() {
    // 2026-01-15T00:00:00Z
    assert_eq!(parse_rfc3339_ms("2026-01-15T00:00:00Z"), Some(1_768_435_200_000));
}

#[test]
fn parses_offset_timestamp() {
    // +02:00 is two hours behind the same wall-clock instant in UTC.
    let utc = parse_rfc3339_ms("2026-01-15T12:00:00Z").unwrap();
    let offset = parse_rfc3339_ms("2026-01-15T14:00:00+02:00").unwrap();
    assert_eq!(utc, offset);
}

#[test]
fn preserves_fractional_seconds() {
    let whole = parse_rfc3339_ms("2026-01-15T00:00:00Z").unwrap();
    let frac = parse_rfc3339_ms("2026-01-15T00:00:00.250Z").unwrap();
    assert_eq!(frac - whole, 250);
}

#[test]
fn rejects_malformed_input() {
    assert_eq!(parse_rfc3339_ms(""), None);
    assert_eq!(parse_rfc3339_ms("not a date"), None);
    assert_eq!(parse_rfc3339_ms("2026-01-15"), None);
}

#[test]
fn now_ms_is_past_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}
