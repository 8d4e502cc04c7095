use super::*;
use time::macros::datetime;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// hash_token
// =============================================================================

#[test]
fn hash_token_is_64_hex_chars() {
    let hash = hash_token("anything");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_token_is_deterministic() {
    assert_eq!(hash_token("abc"), hash_token("abc"));
}

#[test]
fn hash_token_differs_per_input_and_from_raw() {
    let token = generate_token();
    assert_ne!(hash_token(&token), token);
    assert_ne!(hash_token("a"), hash_token("b"));
}

// =============================================================================
// midnight_expiry
// =============================================================================

#[test]
fn midday_expires_at_next_midnight() {
    let expiry = midnight_expiry(datetime!(2026-03-01 12:34:56 UTC));
    assert_eq!(expiry, datetime!(2026-03-02 00:00 UTC));
}

#[test]
fn login_at_midnight_gets_a_full_day() {
    let expiry = midnight_expiry(datetime!(2026-03-01 00:00 UTC));
    assert_eq!(expiry, datetime!(2026-03-02 00:00 UTC));
}

#[test]
fn expiry_rolls_over_month_and_year() {
    assert_eq!(midnight_expiry(datetime!(2026-12-31 23:59 UTC)), datetime!(2027-01-01 00:00 UTC));
}

#[test]
fn non_utc_now_is_normalized() {
    // 23:30 at +02:00 is 21:30 UTC, so expiry is the coming UTC midnight.
    let expiry = midnight_expiry(datetime!(2026-03-01 23:30 +2));
    assert_eq!(expiry, datetime!(2026-03-02 00:00 UTC));
}

// =============================================================================
// needs_rotation
// =============================================================================

#[test]
fn fresh_session_is_not_rotated() {
    let now = datetime!(2026-03-01 10:00 UTC);
    assert!(!needs_rotation(datetime!(2026-03-02 00:00 UTC), now));
}

#[test]
fn session_inside_threshold_is_rotated() {
    let now = datetime!(2026-03-01 22:01 UTC);
    assert!(needs_rotation(datetime!(2026-03-02 00:00 UTC), now));
}

#[test]
fn exactly_two_hours_left_is_not_rotated() {
    let now = datetime!(2026-03-01 22:00 UTC);
    assert!(!needs_rotation(datetime!(2026-03-02 00:00 UTC), now));
}

#[test]
fn expired_session_counts_as_rotation_due() {
    let now = datetime!(2026-03-02 01:00 UTC);
    assert!(needs_rotation(datetime!(2026-03-02 00:00 UTC), now));
}

// =============================================================================
// expiry_string
// =============================================================================

#[test]
fn expiry_string_is_rfc3339_utc() {
    let s = expiry_string(datetime!(2026-03-02 00:00 UTC));
    assert_eq!(s, "2026-03-02T00:00:00Z");
}

#[test]
fn expiry_string_converts_offsets_to_utc() {
    let s = expiry_string(datetime!(2026-03-02 02:00 +2));
    assert_eq!(s, "2026-03-02T00:00:00Z");
}
