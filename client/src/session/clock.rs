//! Time helpers for session expiry math.
//!
//! All expiry logic works in epoch milliseconds so it can be tested
//! with explicit values; only `now_ms` touches a real clock.

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let ms = js_sys::Date::now() as i64;
        ms
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Parse an RFC 3339 timestamp to epoch milliseconds. `None` on any
/// malformed input.
#[must_use]
pub fn parse_rfc3339_ms(raw: &str) -> Option<i64> {
    let parsed = OffsetDateTime::parse(raw, &Rfc3339).ok()?;
    i64::try_from(parsed.unix_timestamp_nanos() / 1_000_000).ok()
}
