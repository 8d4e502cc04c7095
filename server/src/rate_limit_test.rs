use super::*;

// =============================================================================
// PER-ACCOUNT WINDOW
// =============================================================================

#[test]
fn allows_attempts_under_the_account_limit() {
    let rl = LoginRateLimiter::new();
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(rl.check_and_record("teller@meridian.example").is_ok());
    }
}

#[test]
fn rejects_attempts_over_the_account_limit() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(rl.check_and_record_at("teller@meridian.example", now).is_ok());
    }

    let err = rl
        .check_and_record_at("teller@meridian.example", now)
        .expect_err("limit should be hit");
    assert!(matches!(err, RateLimitError::AccountExceeded { .. }));
}

#[test]
fn accounts_do_not_share_windows() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(rl.check_and_record_at("a@meridian.example", now).is_ok());
    }

    assert!(rl.check_and_record_at("b@meridian.example", now).is_ok());
}

#[test]
fn window_expiry_frees_slots() {
    let rl = LoginRateLimiter::new();
    let start = Instant::now();
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(rl.check_and_record_at("teller@meridian.example", start).is_ok());
    }
    assert!(rl.check_and_record_at("teller@meridian.example", start).is_err());

    let later = start + Duration::from_secs(DEFAULT_PER_ACCOUNT_WINDOW_SECS + 1);
    assert!(rl.check_and_record_at("teller@meridian.example", later).is_ok());
}

#[test]
fn successful_login_resets_the_account_window() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();
    for _ in 0..DEFAULT_PER_ACCOUNT_LIMIT {
        assert!(rl.check_and_record_at("teller@meridian.example", now).is_ok());
    }
    assert!(rl.check_and_record_at("teller@meridian.example", now).is_err());

    rl.reset_account("teller@meridian.example");
    assert!(rl.check_and_record_at("teller@meridian.example", now).is_ok());
}

// =============================================================================
// GLOBAL WINDOW
// =============================================================================

#[test]
fn global_limit_applies_across_accounts() {
    let rl = LoginRateLimiter::new();
    let now = Instant::now();
    for i in 0..DEFAULT_GLOBAL_LIMIT {
        let key = format!("user{i}@meridian.example");
        assert!(rl.check_and_record_at(&key, now).is_ok());
    }

    let err = rl
        .check_and_record_at("straggler@meridian.example", now)
        .expect_err("global limit should be hit");
    assert!(matches!(err, RateLimitError::GlobalExceeded { .. }));
}
