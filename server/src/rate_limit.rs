//! In-memory rate limiting for login attempts.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by the normalized account email. Two limits enforced:
//! - Per-account: 5 attempts / 5 min
//! - Global: 100 attempts / min
//!
//! TRADE-OFFS
//! ==========
//! Keying on the submitted email (not the client address) throttles
//! online guessing against one account without any proxy-dependent
//! client IP plumbing. A successful login clears the account's window.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const DEFAULT_PER_ACCOUNT_LIMIT: usize = 5;
const DEFAULT_PER_ACCOUNT_WINDOW_SECS: u64 = 300;

const DEFAULT_GLOBAL_LIMIT: usize = 100;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Clone, Copy)]
struct RateLimitConfig {
    per_account_limit: usize,
    per_account_window: Duration,
    global_limit: usize,
    global_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_account_window_secs = env_parse("LOGIN_RATE_LIMIT_WINDOW_SECS", DEFAULT_PER_ACCOUNT_WINDOW_SECS);
        let global_window_secs = env_parse("LOGIN_RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS);

        Self {
            per_account_limit: env_parse("LOGIN_RATE_LIMIT_PER_ACCOUNT", DEFAULT_PER_ACCOUNT_LIMIT),
            per_account_window: Duration::from_secs(per_account_window_secs),
            global_limit: env_parse("LOGIN_RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(global_window_secs),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("too many login attempts for this account (max {limit} per {window_secs}s)")]
    AccountExceeded { limit: usize, window_secs: u64 },
    #[error("login temporarily unavailable (max {limit} attempts per {window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// LOGIN RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct LoginRateLimiter {
    inner: Arc<Mutex<LoginRateLimiterInner>>,
    config: RateLimitConfig,
}

struct LoginRateLimiterInner {
    /// Per-account attempt timestamps, keyed by normalized email.
    account_attempts: HashMap<String, VecDeque<Instant>>,
    /// Global attempt timestamps.
    global_attempts: VecDeque<Instant>,
}

impl LoginRateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LoginRateLimiterInner {
                account_attempts: HashMap::new(),
                global_attempts: VecDeque::new(),
            })),
            config: RateLimitConfig::from_env(),
        }
    }

    /// Check both per-account and global limits, then record the attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`RateLimitError`] when either window is full; the
    /// attempt is not recorded in that case.
    pub fn check_and_record(&self, account_key: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(account_key, Instant::now())
    }

    /// Internal: check + record with explicit timestamp (for testing).
    fn check_and_record_at(&self, account_key: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        // Prune and check global first (no borrow conflict).
        prune_window(&mut inner.global_attempts, now, cfg.global_window);
        if inner.global_attempts.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        // Prune and check per-account.
        let account_deque = inner.account_attempts.entry(account_key.to_owned()).or_default();
        prune_window(account_deque, now, cfg.per_account_window);
        if account_deque.len() >= cfg.per_account_limit {
            return Err(RateLimitError::AccountExceeded {
                limit: cfg.per_account_limit,
                window_secs: cfg.per_account_window.as_secs(),
            });
        }

        // Record.
        account_deque.push_back(now);
        inner.global_attempts.push_back(now);

        Ok(())
    }

    /// Clear the window for an account after a successful login.
    pub fn reset_account(&self, account_key: &str) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.account_attempts.remove(account_key);
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
