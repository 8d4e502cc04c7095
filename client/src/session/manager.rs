//! The session manager: login/logout, local expiry, session validation,
//! and the auto-logout timer.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionManager` is constructed per application instance and
//! handed to components through Leptos context. It owns the credential
//! cache, the auto-logout timer generation, the validation sequence
//! counters, and the expiry listener list. Everything network-facing is
//! `hydrate`-only; the pure state transitions take explicit `now_ms`
//! values so they run under plain `cargo test`.
//!
//! CONCURRENCY
//! ===========
//! The browser event loop is single-threaded, but periodic validation,
//! focus-triggered validation, and user navigation still interleave at
//! await points. Two mechanisms keep that benign: validation responses
//! carry a sequence number and are applied only in issue order, and the
//! auto-logout timer checks a generation counter when it fires so a
//! cancelled or re-armed timer does nothing.

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use models::{LoginResponse, SessionValidationResponse, User};

use super::store::{CredentialCache, CredentialStore, MemoryStore};

/// Sentinel for "no timer armed" in the deadline cell.
const NO_DEADLINE: i64 = i64::MIN;

/// What applying a validation response did.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationOutcome {
    /// Session confirmed; carries the fresh profile when the server sent one.
    Valid(Option<User>),
    /// Authoritative rejection: credentials cleared, listeners notified.
    Rejected,
    /// Response arrived after a later one was already applied; discarded.
    Stale,
}

/// Cloneable session service. All clones share state.
#[derive(Clone)]
pub struct SessionManager {
    cache: CredentialCache,
    timer_generation: Arc<AtomicU64>,
    timer_deadline_ms: Arc<AtomicI64>,
    next_validation_seq: Arc<AtomicU64>,
    applied_validation_seq: Arc<AtomicU64>,
    expiry_listeners: Arc<Mutex<Vec<Box<dyn Fn() + Send + Sync>>>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            cache: CredentialCache::new(store),
            timer_generation: Arc::new(AtomicU64::new(0)),
            timer_deadline_ms: Arc::new(AtomicI64::new(NO_DEADLINE)),
            next_validation_seq: Arc::new(AtomicU64::new(1)),
            applied_validation_seq: Arc::new(AtomicU64::new(0)),
            expiry_listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Manager over browser `localStorage`.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn new_browser() -> Self {
        Self::new(Arc::new(super::store::LocalStorageStore))
    }

    /// Manager over an in-memory store, for SSR and tests.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    #[must_use]
    pub fn cache(&self) -> &CredentialCache {
        &self.cache
    }

    // -------------------------------------------------------------------------
    // LOGIN / LOGOUT
    // -------------------------------------------------------------------------

    /// Persist a successful login and arm the auto-logout timer for
    /// exactly the server-issued expiry.
    pub fn apply_login(&self, resp: &LoginResponse, now_ms: i64) {
        self.cache.set_token(&resp.access_token);
        self.cache.set_user(&resp.user);
        self.cache.set_expires_at(&resp.expires_at);
        if let Some(deadline) = super::clock::parse_rfc3339_ms(&resp.expires_at) {
            self.arm_auto_logout(deadline, now_ms);
        }
    }

    /// Sign in against the server.
    ///
    /// # Errors
    ///
    /// Returns the server's `detail` message, or a generic "Login
    /// failed" when none was provided.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, String> {
        let resp = crate::net::api::login(email, password).await?;
        self.apply_login(&resp, super::clock::now_ms());
        Ok(resp.user)
    }

    /// Drop local credentials and cancel the timer. Does not touch the
    /// server.
    pub fn clear_local(&self) {
        self.cache.clear();
        self.cancel_timer();
    }

    /// Sign out: best-effort server call, then unconditionally clear
    /// local state. A failed network call never leaves credentials
    /// behind.
    pub async fn logout(&self) {
        crate::net::api::logout().await;
        self.clear_local();
    }

    // -------------------------------------------------------------------------
    // LOCAL EXPIRY
    // -------------------------------------------------------------------------

    /// True iff a token exists and `now_ms` is before the stored expiry.
    ///
    /// Finding an expired or unparseable expiry clears the cache (lazy
    /// cleanup) and returns false. Safe to call repeatedly.
    pub fn is_authenticated(&self, now_ms: i64) -> bool {
        if self.cache.token().is_none() {
            return false;
        }
        match self.cache.expires_at_ms() {
            Some(deadline) if now_ms < deadline => true,
            _ => {
                self.clear_local();
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // VALIDATION (sequence-guarded)
    // -------------------------------------------------------------------------

    /// Take the next validation sequence number. Call before issuing
    /// the request; pass the number to [`Self::apply_validation`] with
    /// the response.
    pub fn begin_validation(&self) -> u64 {
        self.next_validation_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Apply a validation response. Responses are applied in issue
    /// order only: a response whose sequence number is not newer than
    /// the last applied one is discarded as [`ValidationOutcome::Stale`].
    pub fn apply_validation(
        &self,
        seq: u64,
        resp: &SessionValidationResponse,
        now_ms: i64,
    ) -> ValidationOutcome {
        // Last-writer-wins by issue order. compare_exchange keeps the
        // high-water mark monotonic even if calls interleave.
        let mut applied = self.applied_validation_seq.load(Ordering::Relaxed);
        loop {
            if seq <= applied {
                return ValidationOutcome::Stale;
            }
            match self.applied_validation_seq.compare_exchange(
                applied,
                seq,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => applied = current,
            }
        }

        if !resp.valid {
            self.clear_local();
            self.notify_expired();
            return ValidationOutcome::Rejected;
        }

        if resp.token_refreshed {
            if let Some(token) = &resp.new_token {
                self.cache.set_token(token);
            }
            if let Some(expires_at) = &resp.expires_at {
                self.cache.set_expires_at(expires_at);
                if let Some(deadline) = super::clock::parse_rfc3339_ms(expires_at) {
                    self.arm_auto_logout(deadline, now_ms);
                }
            }
        }
        if let Some(user) = &resp.user {
            self.cache.set_user(user);
        }
        ValidationOutcome::Valid(resp.user.clone())
    }

    /// Validate the current session against the server.
    ///
    /// Returns `None` when there is no token or the request failed in
    /// transit. A transport failure is never a logout signal; the
    /// session is presumed still valid and will be re-checked later.
    pub async fn validate(&self) -> Option<ValidationOutcome> {
        let token = self.cache.token()?;
        let seq = self.begin_validation();
        match crate::net::api::validate_session(&token).await {
            Ok(resp) => Some(self.apply_validation(seq, &resp, super::clock::now_ms())),
            Err(_) => None,
        }
    }

    /// Fetch the fresh profile from the server and re-cache it.
    pub async fn current_user(&self) -> Option<User> {
        let token = self.cache.token()?;
        let user = crate::net::api::fetch_current_user(&token).await?;
        self.cache.set_user(&user);
        Some(user)
    }

    /// Settle the startup profile fetch. A failed fetch with a cached
    /// profile keeps the session (a flaky network must not sign anyone
    /// out; periodic validation decides). A failed fetch with nothing
    /// cached means the stored credentials are stale: clear them.
    pub fn settle_profile_fetch(&self, cached: Option<User>, fetched: Option<User>) -> Option<User> {
        match (cached, fetched) {
            (_, Some(user)) => Some(user),
            (Some(user), None) => Some(user),
            (None, None) => {
                self.clear_local();
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // AUTO-LOGOUT TIMER
    // -------------------------------------------------------------------------

    /// Arm the auto-logout timer for `deadline_ms`. Any previously
    /// armed timer is invalidated. Returns the new generation.
    pub fn arm_auto_logout(&self, deadline_ms: i64, now_ms: i64) -> u64 {
        let generation = self.timer_generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.timer_deadline_ms.store(deadline_ms, Ordering::Relaxed);

        #[cfg(feature = "hydrate")]
        {
            let manager = self.clone();
            #[allow(clippy::cast_sign_loss)]
            let wait_ms = deadline_ms.saturating_sub(now_ms).max(0) as u64;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(wait_ms)).await;
                manager.timer_fired(generation);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = now_ms;
        }
        generation
    }

    /// Invalidate any armed timer.
    pub fn cancel_timer(&self) {
        self.timer_generation.fetch_add(1, Ordering::Relaxed);
        self.timer_deadline_ms.store(NO_DEADLINE, Ordering::Relaxed);
    }

    /// Deadline of the currently armed timer, if any.
    #[must_use]
    pub fn timer_deadline_ms(&self) -> Option<i64> {
        match self.timer_deadline_ms.load(Ordering::Relaxed) {
            NO_DEADLINE => None,
            deadline => Some(deadline),
        }
    }

    /// Timer expiry path. A stale generation (timer re-armed or
    /// cancelled since this one was set) does nothing.
    pub fn timer_fired(&self, generation: u64) {
        if self.timer_generation.load(Ordering::Relaxed) != generation {
            return;
        }
        self.timer_deadline_ms.store(NO_DEADLINE, Ordering::Relaxed);
        self.cache.clear();
        self.notify_expired();
    }

    // -------------------------------------------------------------------------
    // EXPIRY LISTENERS
    // -------------------------------------------------------------------------

    /// Register a callback fired when the session ends locally: the
    /// auto-logout timer fires, or the server rejects a validation.
    pub fn on_session_expired<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut listeners) = self.expiry_listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    fn notify_expired(&self) {
        if let Ok(listeners) = self.expiry_listeners.lock() {
            for listener in listeners.iter() {
                listener();
            }
        }
    }
}
