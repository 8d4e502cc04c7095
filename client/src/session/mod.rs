//! Client-side session management for the admin app.
//!
//! SYSTEM CONTEXT
//! ==============
//! The admin app keeps its session credentials (opaque token, cached
//! user profile, RFC 3339 expiry) in browser storage and mirrors the
//! server's expiry policy locally for UX. The server re-validates every
//! request; everything in this module is advisory on top of that.

pub mod clock;
pub mod manager;
pub mod store;
