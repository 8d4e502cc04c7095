//! HTTP client for the REST backend.

pub mod api;
