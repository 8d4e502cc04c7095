//! Domain services behind the route layer.
//!
//! Each module owns one entity's persistence and rules and exposes a
//! `thiserror` enum the routes map to HTTP statuses.

pub mod auth;
pub mod banners;
pub mod company;
pub mod contacts;
pub mod listing;
pub mod news;
pub mod offerings;
pub mod products;
pub mod session;
pub mod team;
pub mod users;
