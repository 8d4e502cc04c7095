//! Admin panel pages, one module per route.

pub mod banners;
pub mod company;
pub mod contacts;
pub mod dashboard;
pub mod login;
pub mod news;
pub mod offerings;
pub mod products;
pub mod register;
pub mod team;
pub mod users;
