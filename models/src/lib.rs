//! Shared wire types for the Meridian CMS REST API.
//!
//! This crate owns the JSON representation used by both `server` and
//! `client`: auth responses, content entities managed through the admin
//! panel, the pagination envelope, and the payload validation helpers
//! both sides apply before trusting user input.

pub mod auth;
pub mod content;
pub mod page;
pub mod validate;

pub use auth::{AuthCheckResponse, LoginResponse, SessionValidationResponse, User, UserAccount, UserRole, UserStats};
pub use content::{
    CompanyInfo, CompanyInput, ContactInput, ContactMessage, ContactStats, HeroBanner, HeroBannerInput, NewsArticle,
    NewsCategory, NewsInput, NewsStats, Product, ProductInput, ReorderRequest, SearchResults, ServiceOffering,
    ServiceOfferingInput, TeamMember, TeamMemberInput,
};
pub use page::Page;
pub use validate::ValidationError;
