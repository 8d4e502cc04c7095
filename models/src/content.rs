//! Content entities managed through the admin panel and served to the
//! public site.
//!
//! DESIGN
//! ======
//! Each entity has a full row shape (what list/detail endpoints return)
//! and an input shape (what create/update endpoints accept). Inputs omit
//! ids and audit timestamps; the server owns those. Image and logo
//! fields are plain URL strings, never upload payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// NEWS
// =============================================================================

/// Editorial bucket for a news article.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    News,
    PressRelease,
    Announcement,
}

impl NewsCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::PressRelease => "press_release",
            Self::Announcement => "announcement",
        }
    }

    /// Parse a category from its stored string form.
    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "news" => Some(Self::News),
            "press_release" => Some(Self::PressRelease),
            "announcement" => Some(Self::Announcement),
            _ => None,
        }
    }
}

/// A news article or announcement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: Uuid,
    pub title: String,
    /// URL-safe unique key, derived from the title unless supplied.
    pub slug: String,
    pub summary: String,
    /// Markdown body.
    pub body: String,
    pub category: NewsCategory,
    pub image_url: Option<String>,
    pub is_published: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    /// Sticky announcements stay at the top of public listings.
    pub is_sticky: bool,
    /// Ordering weight among announcements; higher shows first.
    pub priority: i32,
    /// Announcements stop appearing publicly after this moment.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub announcement_expires_at: Option<OffsetDateTime>,
    pub views_count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create/update payload for news.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsInput {
    pub title: String,
    /// Optional explicit slug; server derives one from the title if empty.
    #[serde(default)]
    pub slug: Option<String>,
    pub summary: String,
    pub body: String,
    #[serde(default)]
    pub category: Option<NewsCategory>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_sticky: Option<bool>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub announcement_expires_at: Option<OffsetDateTime>,
}

/// Aggregates for the admin news list header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsStats {
    pub total: i64,
    pub published: i64,
    pub drafts: i64,
    pub announcements: i64,
    pub total_views: i64,
}

// =============================================================================
// HERO BANNERS
// =============================================================================

/// Rotating hero banner on the public landing page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroBanner {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    /// Carousel slot, ascending.
    pub position: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create/update payload for hero banners.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroBannerInput {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// PRODUCTS + SERVICE OFFERINGS
// =============================================================================

/// A retail banking product (accounts, cards, loans).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub description: String,
    /// Free-form grouping, e.g. `"accounts"` or `"loans"`.
    pub category: String,
    /// Display-only rate line, e.g. `"from 4.2% APR"`.
    pub rate_info: Option<String>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub position: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create/update payload for products.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub rate_info: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

/// A bank service (advisory, safe deposit, transfers).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub description: String,
    /// Icon slug the public site maps to an SVG.
    pub icon: Option<String>,
    pub requirements: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub position: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create/update payload for service offerings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOfferingInput {
    pub name: String,
    pub summary: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

// =============================================================================
// TEAM + COMPANY
// =============================================================================

/// Leadership/team entry on the about-us page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    /// Job title, e.g. `"Chief Risk Officer"`.
    pub title: String,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub is_active: bool,
    pub position: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create/update payload for team members.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberInput {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// The single company-profile row backing the about-us page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: Uuid,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<i32>,
    pub logo_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Upsert payload for company info.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

// =============================================================================
// CONTACT MESSAGES
// =============================================================================

/// A message submitted through the public contact form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub is_replied: bool,
    pub reply_message: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub replied_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Public contact form payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Aggregates for the admin contact inbox header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total: i64,
    pub unread: i64,
    pub replied: i64,
}

// =============================================================================
// SHARED REQUEST/RESPONSE SHAPES
// =============================================================================

/// Explicit ordering for banner/team reorder endpoints: ids listed in
/// the desired display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<Uuid>,
}

/// Grouped results for the public search endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub offerings: Vec<ServiceOffering>,
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
