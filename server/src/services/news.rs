//! News service — articles, press releases, and announcements.
//!
//! DESIGN
//! ======
//! Slugs are derived from titles unless supplied explicitly and are
//! unique across all articles; uniqueness is enforced by the database
//! and surfaced as `SlugTaken`. Publishing stamps `published_at` on the
//! first transition only, so re-publishing keeps the original date.
//! Public reads see published rows exclusively; announcements addit-
//! ionally honor their expiry and sticky/priority ordering.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{NewsArticle, NewsCategory, NewsInput, NewsStats, Page, validate};

use crate::services::listing;

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("article not found: {0}")]
    NotFound(Uuid),
    #[error("slug already in use")]
    SlugTaken,
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Admin list filters; unset fields do not constrain the listing.
#[derive(Debug, Default, Clone)]
pub struct NewsFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub category: Option<NewsCategory>,
    pub published: Option<bool>,
}

const ARTICLE_COLUMNS: &str = "id, title, slug, summary, body, category, image_url, is_published, published_at, \
                               is_sticky, priority, announcement_expires_at, views_count, created_at, updated_at";

fn row_to_article(r: &PgRow) -> NewsArticle {
    NewsArticle {
        id: r.get("id"),
        title: r.get("title"),
        slug: r.get("slug"),
        summary: r.get("summary"),
        body: r.get("body"),
        category: NewsCategory::from_str(r.get::<String, _>("category").as_str()).unwrap_or(NewsCategory::News),
        image_url: r.get("image_url"),
        is_published: r.get("is_published"),
        published_at: r.get("published_at"),
        is_sticky: r.get("is_sticky"),
        priority: r.get("priority"),
        announcement_expires_at: r.get("announcement_expires_at"),
        views_count: r.get("views_count"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

/// Resolve the slug for a payload: validate an explicit one, otherwise
/// derive it from the title.
fn resolve_slug(input: &NewsInput) -> Result<String, NewsError> {
    let slug = match input.slug.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_owned(),
        _ => validate::slugify(&input.title),
    };
    validate::validate_slug(&slug).map_err(NewsError::Validation)?;
    Ok(slug)
}

fn check_input(input: &NewsInput) -> Result<(), NewsError> {
    if input.title.trim().is_empty() {
        return Err(models::ValidationError::field("title", "must not be empty").into());
    }
    if input.summary.trim().is_empty() {
        return Err(models::ValidationError::field("summary", "must not be empty").into());
    }
    Ok(())
}

// =============================================================================
// ADMIN CRUD
// =============================================================================

/// List articles for the admin panel with paging and filters.
///
/// # Errors
///
/// Returns a database error if either query fails.
pub async fn list(pool: &PgPool, filter: &NewsFilter) -> Result<Page<NewsArticle>, NewsError> {
    let page = listing::clamp_page(filter.page);
    let size = listing::clamp_size(filter.size);

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM news WHERE 1=1");
    push_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM news WHERE 1=1"));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push_bind(size);
    qb.push(" OFFSET ");
    qb.push_bind(listing::offset(page, size));

    let rows = qb.build().fetch_all(pool).await?;
    let items = rows.iter().map(row_to_article).collect();
    Ok(Page::new(items, total, page, size))
}

fn push_filters(qb: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &NewsFilter) {
    if let Some(category) = filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category.as_str());
    }
    if let Some(published) = filter.published {
        qb.push(" AND is_published = ");
        qb.push_bind(published);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR summary ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

/// Fetch one article by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<NewsArticle, NewsError> {
    let row = sqlx::query(&format!("SELECT {ARTICLE_COLUMNS} FROM news WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_article).ok_or(NewsError::NotFound(id))
}

/// Create an article as an unpublished draft.
///
/// # Errors
///
/// Validation errors for bad payloads, `SlugTaken` on conflict,
/// otherwise database errors.
pub async fn create(pool: &PgPool, input: &NewsInput, now: OffsetDateTime) -> Result<NewsArticle, NewsError> {
    check_input(input)?;
    let slug = resolve_slug(input)?;
    let id = Uuid::new_v4();
    let category = validate::category_or_default(input.category);

    let result = sqlx::query(
        "INSERT INTO news (id, title, slug, summary, body, category, image_url, is_sticky, priority,
                           announcement_expires_at, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)",
    )
    .bind(id)
    .bind(input.title.trim())
    .bind(&slug)
    .bind(input.summary.trim())
    .bind(&input.body)
    .bind(category.as_str())
    .bind(&input.image_url)
    .bind(input.is_sticky.unwrap_or(false))
    .bind(input.priority.unwrap_or(0))
    .bind(input.announcement_expires_at)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => get(pool, id).await,
        Err(e) if crate::services::auth::is_unique_violation(&e) => Err(NewsError::SlugTaken),
        Err(e) => Err(e.into()),
    }
}

/// Replace an article's editable fields.
///
/// # Errors
///
/// `NotFound` for an unknown id, `SlugTaken` on conflict, validation
/// errors for bad payloads, otherwise database errors.
pub async fn update(pool: &PgPool, id: Uuid, input: &NewsInput, now: OffsetDateTime) -> Result<NewsArticle, NewsError> {
    check_input(input)?;
    let slug = resolve_slug(input)?;
    let category = validate::category_or_default(input.category);

    let result = sqlx::query(&format!(
        "UPDATE news
         SET title = $2, slug = $3, summary = $4, body = $5, category = $6, image_url = $7,
             is_sticky = $8, priority = $9, announcement_expires_at = $10, updated_at = $11
         WHERE id = $1
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .bind(input.title.trim())
    .bind(&slug)
    .bind(input.summary.trim())
    .bind(&input.body)
    .bind(category.as_str())
    .bind(&input.image_url)
    .bind(input.is_sticky.unwrap_or(false))
    .bind(input.priority.unwrap_or(0))
    .bind(input.announcement_expires_at)
    .bind(now)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(Some(row)) => Ok(row_to_article(&row)),
        Ok(None) => Err(NewsError::NotFound(id)),
        Err(e) if crate::services::auth::is_unique_violation(&e) => Err(NewsError::SlugTaken),
        Err(e) => Err(e.into()),
    }
}

/// Delete an article.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), NewsError> {
    let result = sqlx::query("DELETE FROM news WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(NewsError::NotFound(id));
    }
    Ok(())
}

/// Publish or unpublish an article. The first publish stamps
/// `published_at`; later transitions keep the original date.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn set_published(
    pool: &PgPool,
    id: Uuid,
    published: bool,
    now: OffsetDateTime,
) -> Result<NewsArticle, NewsError> {
    let row = sqlx::query(&format!(
        "UPDATE news
         SET is_published = $2,
             published_at = CASE WHEN $2 AND published_at IS NULL THEN $3 ELSE published_at END,
             updated_at = $3
         WHERE id = $1
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .bind(published)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_article).ok_or(NewsError::NotFound(id))
}

/// Aggregates for the admin news list header.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn stats(pool: &PgPool) -> Result<NewsStats, NewsError> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE is_published) AS published,
                COUNT(*) FILTER (WHERE NOT is_published) AS drafts,
                COUNT(*) FILTER (WHERE category = 'announcement') AS announcements,
                COALESCE(SUM(views_count), 0)::BIGINT AS total_views
         FROM news",
    )
    .fetch_one(pool)
    .await?;

    Ok(NewsStats {
        total: row.get("total"),
        published: row.get("published"),
        drafts: row.get("drafts"),
        announcements: row.get("announcements"),
        total_views: row.get("total_views"),
    })
}

// =============================================================================
// PUBLIC READS
// =============================================================================

/// Published articles for the public site, newest first.
///
/// # Errors
///
/// Returns a database error if either query fails.
pub async fn list_published(
    pool: &PgPool,
    page: Option<i64>,
    size: Option<i64>,
    category: Option<NewsCategory>,
) -> Result<Page<NewsArticle>, NewsError> {
    let filter = NewsFilter { page, size, search: None, category, published: Some(true) };
    let page_num = listing::clamp_page(filter.page);
    let size_num = listing::clamp_size(filter.size);

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM news WHERE 1=1");
    push_filters(&mut count_qb, &filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM news WHERE 1=1"));
    push_filters(&mut qb, &filter);
    qb.push(" ORDER BY published_at DESC NULLS LAST LIMIT ");
    qb.push_bind(size_num);
    qb.push(" OFFSET ");
    qb.push_bind(listing::offset(page_num, size_num));

    let rows = qb.build().fetch_all(pool).await?;
    let items = rows.iter().map(row_to_article).collect();
    Ok(Page::new(items, total, page_num, size_num))
}

/// The most recent published articles, for the landing page feed.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn latest(pool: &PgPool, limit: i64) -> Result<Vec<NewsArticle>, NewsError> {
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM news
         WHERE is_published
         ORDER BY published_at DESC NULLS LAST
         LIMIT $1"
    ))
    .bind(limit.clamp(1, listing::MAX_PAGE_SIZE))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_article).collect())
}

/// Fetch a published article by slug and count the view.
///
/// # Errors
///
/// `NotFound` (nil id) for unknown or unpublished slugs, otherwise
/// database errors.
pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<NewsArticle, NewsError> {
    let row = sqlx::query(&format!(
        "UPDATE news SET views_count = views_count + 1
         WHERE slug = $1 AND is_published
         RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_article).ok_or(NewsError::NotFound(Uuid::nil()))
}

/// Live announcements: published, unexpired, sticky and priority first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn active_announcements(pool: &PgPool, now: OffsetDateTime) -> Result<Vec<NewsArticle>, NewsError> {
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM news
         WHERE category = 'announcement'
           AND is_published
           AND (announcement_expires_at IS NULL OR announcement_expires_at > $1)
         ORDER BY is_sticky DESC, priority DESC, published_at DESC NULLS LAST"
    ))
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_article).collect())
}

/// Published articles matching a search term, for the public search box.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub(crate) async fn search(pool: &PgPool, term: &str, limit: i64) -> Result<Vec<NewsArticle>, NewsError> {
    let pattern = format!("%{term}%");
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM news
         WHERE is_published AND (title ILIKE $1 OR summary ILIKE $1 OR body ILIKE $1)
         ORDER BY published_at DESC NULLS LAST
         LIMIT $2"
    ))
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_article).collect())
}

#[cfg(test)]
#[path = "news_test.rs"]
mod tests;
