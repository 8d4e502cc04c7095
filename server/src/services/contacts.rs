//! Contact inbox service: messages from the public contact form and the
//! admin read/reply workflow.
//!
//! Replies here only record what was sent and when; actual mail delivery
//! is outside the CMS.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use models::{ContactInput, ContactMessage, ContactStats, Page, validate};

use crate::services::listing;

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("contact message not found: {0}")]
    NotFound(Uuid),
    #[error("{0}")]
    Validation(#[from] models::ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Admin inbox filters; unset fields do not constrain the listing.
#[derive(Debug, Default, Clone)]
pub struct ContactFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub is_read: Option<bool>,
    pub is_replied: Option<bool>,
}

const MESSAGE_COLUMNS: &str = "id, name, email, phone, company, subject, message, is_read, is_replied, \
                               reply_message, replied_at, created_at";

fn row_to_message(r: &PgRow) -> ContactMessage {
    ContactMessage {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        phone: r.get("phone"),
        company: r.get("company"),
        subject: r.get("subject"),
        message: r.get("message"),
        is_read: r.get("is_read"),
        is_replied: r.get("is_replied"),
        reply_message: r.get("reply_message"),
        replied_at: r.get("replied_at"),
        created_at: r.get("created_at"),
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &ContactFilter) {
    if let Some(is_read) = filter.is_read {
        qb.push(" AND is_read = ");
        qb.push_bind(is_read);
    }
    if let Some(is_replied) = filter.is_replied {
        qb.push(" AND is_replied = ");
        qb.push_bind(is_replied);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let pattern = format!("%{search}%");
            qb.push(" AND (name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR email ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR subject ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR message ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

/// Inbox listing for the admin panel, newest first.
///
/// # Errors
///
/// Returns a database error if either query fails.
pub async fn list(pool: &PgPool, filter: &ContactFilter) -> Result<Page<ContactMessage>, ContactError> {
    let page = listing::clamp_page(filter.page);
    let size = listing::clamp_size(filter.size);

    let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM contact_messages WHERE 1=1");
    push_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::new(format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE 1=1"));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC LIMIT ");
    qb.push_bind(size);
    qb.push(" OFFSET ");
    qb.push_bind(listing::offset(page, size));

    let rows = qb.build().fetch_all(pool).await?;
    let items = rows.iter().map(row_to_message).collect();
    Ok(Page::new(items, total, page, size))
}

/// Fetch one message by id.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn get(pool: &PgPool, id: Uuid) -> Result<ContactMessage, ContactError> {
    let row = sqlx::query(&format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_message).ok_or(ContactError::NotFound(id))
}

/// Store a message submitted through the public contact form.
///
/// # Errors
///
/// Validation errors for bad payloads, otherwise database errors.
pub async fn submit(pool: &PgPool, input: &ContactInput, now: OffsetDateTime) -> Result<ContactMessage, ContactError> {
    if input.name.trim().is_empty() {
        return Err(models::ValidationError::field("name", "must not be empty").into());
    }
    validate::validate_email(&input.email).map_err(ContactError::Validation)?;
    if input.subject.trim().is_empty() {
        return Err(models::ValidationError::field("subject", "must not be empty").into());
    }
    if input.message.trim().is_empty() {
        return Err(models::ValidationError::field("message", "must not be empty").into());
    }

    let id = Uuid::new_v4();
    let row = sqlx::query(&format!(
        "INSERT INTO contact_messages (id, name, email, phone, company, subject, message, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(id)
    .bind(input.name.trim())
    .bind(input.email.trim())
    .bind(&input.phone)
    .bind(&input.company)
    .bind(input.subject.trim())
    .bind(input.message.trim())
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row_to_message(&row))
}

/// Delete a message.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ContactError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ContactError::NotFound(id));
    }
    Ok(())
}

/// Mark a message read or unread.
///
/// # Errors
///
/// `NotFound` for an unknown id, otherwise database errors.
pub async fn set_read(pool: &PgPool, id: Uuid, is_read: bool) -> Result<ContactMessage, ContactError> {
    let row = sqlx::query(&format!(
        "UPDATE contact_messages SET is_read = $2 WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(id)
    .bind(is_read)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_message).ok_or(ContactError::NotFound(id))
}

/// Record a reply: stores the text, stamps `replied_at`, and marks the
/// message read.
///
/// # Errors
///
/// `NotFound` for an unknown id, validation errors for an empty reply,
/// otherwise database errors.
pub async fn reply(
    pool: &PgPool,
    id: Uuid,
    reply_message: &str,
    now: OffsetDateTime,
) -> Result<ContactMessage, ContactError> {
    let reply_message = reply_message.trim();
    if reply_message.is_empty() {
        return Err(models::ValidationError::field("reply_message", "must not be empty").into());
    }

    let row = sqlx::query(&format!(
        "UPDATE contact_messages
         SET is_replied = TRUE, is_read = TRUE, reply_message = $2, replied_at = $3
         WHERE id = $1
         RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(id)
    .bind(reply_message)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_message).ok_or(ContactError::NotFound(id))
}

/// Aggregates for the admin inbox header.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn stats(pool: &PgPool) -> Result<ContactStats, ContactError> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT is_read) AS unread,
                COUNT(*) FILTER (WHERE is_replied) AS replied
         FROM contact_messages",
    )
    .fetch_one(pool)
    .await?;

    Ok(ContactStats { total: row.get("total"), unread: row.get("unread"), replied: row.get("replied") })
}
