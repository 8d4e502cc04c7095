//! Payload validation shared by server handlers and admin forms.
//!
//! Checks here are shape checks, not policy: the server remains the
//! authority and re-runs them on every write.

use crate::content::NewsCategory;

/// A field-level validation failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {reason}")]
    Field { field: &'static str, reason: &'static str },
}

impl ValidationError {
    #[must_use]
    pub fn field(field: &'static str, reason: &'static str) -> Self {
        Self::Field { field, reason }
    }
}

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;
const MAX_SLUG_LEN: usize = 160;
const MIN_PASSWORD_LEN: usize = 8;

/// Check an email address for plausible shape.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the `email` field when the value
/// is empty, oversized, or not `local@domain.tld` shaped.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::field("email", "must not be empty"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::field("email", "too long"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::field("email", "missing @"));
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return Err(ValidationError::field("email", "invalid local part"));
    }
    if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::field("email", "invalid domain"));
    }

    Ok(())
}

/// Check a URL slug: lowercase ASCII alphanumerics and hyphens only.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the `slug` field.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::field("slug", "must not be empty"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::field("slug", "too long"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(ValidationError::field("slug", "must not start or end with a hyphen"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(ValidationError::field("slug", "lowercase letters, digits, and hyphens only"));
    }

    Ok(())
}

/// Minimum password shape for account creation.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the `password` field when the
/// value is shorter than eight characters or lacks a letter or a digit.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::field("password", "must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) || !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::field("password", "must contain a letter and a digit"));
    }

    Ok(())
}

/// Derive a URL slug from a title: lowercase, hyphen-separated,
/// non-alphanumerics dropped, truncated to the slug limit.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Category fallback used when news payloads omit one.
#[must_use]
pub fn category_or_default(value: Option<NewsCategory>) -> NewsCategory {
    value.unwrap_or(NewsCategory::News)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
