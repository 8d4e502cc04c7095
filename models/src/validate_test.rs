use super::*;

// =============================================================================
// EMAIL
// =============================================================================

#[test]
fn accepts_plain_addresses() {
    assert!(validate_email("teller@meridian.example").is_ok());
    assert!(validate_email("  padded@meridian.example  ").is_ok());
}

#[test]
fn rejects_malformed_addresses() {
    assert!(validate_email("").is_err());
    assert!(validate_email("no-at-sign").is_err());
    assert!(validate_email("@meridian.example").is_err());
    assert!(validate_email("teller@nodot").is_err());
    assert!(validate_email("a@b@c.example").is_err());
}

// =============================================================================
// SLUGS
// =============================================================================

#[test]
fn accepts_kebab_slugs() {
    assert!(validate_slug("saturday-hours-2026").is_ok());
}

#[test]
fn rejects_uppercase_and_edge_hyphens() {
    assert!(validate_slug("Saturday-Hours").is_err());
    assert!(validate_slug("-leading").is_err());
    assert!(validate_slug("trailing-").is_err());
    assert!(validate_slug("spaced out").is_err());
    assert!(validate_slug("").is_err());
}

#[test]
fn slugify_collapses_punctuation_runs() {
    assert_eq!(slugify("Branch Opening Hours!"), "branch-opening-hours");
    assert_eq!(slugify("Q1 2026 — Results"), "q1-2026-results");
    assert_eq!(slugify("   "), "");
}

#[test]
fn slugify_output_passes_validation() {
    let slug = slugify("New Mortgage Rates (March 2026)");
    assert!(validate_slug(&slug).is_ok());
}

// =============================================================================
// PASSWORDS
// =============================================================================

#[test]
fn rejects_short_or_single_class_passwords() {
    assert!(validate_password("ab1").is_err());
    assert!(validate_password("onlyletters").is_err());
    assert!(validate_password("12345678").is_err());
}

#[test]
fn accepts_mixed_passwords() {
    assert!(validate_password("correct horse 9").is_ok());
}

// =============================================================================
// CATEGORY DEFAULT
// =============================================================================

#[test]
fn category_defaults_to_news() {
    assert_eq!(category_or_default(None), NewsCategory::News);
    assert_eq!(category_or_default(Some(NewsCategory::Announcement)), NewsCategory::Announcement);
}
