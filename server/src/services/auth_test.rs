use super::*;

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_lowercases_and_trims() {
    assert_eq!(normalize_email("  Teller@Meridian.EXAMPLE "), "teller@meridian.example");
}

#[test]
fn normalize_leaves_clean_emails_alone() {
    assert_eq!(normalize_email("ops@meridian.example"), "ops@meridian.example");
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

#[test]
fn hash_is_phc_formatted_and_not_the_password() {
    let hash = hash_password("correct horse 9").unwrap();
    assert!(hash.starts_with("$argon2id$"));
    assert!(!hash.contains("correct horse 9"));
}

#[test]
fn verify_accepts_the_right_password() {
    let hash = hash_password("correct horse 9").unwrap();
    assert!(verify_password("correct horse 9", &hash).unwrap());
}

#[test]
fn verify_rejects_the_wrong_password() {
    let hash = hash_password("correct horse 9").unwrap();
    assert!(!verify_password("wrong horse 9", &hash).unwrap());
}

#[test]
fn verify_errors_on_garbage_hash() {
    assert!(matches!(verify_password("whatever", "not-a-phc-string"), Err(AuthError::Hash(_))));
}

#[test]
fn two_hashes_of_one_password_differ() {
    let a = hash_password("correct horse 9").unwrap();
    let b = hash_password("correct horse 9").unwrap();
    assert_ne!(a, b);
}
