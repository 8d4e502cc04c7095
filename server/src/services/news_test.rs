use super::*;

fn input(title: &str) -> NewsInput {
    NewsInput { title: title.to_owned(), summary: "summary".to_owned(), body: "body".to_owned(), ..Default::default() }
}

// =============================================================================
// resolve_slug
// =============================================================================

#[test]
fn slug_is_derived_from_title() {
    let slug = resolve_slug(&input("New Branch Opening in Riverside!")).unwrap();
    assert_eq!(slug, "new-branch-opening-in-riverside");
}

#[test]
fn explicit_slug_wins_over_title() {
    let mut payload = input("Some Title");
    payload.slug = Some("custom-slug".to_owned());
    assert_eq!(resolve_slug(&payload).unwrap(), "custom-slug");
}

#[test]
fn blank_explicit_slug_falls_back_to_title() {
    let mut payload = input("Fallback Title");
    payload.slug = Some("   ".to_owned());
    assert_eq!(resolve_slug(&payload).unwrap(), "fallback-title");
}

#[test]
fn invalid_explicit_slug_is_rejected() {
    let mut payload = input("Some Title");
    payload.slug = Some("Not A Slug".to_owned());
    assert!(matches!(resolve_slug(&payload), Err(NewsError::Validation(_))));
}

// =============================================================================
// check_input
// =============================================================================

#[test]
fn blank_title_is_rejected() {
    assert!(matches!(check_input(&input("   ")), Err(NewsError::Validation(_))));
}

#[test]
fn blank_summary_is_rejected() {
    let mut payload = input("Title");
    payload.summary = String::new();
    assert!(matches!(check_input(&payload), Err(NewsError::Validation(_))));
}

#[test]
fn complete_input_passes() {
    assert!(check_input(&input("Title")).is_ok());
}
