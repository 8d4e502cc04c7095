use super::*;

// =============================================================================
// CATEGORY PARSING
// =============================================================================

#[test]
fn category_round_trips_through_str() {
    for cat in [NewsCategory::News, NewsCategory::PressRelease, NewsCategory::Announcement] {
        assert_eq!(NewsCategory::from_str(cat.as_str()), Some(cat));
    }
    assert_eq!(NewsCategory::from_str("weather"), None);
}

#[test]
fn category_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&NewsCategory::PressRelease).unwrap(), "\"press_release\"");
    assert_eq!(serde_json::from_str::<NewsCategory>("\"announcement\"").unwrap(), NewsCategory::Announcement);
}

// =============================================================================
// INPUT DEFAULTS
// =============================================================================

#[test]
fn news_input_accepts_minimal_payload() {
    let parsed: NewsInput = serde_json::from_str(
        r#"{
            "title": "Branch opening hours",
            "summary": "New Saturday hours.",
            "body": "From March, all branches open Saturdays."
        }"#,
    )
    .unwrap();

    assert!(parsed.slug.is_none());
    assert!(parsed.category.is_none());
    assert!(parsed.priority.is_none());
    assert!(parsed.announcement_expires_at.is_none());
}

#[test]
fn product_input_defaults_empty_features() {
    let parsed: ProductInput = serde_json::from_str(
        r#"{
            "name": "Everyday Checking",
            "summary": "No-fee checking.",
            "description": "A checking account without monthly fees.",
            "category": "accounts"
        }"#,
    )
    .unwrap();

    assert!(parsed.features.is_empty());
    assert!(parsed.is_featured.is_none());
}

#[test]
fn contact_input_requires_subject_and_message() {
    let missing = serde_json::from_str::<ContactInput>(r#"{"name": "A", "email": "a@b.example"}"#);
    assert!(missing.is_err());
}

// =============================================================================
// SHARED SHAPES
// =============================================================================

#[test]
fn reorder_request_preserves_order() {
    let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    let json = serde_json::to_string(&ReorderRequest { ids: ids.clone() }).unwrap();
    let back: ReorderRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ids, ids);
}

#[test]
fn search_results_groups_default_empty() {
    let parsed: SearchResults = serde_json::from_str(r#"{"query": "loans"}"#).unwrap();
    assert_eq!(parsed.query, "loans");
    assert!(parsed.news.is_empty());
    assert!(parsed.products.is_empty());
    assert!(parsed.offerings.is_empty());
}
