use super::*;

// =============================================================================
// json_string_array
// =============================================================================

#[test]
fn string_array_round_trips() {
    let value = serde_json::json!(["no monthly fee", "free transfers"]);
    assert_eq!(json_string_array(&value), vec!["no monthly fee", "free transfers"]);
}

#[test]
fn empty_array_is_empty_vec() {
    assert!(json_string_array(&serde_json::json!([])).is_empty());
}

#[test]
fn non_array_reads_as_empty() {
    assert!(json_string_array(&serde_json::json!({"a": 1})).is_empty());
    assert!(json_string_array(&serde_json::json!(null)).is_empty());
}

#[test]
fn non_string_entries_are_skipped() {
    let value = serde_json::json!(["keep", 7, null, "also keep"]);
    assert_eq!(json_string_array(&value), vec!["keep", "also keep"]);
}

// =============================================================================
// check_input
// =============================================================================

#[test]
fn blank_name_is_rejected() {
    let input = ProductInput { name: "  ".into(), category: "accounts".into(), ..Default::default() };
    assert!(matches!(check_input(&input), Err(ProductError::Validation(_))));
}

#[test]
fn blank_category_is_rejected() {
    let input = ProductInput { name: "Everyday Account".into(), category: String::new(), ..Default::default() };
    assert!(matches!(check_input(&input), Err(ProductError::Validation(_))));
}

#[test]
fn named_and_categorized_input_passes() {
    let input = ProductInput { name: "Everyday Account".into(), category: "accounts".into(), ..Default::default() };
    assert!(check_input(&input).is_ok());
}
