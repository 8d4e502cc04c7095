use super::*;

#[test]
fn defaults_apply_when_unset() {
    assert_eq!(clamp_page(None), 1);
    assert_eq!(clamp_size(None), DEFAULT_PAGE_SIZE);
}

#[test]
fn out_of_range_values_are_clamped() {
    assert_eq!(clamp_page(Some(0)), 1);
    assert_eq!(clamp_page(Some(-3)), 1);
    assert_eq!(clamp_size(Some(0)), 1);
    assert_eq!(clamp_size(Some(10_000)), MAX_PAGE_SIZE);
}

#[test]
fn offset_is_zero_based() {
    assert_eq!(offset(1, 20), 0);
    assert_eq!(offset(3, 20), 40);
}
