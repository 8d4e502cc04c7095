use super::*;

#[test]
fn page_count_rounds_up() {
    let page = Page::new(vec![1, 2, 3], 10, 1, 3);
    assert_eq!(page.pages, 4);
    assert_eq!(page.total, 10);
}

#[test]
fn exact_multiple_does_not_add_a_page() {
    let page = Page::new(vec![1, 2, 3], 9, 2, 3);
    assert_eq!(page.pages, 3);
}

#[test]
fn empty_listing_has_zero_pages() {
    let page: Page<i32> = Page::new(Vec::new(), 0, 1, 20);
    assert_eq!(page.pages, 0);
    assert!(page.is_empty());
}

#[test]
fn zero_size_is_clamped() {
    let page: Page<i32> = Page::new(Vec::new(), 5, 1, 0);
    assert_eq!(page.size, 1);
    assert_eq!(page.pages, 5);
}
