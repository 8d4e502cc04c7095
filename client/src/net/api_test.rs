use super::*;

#[test]
fn extracts_detail_from_error_body() {
    assert_eq!(
        extract_detail(r#"{"detail": "Incorrect email or password"}"#, "Login failed"),
        "Incorrect email or password"
    );
}

#[test]
fn falls_back_when_body_is_not_the_error_shape() {
    assert_eq!(extract_detail("", "Login failed"), "Login failed");
    assert_eq!(extract_detail("<html>502</html>", "Login failed"), "Login failed");
    assert_eq!(extract_detail(r#"{"detail": 42}"#, "Login failed"), "Login failed");
    assert_eq!(extract_detail(r#"{"message": "nope"}"#, "Login failed"), "Login failed");
}
