use super::*;

#[test]
fn issued_tokens_round_trip() {
    let token = issue_token("alice", false, "test-secret", 3600).unwrap();
    let claims = validate_token(&token, "test-secret").unwrap();

    assert_eq!(claims.sub, "alice");
    assert!(!claims.admin);
}

#[test]
fn admin_flag_survives_the_round_trip() {
    let token = issue_token("admin", true, "test-secret", 3600).unwrap();
    let claims = validate_token(&token, "test-secret").unwrap();

    assert!(claims.admin);
}

#[test]
fn tokens_signed_with_another_secret_are_rejected() {
    let token = issue_token("alice", false, "test-secret", 3600).unwrap();

    assert!(validate_token(&token, "other-secret").is_err());
}

#[test]
fn expired_tokens_are_rejected() {
    // Far enough in the past to clear jsonwebtoken's default leeway.
    let token = issue_token("alice", false, "test-secret", -3600).unwrap();

    assert!(validate_token(&token, "test-secret").is_err());
}
