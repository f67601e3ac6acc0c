use std::env;

use jsonwebtoken::{EncodingKey, Header, encode};

use super::*;

const TEST_SECRET: &str = "supersecretjwtsecretforunittesting123";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_SECRET", TEST_SECRET);
    }
}

#[test]
fn test_issue_and_validate_round_trip() {
    set_env_vars();
    let user_id = Uuid::new_v4();

    let token =
        issue_access_token(user_id, "test@example.com", "customer").expect("issuing should work");
    let claims = validate_access_token(&token).expect("freshly issued token should validate");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, "test@example.com");
    assert_eq!(claims.role, "customer");
}

#[test]
fn test_validate_expired_token() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: "test@example.com".to_string(),
        role: "customer".to_string(),
        exp: 1, // past
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_access_token(&token);
    assert!(result.is_err());
}

#[test]
fn test_validate_invalid_signature() {
    set_env_vars();
    let my_claims = Claims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: "test@example.com".to_string(),
        role: "customer".to_string(),
        exp: 9999999999,
    };

    let token = encode(
        &Header::default(),
        &my_claims,
        &EncodingKey::from_secret(b"wrongsecret"),
    )
    .unwrap();

    let result = validate_access_token(&token);
    assert!(result.is_err());
}
