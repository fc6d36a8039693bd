use std::sync::Arc;

use chrono::{DateTime, Duration};
use warden_auth::{AccessTokenClaims, RefreshTokenClaims, TokenCodec, TokenError};
use warden_config::JwtConfig;
use warden_core::{ManualClock, ServiceError};
use warden_models::{Email, Role, User, UserId};

fn test_user(role: Role) -> User {
    User {
        user_id: UserId::new(),
        username: "alice".to_string(),
        email: Email::new_unchecked("alice@example.com"),
        hashed_password: "digest".to_string(),
        is_active: true,
        role,
    }
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    ))
}

fn config(algorithm: &str) -> JwtConfig {
    JwtConfig::from_vars(|key| match key {
        "SECRET_KEY" => Some("test_secret_key_for_testing_purposes".to_string()),
        "ALGORITHM" => Some(algorithm.to_string()),
        _ => None,
    })
}

#[test]
fn test_every_hmac_algorithm_round_trips() {
    let user = test_user(Role::Superadmin);

    for algorithm in ["HS256", "HS384", "HS512"] {
        let config = config(algorithm);
        let codec = TokenCodec::new(&config.secret, &config.algorithm, clock());
        let claims = AccessTokenClaims::new(&user, config.refresh_ttl().num_seconds());

        let token = codec.issue(&claims, config.access_ttl()).unwrap();
        let decoded = codec.decode_as::<AccessTokenClaims>(&token).unwrap();

        assert_eq!(decoded.claims, claims, "{algorithm}");
    }
}

#[test]
fn test_access_token_expires_with_configured_ttl() {
    let config = config("HS256");
    let clock = clock();
    let codec = TokenCodec::new(&config.secret, &config.algorithm, clock.clone());
    let token = codec
        .issue(&AccessTokenClaims::new(&test_user(Role::User), 60), config.access_ttl())
        .unwrap();

    clock.advance(Duration::minutes(29));
    assert!(codec.decode_as::<AccessTokenClaims>(&token).is_ok());

    clock.advance(Duration::minutes(1));
    assert_eq!(
        codec.decode_as::<AccessTokenClaims>(&token),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_refresh_token_outlives_access_token() {
    let config = config("HS256");
    let clock = clock();
    let codec = TokenCodec::new(&config.secret, &config.algorithm, clock.clone());
    let token = codec
        .issue(&RefreshTokenClaims::new(&test_user(Role::User)), config.refresh_ttl())
        .unwrap();

    clock.advance(Duration::days(6));
    assert!(codec.decode_as::<RefreshTokenClaims>(&token).is_ok());

    clock.advance(Duration::days(1));
    assert_eq!(
        codec.decode_as::<RefreshTokenClaims>(&token),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_asymmetric_algorithm_is_unsupported() {
    let config = config("RS256");
    let codec = TokenCodec::new(&config.secret, &config.algorithm, clock());

    let err = codec
        .issue(&RefreshTokenClaims::new(&test_user(Role::User)), config.refresh_ttl())
        .unwrap_err();
    assert!(matches!(
        ServiceError::from(err),
        ServiceError::TokenIssuance(_)
    ));
}

#[test]
fn test_codec_debug_hides_secret() {
    let config = config("HS256");
    let codec = TokenCodec::new(&config.secret, &config.algorithm, clock());

    assert!(!format!("{codec:?}").contains(&config.secret));
}
