use warden_config::PasswordConfig;
use warden_core::{PasswordHasher, ServiceError};

fn hasher() -> PasswordHasher {
    PasswordHasher::new(4)
}

#[test]
fn test_hash_uses_configured_cost() {
    let config = PasswordConfig::from_vars(|key| (key == "BCRYPT_COST").then(|| "5".to_string()));
    let digest = PasswordHasher::new(config.bcrypt_cost).hash("secret").unwrap();

    assert!(digest.starts_with("$2b$05$"));
}

#[test]
fn test_verify_unicode_and_whitespace() {
    let hasher = hasher();
    let digest = hasher.hash("pässwörd 🔒").unwrap();

    assert!(hasher.verify("pässwörd 🔒", &digest).unwrap());
    assert!(!hasher.verify("pässwörd", &digest).unwrap());
    assert!(!hasher.verify("pässwörd 🔒 ", &digest).unwrap());
}

#[test]
fn test_verify_empty_password() {
    let hasher = hasher();
    let digest = hasher.hash("").unwrap();

    assert!(hasher.verify("", &digest).unwrap());
    assert!(!hasher.verify("x", &digest).unwrap());
}

#[test]
fn test_truncated_digest_does_not_match() {
    let hasher = hasher();
    let digest = hasher.hash("secret").unwrap();

    assert!(!hasher.verify("secret", &digest[..20]).unwrap());
}

#[test]
fn test_empty_digest_is_an_error() {
    assert!(matches!(
        hasher().verify("secret", ""),
        Err(ServiceError::Internal(_))
    ));
}
