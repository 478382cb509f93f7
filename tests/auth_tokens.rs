use axum_mailorder_api::{
    dto::auth::{Claims, VerifyClaims},
    services::auth_service,
};
use uuid::Uuid;

#[test]
fn token_roundtrip_preserves_identity() {
    let claims = Claims {
        id: Uuid::new_v4(),
        email: "musteri@example.com".into(),
    };

    let token = auth_service::encode_token(&claims, "test-secret").expect("encode");
    let decoded = auth_service::decode_token(&token, "test-secret").expect("decode");

    assert_eq!(decoded.id, claims.id);
    assert_eq!(decoded.email, claims.email);
}

#[test]
fn token_with_wrong_secret_is_rejected() {
    let claims = Claims {
        id: Uuid::new_v4(),
        email: "musteri@example.com".into(),
    };

    let token = auth_service::encode_token(&claims, "test-secret").expect("encode");
    assert!(auth_service::decode_token(&token, "other-secret").is_err());
    assert!(auth_service::decode_token("not-a-token", "test-secret").is_err());
}

#[test]
fn verification_token_roundtrip() {
    let claims = VerifyClaims {
        id: Uuid::new_v4(),
        username: "Çağrı".into(),
    };

    let token = auth_service::encode_verify_token(&claims, "test-secret").expect("encode");
    let decoded = auth_service::decode_verify_token(&token, "test-secret").expect("decode");

    assert_eq!(decoded.id, claims.id);
    assert_eq!(decoded.username, claims.username);
}

#[test]
fn password_hash_verifies_only_with_original_password() {
    let digest = auth_service::hash_password("gizli-sifre").expect("hash");

    assert!(auth_service::verify_password("gizli-sifre", &digest));
    assert!(!auth_service::verify_password("yanlis-sifre", &digest));
    assert!(!auth_service::verify_password("gizli-sifre", "not-a-hash"));
}
