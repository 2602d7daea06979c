//! Session-token lifecycle tests through the public API.

use marigold_api::services::auth::{
    SESSION_TTL_SECONDS, decode_session_token, issue_session_token, session_cookie,
};
use marigold_core::{Email, Role, UserId};

use marigold_integration_tests::test_jwt_secret;

fn admin() -> marigold_api::models::user::User {
    marigold_api::models::user::User {
        id: UserId::generate(),
        email: Email::parse("admin@example.com").expect("valid email"),
        password_hash: String::new(),
        role: Role::Admin,
    }
}

#[test]
fn token_decodes_to_same_subject_and_role() {
    let secret = test_jwt_secret();
    let user = admin();

    let token = issue_session_token(&secret, &user).expect("signing");
    let claims = decode_session_token(&secret, &token).expect("decoding");

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, "admin");
}

#[test]
fn token_expiry_is_exactly_24_hours_after_issuance() {
    let secret = test_jwt_secret();
    let token = issue_session_token(&secret, &admin()).expect("signing");
    let claims = decode_session_token(&secret, &token).expect("decoding");

    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECONDS);
    assert_eq!(SESSION_TTL_SECONDS, 24 * 60 * 60);
}

#[test]
fn token_is_tamper_evident() {
    let secret = test_jwt_secret();
    let token = issue_session_token(&secret, &admin()).expect("signing");

    // Flip a character in the payload section
    let tampered = token.replacen('a', "b", 1);
    if tampered != token {
        assert!(decode_session_token(&secret, &tampered).is_err());
    }

    // Signed under a different secret
    let other = secrecy::SecretString::from("p4!xT7@qW1#eY6$uI9^oS2&aD5*fH8(l");
    assert!(decode_session_token(&other, &token).is_err());
}

#[test]
fn cookie_carries_the_admin_session_attributes() {
    let rendered = session_cookie("tok".to_owned(), true).to_string();

    assert!(rendered.starts_with("admin_jwt=tok"));
    assert!(rendered.contains("HttpOnly"));
    assert!(rendered.contains("SameSite=Strict"));
    assert!(rendered.contains("Path=/"));
    assert!(rendered.contains("Secure"));
    assert!(rendered.contains(&format!("Max-Age={SESSION_TTL_SECONDS}")));
}

#[test]
fn cookie_secure_attribute_tracks_environment() {
    let dev = session_cookie("tok".to_owned(), false).to_string();
    assert!(!dev.contains("Secure"));

    let prod = session_cookie("tok".to_owned(), true).to_string();
    assert!(prod.contains("Secure"));
}
