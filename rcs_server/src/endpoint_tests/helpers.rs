use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::{
    auth::{ConsentRequestClaims, IdTokenClaims, IntentClaims, IntentIdClaim},
    config::AuthConfig,
};

pub const TEST_CLIENT_ID: &str = "tpp-001";
pub const TEST_USERNAME: &str = "alice";
pub const TEST_REDIRECT_URI: &str = "https://am.example/oauth2/consent/redirect";

/// Signs a `consent_request` JWT the way the authorization server would: addressed to the RCS, with the intent id in
/// the nested Open Banking claim.
pub fn consent_request_jwt(config: &AuthConfig, consent_id: &str) -> String {
    let claims = ConsentRequestClaims {
        iss: config.audience.clone(),
        aud: config.issuer.clone(),
        exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        csrf: Some("csrf-1337".to_string()),
        client_id: TEST_CLIENT_ID.to_string(),
        username: TEST_USERNAME.to_string(),
        scopes: vec!["openid".to_string(), "payments".to_string()],
        consent_approval_redirect_uri: TEST_REDIRECT_URI.to_string(),
        claims: IntentClaims {
            id_token: IdTokenClaims { openbanking_intent_id: IntentIdClaim { value: consent_id.to_string() } },
        },
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.verification_secret.reveal()),
    )
    .unwrap()
}

/// An expired `consent_request`, for the validation failure paths.
pub fn expired_consent_request_jwt(config: &AuthConfig, consent_id: &str) -> String {
    let claims = ConsentRequestClaims {
        iss: config.audience.clone(),
        aud: config.issuer.clone(),
        exp: (Utc::now() - Duration::hours(1)).timestamp(),
        csrf: None,
        client_id: TEST_CLIENT_ID.to_string(),
        username: TEST_USERNAME.to_string(),
        scopes: vec![],
        consent_approval_redirect_uri: TEST_REDIRECT_URI.to_string(),
        claims: IntentClaims {
            id_token: IdTokenClaims { openbanking_intent_id: IntentIdClaim { value: consent_id.to_string() } },
        },
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.verification_secret.reveal()),
    )
    .unwrap()
}
