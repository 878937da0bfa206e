use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use consent_engine::{
    ob_types::{ConsentDecision, ConsentStatus},
    test_utils::{owned_account, ConsentBuilder},
    ConsentDecisionApi,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::*;

use super::{
    helpers::{consent_request_jwt, TEST_REDIRECT_URI},
    mocks::MockBackend,
};
use crate::{
    auth::{ConsentRequestVerifier, ConsentResponseClaims, TokenIssuer},
    config::AuthConfig,
    data_objects::{DecisionRequestBody, RedirectAction},
    routes::ConsentDecisionRoute,
};

fn configure_app(config: AuthConfig, backend: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = ConsentDecisionApi::new(backend);
        let verifier = ConsentRequestVerifier::new(&config);
        let signer = TokenIssuer::new(&config);
        cfg.app_data(web::Data::new(api))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::new(signer))
            .service(ConsentDecisionRoute::<MockBackend>::new());
    }
}

async fn post_decision(body: &DecisionRequestBody, backend: MockBackend, config: AuthConfig) -> (StatusCode, String) {
    let req = TestRequest::post().uri("/api/rcs/consent/decision").set_json(body).to_request();
    let app = App::new().configure(configure_app(config, backend));
    let app = test::init_service(app).await;
    let (_, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

fn validate_response_jwt(token: &str, config: &AuthConfig) -> ConsentResponseClaims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[&config.audience]);
    validation.set_issuer(&[&config.issuer]);
    decode::<ConsentResponseClaims>(token, &DecodingKey::from_secret(config.signing_secret.reveal()), &validation)
        .unwrap()
        .claims
}

#[actix_web::test]
async fn authorising_issues_an_allow_token() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| Ok(Some(ConsentBuilder::new("PDC_800").build())));
    backend.expect_accounts_for_user().returning(|_| Ok(vec![owned_account("acc-1", "40400412345678")]));
    backend
        .expect_update_consent_decision()
        .withf(|_, update| {
            update.status == ConsentStatus::Authorised
                && update.resource_owner.as_deref() == Some("alice")
                && update.authorised_accounts == vec!["acc-1".to_string()]
        })
        .returning(|_, update| {
            let mut consent = ConsentBuilder::new("PDC_800").build();
            consent.status = update.status;
            consent.resource_owner = update.resource_owner;
            consent.authorised_accounts = update.authorised_accounts;
            Ok(consent)
        });
    let body = DecisionRequestBody {
        consent_request: consent_request_jwt(&config, "PDC_800"),
        decision: ConsentDecision::Authorised,
        account_ids: vec!["acc-1".to_string()],
    };
    let (status, body) = post_decision(&body, backend, config.clone()).await;
    info!("Response body: {body}");
    assert!(status.is_success(), "was: {body}");
    let action: RedirectAction = serde_json::from_str(&body).unwrap();
    assert_eq!(action.redirect_uri, TEST_REDIRECT_URI);
    let claims = validate_response_jwt(&action.consent_response, &config);
    assert_eq!(claims.decision, "Allow");
    assert_eq!(claims.consent_id, "PDC_800");
    assert_eq!(claims.account_ids, vec!["acc-1"]);
    assert_eq!(claims.csrf.as_deref(), Some("csrf-1337"));
    assert_eq!(claims.scopes, vec!["openid", "payments"]);
}

#[actix_web::test]
async fn rejecting_issues_a_deny_token() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| Ok(Some(ConsentBuilder::new("PDC_801").build())));
    backend
        .expect_update_consent_decision()
        .withf(|_, update| update.status == ConsentStatus::Rejected && update.authorised_accounts.is_empty())
        .returning(|_, update| {
            let mut consent = ConsentBuilder::new("PDC_801").build();
            consent.status = update.status;
            Ok(consent)
        });
    let body = DecisionRequestBody {
        consent_request: consent_request_jwt(&config, "PDC_801"),
        decision: ConsentDecision::Rejected,
        account_ids: vec![],
    };
    let (status, body) = post_decision(&body, backend, config.clone()).await;
    assert!(status.is_success(), "was: {body}");
    let action: RedirectAction = serde_json::from_str(&body).unwrap();
    let claims = validate_response_jwt(&action.consent_response, &config);
    assert_eq!(claims.decision, "Deny");
    assert!(claims.account_ids.is_empty());
}

#[actix_web::test]
async fn decision_with_garbage_token() {
    let _ = env_logger::try_init().ok();
    let body = DecisionRequestBody {
        consent_request: "made up nonsense".to_string(),
        decision: ConsentDecision::Rejected,
        account_ids: vec![],
    };
    let (status, body) = post_decision(&body, MockBackend::new(), AuthConfig::default()).await;
    assert_eq!(status.as_u16(), StatusCode::UNAUTHORIZED.as_u16());
    assert!(body.contains("Consent request JWT is invalid or not provided"), "was: {body}");
}

#[actix_web::test]
async fn decided_consents_conflict() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_consent()
        .returning(|_| Ok(Some(ConsentBuilder::new("PDC_802").status(ConsentStatus::Authorised).build())));
    let body = DecisionRequestBody {
        consent_request: consent_request_jwt(&config, "PDC_802"),
        decision: ConsentDecision::Authorised,
        account_ids: vec!["acc-1".to_string()],
    };
    let (status, body) = post_decision(&body, backend, config).await;
    assert_eq!(status.as_u16(), StatusCode::CONFLICT.as_u16(), "was: {body}");
}

#[actix_web::test]
async fn unowned_accounts_are_rejected() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| Ok(Some(ConsentBuilder::new("PDC_803").build())));
    backend.expect_accounts_for_user().returning(|_| Ok(vec![]));
    let body = DecisionRequestBody {
        consent_request: consent_request_jwt(&config, "PDC_803"),
        decision: ConsentDecision::Authorised,
        account_ids: vec!["acc-1".to_string()],
    };
    let (status, body) = post_decision(&body, backend, config).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert!(body.contains("Invalid account selection"), "was: {body}");
}
