use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use consent_engine::{
    ob_types::{ApiClientInfo, ConsentStatus},
    test_utils::{domestic_payment_intent, owned_account, ConsentBuilder},
    ConsentDetailsApi,
};
use log::*;

use super::{
    helpers::{consent_request_jwt, expired_consent_request_jwt, TEST_CLIENT_ID},
    mocks::MockBackend,
};
use crate::{
    auth::ConsentRequestVerifier,
    config::{AuthConfig, ServerOptions},
    routes::ConsentDetailsRoute,
};

fn configure_app(config: AuthConfig, backend: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = ConsentDetailsApi::new(backend);
        let verifier = ConsentRequestVerifier::new(&config);
        cfg.app_data(web::Data::new(api))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::new(ServerOptions { use_x_forwarded_for: false }))
            .service(ConsentDetailsRoute::<MockBackend>::new());
    }
}

async fn post_details(body: String, backend: MockBackend, config: AuthConfig) -> (StatusCode, String) {
    let req = TestRequest::post().uri("/api/rcs/consent/details").set_payload(body).to_request();
    let app = App::new().configure(configure_app(config, backend));
    let app = test::init_service(app).await;
    let (_, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

#[actix_web::test]
async fn details_with_garbage_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_details("made up nonsense".to_string(), MockBackend::new(), AuthConfig::default()).await;
    assert!(body.contains("Consent request JWT is invalid or not provided"), "was: {body}");
    assert_eq!(status.as_u16(), StatusCode::UNAUTHORIZED.as_u16());
}

#[actix_web::test]
async fn details_with_expired_token() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = expired_consent_request_jwt(&config, "PDC_900");
    let (status, body) = post_details(token, MockBackend::new(), config).await;
    assert_eq!(status.as_u16(), StatusCode::UNAUTHORIZED.as_u16(), "was: {body}");
}

#[actix_web::test]
async fn details_for_missing_consent() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = consent_request_jwt(&config, "PDC_901");
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| Ok(None));
    let (status, body) = post_details(token, backend, config).await;
    assert_eq!(status.as_u16(), StatusCode::NOT_FOUND.as_u16());
    assert!(body.contains("PDC_901"), "was: {body}");
}

#[actix_web::test]
async fn details_for_another_clients_consent() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = consent_request_jwt(&config, "PDC_902");
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_consent()
        .returning(|_| Ok(Some(ConsentBuilder::new("PDC_902").client_id("tpp-666").build())));
    let (status, body) = post_details(token, backend, config).await;
    assert_eq!(status.as_u16(), StatusCode::FORBIDDEN.as_u16());
    assert!(body.contains("Insufficient Permissions"), "was: {body}");
}

#[actix_web::test]
async fn details_for_decided_consent() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = consent_request_jwt(&config, "PDC_903");
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_consent()
        .returning(|_| Ok(Some(ConsentBuilder::new("PDC_903").status(ConsentStatus::Rejected).build())));
    let (status, body) = post_details(token, backend, config).await;
    assert_eq!(status.as_u16(), StatusCode::CONFLICT.as_u16());
    assert!(body.contains("Conflicting consent state"), "was: {body}");
}

#[actix_web::test]
async fn details_for_domestic_payment() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = consent_request_jwt(&config, "PDC_904");
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| {
        Ok(Some(ConsentBuilder::new("PDC_904").intent(domestic_payment_intent(None)).build()))
    });
    backend.expect_accounts_for_user().returning(|_| Ok(vec![owned_account("acc-1", "40400412345678")]));
    backend.expect_fetch_api_client().returning(|_| {
        Ok(Some(ApiClientInfo {
            client_id: TEST_CLIENT_ID.to_string(),
            name: "Fresco Finance".to_string(),
            logo_uri: Some("https://fresco.example/logo.png".to_string()),
        }))
    });
    let (status, body) = post_details(token, backend, config).await;
    info!("Response body: {body}");
    assert!(status.is_success(), "was: {body}");
    let details: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(details["consentId"], "PDC_904");
    assert_eq!(details["intentType"], "DomesticPayment");
    assert_eq!(details["username"], "alice");
    assert_eq!(details["clientName"], "Fresco Finance");
    assert_eq!(details["debtorLocked"], false);
    assert_eq!(details["accounts"][0]["accountId"], "acc-1");
    assert_eq!(details["product"]["type"], "DomesticPayment");
    assert_eq!(details["product"]["instructedAmount"]["Amount"], "165.88");
    assert_eq!(details["product"]["instructedAmount"]["Currency"], "GBP");
    assert_eq!(details["product"]["paymentReference"], "FRESCO-101");
}

#[actix_web::test]
async fn details_locks_to_the_specified_debtor() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let token = consent_request_jwt(&config, "PDC_905");
    let mut backend = MockBackend::new();
    backend.expect_fetch_consent().returning(|_| {
        Ok(Some(ConsentBuilder::new("PDC_905").intent(domestic_payment_intent(Some("40400412345678"))).build()))
    });
    backend.expect_accounts_for_user().returning(|_| {
        Ok(vec![owned_account("acc-1", "40400412345678"), owned_account("acc-2", "40400487654321")])
    });
    backend.expect_fetch_api_client().returning(|_| Ok(None));
    let (status, body) = post_details(token, backend, config).await;
    assert!(status.is_success(), "was: {body}");
    let details: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(details["debtorLocked"], true);
    assert_eq!(details["accounts"].as_array().unwrap().len(), 1);
    // No directory entry for the client, so the raw id is displayed
    assert_eq!(details["clientName"], TEST_CLIENT_ID);
}
