use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use consent_engine::{ConsentDecisionApi, ConsentDetailsApi, MemoryBackend};
use log::info;

use crate::{
    auth::{ConsentRequestVerifier, TokenIssuer},
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    routes::{health, ConsentDecisionRoute, ConsentDetailsRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let backend = match &config.seed_data {
        Some(path) => MemoryBackend::from_seed_file(path).map_err(|e| ServerError::InitializeError(e.to_string()))?,
        None => MemoryBackend::new(),
    };
    let srv = create_server_instance(config, backend)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, backend: MemoryBackend) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let details_api = ConsentDetailsApi::new(backend.clone());
        let decision_api = ConsentDecisionApi::new(backend.clone());
        let verifier = ConsentRequestVerifier::new(&config.auth);
        let jwt_signer = TokenIssuer::new(&config.auth);
        let options = ServerOptions::from_config(&config);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("rcs::access_log"))
            .app_data(web::Data::new(details_api))
            .app_data(web::Data::new(decision_api))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(options))
            .service(health)
            .service(ConsentDetailsRoute::<MemoryBackend>::new())
            .service(ConsentDecisionRoute::<MemoryBackend>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    info!("🚀️ Remote consent service listening on {host}:{port}");
    Ok(srv)
}
