//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Both consent handlers are asynchronous and never block the worker thread: the only I/O they perform is awaiting
//! the backend trait calls.

use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use consent_engine::{
    traits::{AccountInformation, ApiClientDirectory, ConsentStore},
    ConsentDecisionApi,
    ConsentDetailsApi,
};
use log::*;

use crate::{
    auth::{ConsentRequestVerifier, TokenIssuer},
    config::ServerOptions,
    data_objects::{DecisionRequestBody, RedirectAction},
    errors::ServerError,
    helpers::get_remote_ip,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>); }
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Details  ----------------------------------------------------
route!(consent_details => Post "/api/rcs/consent/details" impl ConsentStore, AccountInformation, ApiClientDirectory);
/// Route handler for the consent details endpoint
///
/// The request body is the raw `consent_request` JWT the authorization server handed to the user agent. The handler
/// validates its signature and claims, resolves the stored consent it names, and returns the presentation DTO for
/// the consent UI.
pub async fn consent_details<B>(
    req: HttpRequest,
    body: web::Bytes,
    verifier: web::Data<ConsentRequestVerifier>,
    api: web::Data<ConsentDetailsApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError>
where
    B: ConsentStore + AccountInformation + ApiClientDirectory + 'static,
{
    let peer = get_remote_ip(&req, options.use_x_forwarded_for);
    trace!("💻️ Received consent details request from {peer:?}");
    let token = std::str::from_utf8(&body).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    let claims = verifier.verify(token.trim())?;
    let request = claims.details_request();
    debug!("💻️ Consent details requested for {} by client {}", request.consent_id, request.client_id);
    let details = api.details(&request).await?;
    Ok(HttpResponse::Ok().json(details))
}

//----------------------------------------------   Decision  ----------------------------------------------------
route!(consent_decision => Post "/api/rcs/consent/decision" impl ConsentStore, AccountInformation);
/// Route handler for the consent decision endpoint
///
/// The body carries the original `consent_request` JWT plus the user's decision and selected account ids. On
/// success, the response names the redirect URI from the request and the freshly signed `consent_response` JWT.
pub async fn consent_decision<B>(
    body: web::Json<DecisionRequestBody>,
    verifier: web::Data<ConsentRequestVerifier>,
    api: web::Data<ConsentDecisionApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError>
where
    B: ConsentStore + AccountInformation + 'static,
{
    let body = body.into_inner();
    let claims = verifier.verify(body.consent_request.trim())?;
    let request = claims.decision_request(body.decision, body.account_ids);
    debug!("💻️ Consent decision ({}) submitted for {} by {}", request.decision, request.consent_id, request.username);
    let outcome = api.decide(&request).await?;
    let consent_response = signer.issue_response_jwt(&claims, &outcome)?;
    info!("💻️ Consent {} decision recorded: {}", outcome.consent_id, outcome.decision);
    let action =
        RedirectAction { redirect_uri: claims.consent_approval_redirect_uri.clone(), consent_response };
    Ok(HttpResponse::Ok().json(action))
}
