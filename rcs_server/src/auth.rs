//! JWT plumbing for the consent flow.
//!
//! Two tokens cross this service. The authorization server hands the user agent a signed `consent_request` JWT that
//! names the consent under decision, the requesting client and the user; [`ConsentRequestVerifier`] validates it.
//! Once the user decides, [`TokenIssuer`] signs the `consent_response` JWT the user agent carries back to the
//! authorization server.

use chrono::Utc;
use consent_engine::{
    ob_types::{ConsentDecision, ConsentId},
    DecisionOutcome,
    DetailsRequest,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{config::AuthConfig, errors::AuthError};

//--------------------------------------  ConsentRequestClaims  --------------------------------------------------------

/// The claims of a `consent_request` JWT, per the UK Open Banking profile: the intent id rides in the nested
/// `claims.id_token.openbanking_intent_id.value` structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRequestClaims {
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf: Option<String>,
    pub client_id: String,
    pub username: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub consent_approval_redirect_uri: String,
    pub claims: IntentClaims,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentClaims {
    pub id_token: IdTokenClaims,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub openbanking_intent_id: IntentIdClaim,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentIdClaim {
    pub value: String,
}

impl ConsentRequestClaims {
    pub fn consent_id(&self) -> ConsentId {
        ConsentId(self.claims.id_token.openbanking_intent_id.value.clone())
    }

    pub fn details_request(&self) -> DetailsRequest {
        DetailsRequest {
            consent_id: self.consent_id(),
            client_id: self.client_id.clone(),
            username: self.username.clone(),
        }
    }

    pub fn decision_request(
        &self,
        decision: ConsentDecision,
        account_ids: Vec<String>,
    ) -> consent_engine::DecisionRequest {
        consent_engine::DecisionRequest {
            consent_id: self.consent_id(),
            client_id: self.client_id.clone(),
            username: self.username.clone(),
            decision,
            account_ids,
        }
    }
}

//-------------------------------------- ConsentRequestVerifier --------------------------------------------------------

pub struct ConsentRequestVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl ConsentRequestVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.verification_secret.reveal());
        let mut validation = Validation::new(Algorithm::HS256);
        // The request must be addressed to this RCS, by the authorization server we trust.
        validation.set_audience(&[&config.issuer]);
        validation.set_issuer(&[&config.audience]);
        Self { key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<ConsentRequestClaims, AuthError> {
        let data = decode::<ConsentRequestClaims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidConsentRequest(e.to_string()))?;
        debug!("Consent request validated for intent {}", data.claims.consent_id());
        Ok(data.claims)
    }
}

//-------------------------------------- ConsentResponseClaims --------------------------------------------------------

/// The claims the RCS signs back to the authorization server once the user has decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentResponseClaims {
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf: Option<String>,
    /// `Allow` or `Deny`.
    pub decision: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub consent_id: String,
    #[serde(default)]
    pub account_ids: Vec<String>,
}

pub const DECISION_ALLOW: &str = "Allow";
pub const DECISION_DENY: &str = "Deny";

//--------------------------------------      TokenIssuer      --------------------------------------------------------

pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    audience: String,
    response_ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.signing_secret.reveal()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            response_ttl: config.response_ttl,
        }
    }

    /// Signs the `consent_response` JWT for a recorded decision. The CSRF token and scopes of the originating request
    /// are echoed back so the authorization server can correlate the response.
    pub fn issue_response_jwt(
        &self,
        request: &ConsentRequestClaims,
        outcome: &DecisionOutcome,
    ) -> Result<String, AuthError> {
        let decision = match outcome.decision {
            ConsentDecision::Authorised => DECISION_ALLOW,
            ConsentDecision::Rejected => DECISION_DENY,
        };
        let claims = ConsentResponseClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (Utc::now() + self.response_ttl).timestamp(),
            csrf: request.csrf.clone(),
            decision: decision.to_string(),
            scopes: request.scopes.clone(),
            consent_id: outcome.consent_id.to_string(),
            account_ids: outcome.account_ids.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }
}
