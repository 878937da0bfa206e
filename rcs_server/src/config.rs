use std::{env, io::Write, path::PathBuf};

use chrono::Duration;
use log::*;
use rand::RngCore;
use rcs_common::Secret;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::errors::ServerError;

const DEFAULT_RCS_HOST: &str = "127.0.0.1";
const DEFAULT_RCS_PORT: u16 = 8080;
const DEFAULT_RESPONSE_JWT_TTL: Duration = Duration::seconds(300);
/// The `iss` claim the RCS signs into consent responses, and the `aud` it expects on consent requests.
const DEFAULT_RCS_ISSUER: &str = "secure-open-banking-rcs";
/// The authorization server the RCS talks to: the `iss` it expects on consent requests and the `aud` it addresses
/// consent responses to.
const DEFAULT_RCS_AUDIENCE: &str = "secure-open-banking-am";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// Optional path to a JSON seed file for the in-memory backend (consents, accounts, API clients).
    pub seed_data: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RCS_HOST.to_string(),
            port: DEFAULT_RCS_PORT,
            auth: AuthConfig::default(),
            use_x_forwarded_for: false,
            seed_data: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("RCS_HOST").ok().unwrap_or_else(|| DEFAULT_RCS_HOST.into());
        let port = env::var("RCS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for RCS_PORT. {e} Using the default, {DEFAULT_RCS_PORT}, instead."
                    );
                    DEFAULT_RCS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_RCS_PORT);
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let use_x_forwarded_for =
            env::var("RCS_USE_X_FORWARDED_FOR").map(|s| &s == "1" || &s == "true").unwrap_or(false);
        let seed_data = env::var("RCS_SEED_DATA").ok().map(PathBuf::from);
        if seed_data.is_none() {
            info!("🪛️ RCS_SEED_DATA is not set. The in-memory backend will start empty.");
        }
        Self { host, port, auth, use_x_forwarded_for, seed_data }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HMAC secret used to sign `consent_response` JWTs. Hex-encoded in RCS_JWT_SIGNING_SECRET.
    pub signing_secret: Secret<Vec<u8>>,
    /// The HMAC secret used to verify incoming `consent_request` JWTs. Hex-encoded in RCS_JWT_VERIFICATION_SECRET.
    pub verification_secret: Secret<Vec<u8>>,
    /// The RCS's own name: the `iss` on everything it signs, and the `aud` it requires on consent requests.
    pub issuer: String,
    /// The authorization server's name: the `iss` it requires on consent requests, and the `aud` on responses.
    pub audience: String,
    /// How long a signed `consent_response` stays valid.
    pub response_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut tmpfile = NamedTempFile::new().ok().and_then(|f| f.keep().ok());
        warn!(
            "🚨️🚨️🚨️ The JWT secrets have not been set. I'm using random values for this session. DO NOT operate on \
             production like this, since the authorization server will not accept anything this instance signs. 🚨️🚨️🚨️"
        );
        let mut rng = rand::thread_rng();
        let mut signing = vec![0u8; 32];
        rng.fill_bytes(&mut signing);
        let mut verification = vec![0u8; 32];
        rng.fill_bytes(&mut verification);
        match &mut tmpfile {
            Some((f, p)) => {
                let key_data = json!({
                    "rcs_jwt_signing_secret": hex::encode(&signing),
                    "rcs_jwt_verification_secret": hex::encode(&verification),
                })
                .to_string();
                match writeln!(f, "{key_data}") {
                    Ok(()) => warn!(
                        "🚨️🚨️🚨️ The JWT secrets for this session were written to {}. If this is a production \
                         instance, you are doing it wrong! Set the RCS_JWT_SIGNING_SECRET and \
                         RCS_JWT_VERIFICATION_SECRET environment variables instead. 🚨️🚨️🚨️",
                        p.to_str().unwrap_or("???")
                    ),
                    Err(e) => warn!("🪛️ Could not write the JWT secrets to the temporary file. {e}"),
                }
            },
            None => {
                warn!("🪛️ Could not create a temporary file to store the JWT secrets.");
            },
        }
        Self {
            signing_secret: Secret::new(signing),
            verification_secret: Secret::new(verification),
            issuer: DEFAULT_RCS_ISSUER.to_string(),
            audience: DEFAULT_RCS_AUDIENCE.to_string(),
            response_ttl: DEFAULT_RESPONSE_JWT_TTL,
        }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let signing_hex = env::var("RCS_JWT_SIGNING_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [RCS_JWT_SIGNING_SECRET]")))?;
        let verification_hex = env::var("RCS_JWT_VERIFICATION_SECRET")
            .map_err(|e| ServerError::ConfigurationError(format!("{e} [RCS_JWT_VERIFICATION_SECRET]")))?;
        let signing_secret = hex::decode(&signing_hex).map_err(|e| {
            ServerError::ConfigurationError(format!("Invalid hex secret in RCS_JWT_SIGNING_SECRET: {e}"))
        })?;
        let verification_secret = hex::decode(&verification_hex).map_err(|e| {
            ServerError::ConfigurationError(format!("Invalid hex secret in RCS_JWT_VERIFICATION_SECRET: {e}"))
        })?;
        if signing_secret.is_empty() || verification_secret.is_empty() {
            return Err(ServerError::ConfigurationError("The JWT secrets must not be empty.".to_string()));
        }
        let issuer = env::var("RCS_JWT_ISSUER").ok().unwrap_or_else(|| DEFAULT_RCS_ISSUER.to_string());
        let audience = env::var("RCS_JWT_AUDIENCE").ok().unwrap_or_else(|| DEFAULT_RCS_AUDIENCE.to_string());
        let response_ttl = env::var("RCS_RESPONSE_JWT_TTL_SECS")
            .map_err(|_| {
                info!(
                    "🪛️ RCS_RESPONSE_JWT_TTL_SECS is not set. Using the default value of {} s.",
                    DEFAULT_RESPONSE_JWT_TTL.num_seconds()
                )
            })
            .and_then(|s| {
                s.parse::<i64>()
                    .map(Duration::seconds)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for RCS_RESPONSE_JWT_TTL_SECS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_RESPONSE_JWT_TTL);
        Ok(Self {
            signing_secret: Secret::new(signing_secret),
            verification_secret: Secret::new(verification_secret),
            issuer,
            audience,
            response_ttl,
        })
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------

/// A subset of the server configuration that handlers need at request time. Generally we try to keep this as small as
/// possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for }
    }
}
