use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use consent_engine::{traits::ConsentStoreError, RcsApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("The consent payload cannot be presented. {0}")]
    UnpresentableConsent(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Insufficient Permissions. {0}")]
    InsufficientPermissions(String),
    #[error("Conflicting consent state. {0}")]
    ConsentConflict(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::UnpresentableConsent(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::InvalidConsentRequest(_) => StatusCode::UNAUTHORIZED,
                AuthError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            Self::ConsentConflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Consent request JWT is invalid or not provided. {0}")]
    InvalidConsentRequest(String),
    #[error("Could not sign the consent response. {0}")]
    SigningError(String),
}

impl From<RcsApiError> for ServerError {
    fn from(e: RcsApiError) -> Self {
        match e {
            RcsApiError::ConsentNotFound(_) => Self::NoRecordFound(e.to_string()),
            RcsApiError::ClientMismatch(_) => Self::InsufficientPermissions(e.to_string()),
            RcsApiError::ConsentNotAuthorisable { .. } => Self::ConsentConflict(e.to_string()),
            RcsApiError::DebtorAccountNotFound(_) => Self::UnpresentableConsent(e.to_string()),
            RcsApiError::InvalidAccountSelection(_) => Self::InvalidRequestBody(e.to_string()),
            RcsApiError::DecodeError(_) => Self::UnpresentableConsent(e.to_string()),
            RcsApiError::StoreError(ConsentStoreError::StateConflict { .. }) => Self::ConsentConflict(e.to_string()),
            RcsApiError::StoreError(_) => Self::BackendError(e.to_string()),
            RcsApiError::AccountError(_) => Self::BackendError(e.to_string()),
            RcsApiError::ApiClientError(_) => Self::BackendError(e.to_string()),
        }
    }
}
