use thiserror::Error;

use crate::ob_types::ApiClientInfo;

#[derive(Debug, Clone, Error)]
pub enum ApiClientError {
    #[error("API client directory error: {0}")]
    BackendError(String),
}

/// Resolves a TPP's OAuth2 client id to its registered display information (trading name, logo).
#[allow(async_fn_in_trait)]
pub trait ApiClientDirectory {
    /// Fetches the client's registration record. `None` when the client id is not known to the directory.
    async fn fetch_api_client(&self, client_id: &str) -> Result<Option<ApiClientInfo>, ApiClientError>;
}
