use thiserror::Error;

use crate::ob_types::UserAccount;

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Account service error: {0}")]
    BackendError(String),
}

/// Provides the accounts the resource owner holds with the bank. The engine uses these to match a TPP-specified
/// debtor account and to build the account-selection list shown on the consent UI.
#[allow(async_fn_in_trait)]
pub trait AccountInformation {
    async fn accounts_for_user(&self, username: &str) -> Result<Vec<UserAccount>, AccountApiError>;
}
