use thiserror::Error;

use crate::{
    decoders::DecodeError,
    ob_types::{ConsentId, ConsentStatus},
    traits::{AccountApiError, ApiClientError, ConsentStoreError},
};

#[derive(Debug, Clone, Error)]
pub enum RcsApiError {
    #[error("Consent {0} was not found")]
    ConsentNotFound(ConsentId),
    #[error("The requesting client did not create consent {0}")]
    ClientMismatch(ConsentId),
    #[error("Consent {id} is in state {status} and cannot be decided")]
    ConsentNotAuthorisable { id: ConsentId, status: ConsentStatus },
    #[error("The debtor account on consent {0} does not belong to the user")]
    DebtorAccountNotFound(ConsentId),
    #[error("Invalid account selection: {0}")]
    InvalidAccountSelection(String),
    #[error("Could not decode the intent payload. {0}")]
    DecodeError(#[from] DecodeError),
    #[error("Consent store error: {0}")]
    StoreError(#[from] ConsentStoreError),
    #[error("Account service error: {0}")]
    AccountError(#[from] AccountApiError),
    #[error("API client directory error: {0}")]
    ApiClientError(#[from] ApiClientError),
}
