use thiserror::Error;

use crate::ob_types::{ConsentId, ConsentRecord, ConsentStatus, DecisionUpdate};

#[derive(Debug, Clone, Error)]
pub enum ConsentStoreError {
    #[error("Consent store error: {0}")]
    StorageError(String),
    #[error("Consent {id} is in state {status} and cannot be updated")]
    StateConflict { id: ConsentId, status: ConsentStatus },
}

/// The `ConsentStore` trait defines the behaviour the engine needs from the system of record for consents: fetching a
/// stored consent by id, and applying the one state transition the RCS owns — recording the user's decision.
#[allow(async_fn_in_trait)]
pub trait ConsentStore {
    /// Fetches the consent with the given id. If no consent exists, `None` is returned.
    async fn fetch_consent(&self, id: &ConsentId) -> Result<Option<ConsentRecord>, ConsentStoreError>;

    /// Applies the user's decision to a stored consent and returns the updated record.
    ///
    /// Only a consent in `AwaitingAuthorisation` can be decided; anything else is a
    /// [`ConsentStoreError::StateConflict`].
    async fn update_consent_decision(
        &self,
        id: &ConsentId,
        update: DecisionUpdate,
    ) -> Result<ConsentRecord, ConsentStoreError>;
}
