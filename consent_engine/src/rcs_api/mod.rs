//! # RCS engine public API
//!
//! The `rcs_api` module exposes the programmatic API of the consent engine. The pattern for using the APIs is the
//! same as everywhere else in this workspace: an API instance is created by supplying a backend that implements the
//! traits the API requires.
//!
//! * [`consent_details_api`] builds the presentation DTO a user reviews before deciding on a consent.
//! * [`consent_decision_api`] records the user's authorise/reject decision against the consent store.
//!
//! ```rust,ignore
//! use consent_engine::{ConsentDetailsApi, MemoryBackend};
//! let backend = MemoryBackend::new();
//! // MemoryBackend implements ConsentStore + AccountInformation + ApiClientDirectory
//! let api = ConsentDetailsApi::new(backend);
//! let details = api.details(&request).await?;
//! ```

pub mod consent_decision_api;
pub mod consent_details_api;
pub mod details_objects;
pub mod errors;

use errors::RcsApiError;

use crate::ob_types::{ConsentRecord, ConsentStatus};

/// The access checks shared by the details and decision flows: the requesting client must be the client that created
/// the consent, and the consent must still be waiting for a decision.
pub(crate) fn verify_consent_access(consent: &ConsentRecord, client_id: &str) -> Result<(), RcsApiError> {
    if consent.oauth2_client_id != client_id {
        log::warn!(
            "🔄️⛔️ Client {client_id} requested consent {} which was created by client {}",
            consent.id,
            consent.oauth2_client_id
        );
        return Err(RcsApiError::ClientMismatch(consent.id.clone()));
    }
    if consent.status != ConsentStatus::AwaitingAuthorisation {
        return Err(RcsApiError::ConsentNotAuthorisable { id: consent.id.clone(), status: consent.status });
    }
    Ok(())
}
