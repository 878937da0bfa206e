//! Consent Engine
//!
//! The consent engine holds the core logic of the remote consent service, independent of any HTTP framework. It is
//! divided into three main sections:
//! 1. The intent decoders ([`mod@decoders`]). Every consent carries the TPP's `OBIntentObject` JSON payload
//!    verbatim; the decoders turn that loosely typed document into the strongly typed details shown to the user,
//!    one decoder per payment product, selected through a registry keyed on the consent id prefix.
//! 2. The backend trait seams ([`mod@traits`]). The consent store, the account information service and the TPP
//!    directory are external collaborators; backends implement these traits to plug into the engine. An in-memory
//!    backend is provided for tests and standalone deployments.
//! 3. The engine public API ([`mod@rcs_api`]). [`ConsentDetailsApi`] assembles the presentation DTO for the consent
//!    UI and [`ConsentDecisionApi`] records the user's decision. Both are generic over the backend traits.

pub mod decoders;
mod memory;
pub mod ob_types;
mod rcs_api;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use memory::{MemoryBackend, SeedData, SeedError};
pub use rcs_api::{
    consent_decision_api::ConsentDecisionApi,
    consent_details_api::ConsentDetailsApi,
    details_objects::{ConsentDetails, DecisionOutcome, DecisionRequest, DetailsRequest},
    errors::RcsApiError,
};
