use serde::{Deserialize, Serialize};

use crate::{
    decoders::ProductDetails,
    ob_types::{ConsentDecision, ConsentId, IntentType, UserAccount},
};

/// The context extracted from a validated `consent_request` JWT: which consent is under decision, which client asked
/// for it, and which user is deciding.
#[derive(Debug, Clone)]
pub struct DetailsRequest {
    pub consent_id: ConsentId,
    pub client_id: String,
    pub username: String,
}

/// Everything the consent UI needs to present a consent to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDetails {
    pub consent_id: ConsentId,
    pub intent_type: IntentType,
    pub username: String,
    /// The TPP's registered trading name, or its raw client id when the directory does not know it.
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_logo_uri: Option<String>,
    /// The accounts the user may select for this consent. When the intent named a debtor account, this is exactly
    /// the matching owned account.
    pub accounts: Vec<UserAccount>,
    /// True when the TPP pre-specified the debtor account, so the UI must not offer a choice.
    pub debtor_locked: bool,
    pub product: ProductDetails,
}

/// A user's decision on a consent, as submitted from the consent UI together with the validated JWT context.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub consent_id: ConsentId,
    pub client_id: String,
    pub username: String,
    pub decision: ConsentDecision,
    pub account_ids: Vec<String>,
}

/// The recorded result of a decision, handed back to the server layer for signing into the response JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub decision: ConsentDecision,
    pub consent_id: ConsentId,
    pub account_ids: Vec<String>,
}
