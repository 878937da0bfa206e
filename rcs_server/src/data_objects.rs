use consent_engine::ob_types::ConsentDecision;
use serde::{Deserialize, Serialize};

/// The body of a decision submission from the consent UI. The original `consent_request` JWT rides along so the
/// decision is made in exactly the context the authorization server established.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequestBody {
    pub consent_request: String,
    pub decision: ConsentDecision,
    #[serde(default)]
    pub account_ids: Vec<String>,
}

/// Where the user agent goes next, and the signed evidence it carries there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectAction {
    pub redirect_uri: String,
    pub consent_response: String,
}
