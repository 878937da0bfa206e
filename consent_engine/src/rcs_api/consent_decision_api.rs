use std::fmt::Debug;

use log::*;

use super::{
    details_objects::{DecisionOutcome, DecisionRequest},
    errors::RcsApiError,
    verify_consent_access,
};
use crate::{
    ob_types::{ConsentDecision, ConsentStatus, DecisionUpdate, IntentType, UserAccount},
    traits::{AccountInformation, ConsentStore},
};

/// `ConsentDecisionApi` orchestrates the write side of the consent flow: it re-runs the access checks, validates the
/// user's account selection against their owned accounts, and records the decision in the consent store.
pub struct ConsentDecisionApi<B> {
    db: B,
}

impl<B> Debug for ConsentDecisionApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConsentDecisionApi")
    }
}

impl<B> ConsentDecisionApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ConsentDecisionApi<B>
where B: ConsentStore + AccountInformation
{
    pub async fn decide(&self, request: &DecisionRequest) -> Result<DecisionOutcome, RcsApiError> {
        let consent = self
            .db
            .fetch_consent(&request.consent_id)
            .await?
            .ok_or_else(|| RcsApiError::ConsentNotFound(request.consent_id.clone()))?;
        verify_consent_access(&consent, &request.client_id)?;
        match request.decision {
            ConsentDecision::Rejected => {
                let update = DecisionUpdate {
                    status: ConsentStatus::Rejected,
                    resource_owner: None,
                    authorised_accounts: vec![],
                };
                self.db.update_consent_decision(&consent.id, update).await?;
                info!("🔄️🚫️ Consent {} was rejected by {}", consent.id, request.username);
                Ok(DecisionOutcome { decision: ConsentDecision::Rejected, consent_id: consent.id, account_ids: vec![] })
            },
            ConsentDecision::Authorised => {
                let intent_type = consent.id.intent_type()?;
                let owned = self.db.accounts_for_user(&request.username).await?;
                validate_account_selection(intent_type, &request.account_ids, &owned)?;
                let update = DecisionUpdate {
                    status: ConsentStatus::Authorised,
                    resource_owner: Some(request.username.clone()),
                    authorised_accounts: request.account_ids.clone(),
                };
                self.db.update_consent_decision(&consent.id, update).await?;
                info!(
                    "🔄️✅️ Consent {} was authorised by {} over {} account(s)",
                    consent.id,
                    request.username,
                    request.account_ids.len()
                );
                Ok(DecisionOutcome {
                    decision: ConsentDecision::Authorised,
                    consent_id: consent.id,
                    account_ids: request.account_ids.clone(),
                })
            },
        }
    }
}

/// An authorisation must name accounts the user actually holds, and the right number of them for the product: one
/// for anything that debits or confirms funds on an account, one or more for account access.
fn validate_account_selection(
    intent_type: IntentType,
    account_ids: &[String],
    owned: &[UserAccount],
) -> Result<(), RcsApiError> {
    if account_ids.is_empty() {
        return Err(RcsApiError::InvalidAccountSelection("no accounts were selected".to_string()));
    }
    if intent_type.single_account_selection() && account_ids.len() != 1 {
        return Err(RcsApiError::InvalidAccountSelection(format!(
            "{intent_type} consents are authorised against exactly one account, got {}",
            account_ids.len()
        )));
    }
    for id in account_ids {
        if !owned.iter().any(|account| &account.account_id == id) {
            warn!("🔄️⛔️ Account {id} in the decision payload is not held by the user");
            return Err(RcsApiError::InvalidAccountSelection(format!("account {id} is not held by the user")));
        }
    }
    Ok(())
}
