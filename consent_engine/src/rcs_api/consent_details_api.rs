use std::fmt::Debug;

use log::*;

use super::{
    details_objects::{ConsentDetails, DetailsRequest},
    errors::RcsApiError,
    verify_consent_access,
};
use crate::{
    decoders::DecoderRegistry,
    ob_types::{AccountIdentification, ConsentId, UserAccount},
    traits::{AccountInformation, ApiClientDirectory, ConsentStore},
};

/// `ConsentDetailsApi` orchestrates the read side of the consent flow: fetch the stored consent, check that the
/// requesting client may see it, decode its intent payload, and resolve the account selection the user will be
/// offered.
pub struct ConsentDetailsApi<B> {
    db: B,
    registry: DecoderRegistry,
}

impl<B> Debug for ConsentDetailsApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConsentDetailsApi")
    }
}

impl<B> ConsentDetailsApi<B> {
    /// Creates the API with the full decoder registry.
    pub fn new(db: B) -> Self {
        Self { db, registry: DecoderRegistry::new() }
    }

    /// Creates the API with a caller-supplied registry. Mostly useful for tests that want to restrict or replace
    /// the registered product decoders.
    pub fn with_registry(db: B, registry: DecoderRegistry) -> Self {
        Self { db, registry }
    }
}

impl<B> ConsentDetailsApi<B>
where B: ConsentStore + AccountInformation + ApiClientDirectory
{
    pub async fn details(&self, request: &DetailsRequest) -> Result<ConsentDetails, RcsApiError> {
        trace!("🔄️🔍️ Fetching consent {} for client {}", request.consent_id, request.client_id);
        let consent = self
            .db
            .fetch_consent(&request.consent_id)
            .await?
            .ok_or_else(|| RcsApiError::ConsentNotFound(request.consent_id.clone()))?;
        verify_consent_access(&consent, &request.client_id)?;
        let intent_type = consent.id.intent_type()?;
        let product = self.registry.decode(intent_type, &consent.ob_intent_object)?;
        let owned = self.db.accounts_for_user(&request.username).await?;
        let (accounts, debtor_locked) = resolve_account_selection(&consent.id, product.debtor_account(), owned)?;
        let (client_name, client_logo_uri) = match self.db.fetch_api_client(&request.client_id).await? {
            Some(client) => (client.name, client.logo_uri),
            None => {
                // An unregistered client id is unusual but not fatal: the consent was created through the gateway, so
                // fall back to showing the raw id.
                warn!("🔄️🔍️ API client {} is not in the directory", request.client_id);
                (request.client_id.clone(), None)
            },
        };
        debug!("🔄️🔍️ Consent {} decoded as {intent_type} with {} selectable account(s)", consent.id, accounts.len());
        Ok(ConsentDetails {
            consent_id: consent.id,
            intent_type,
            username: request.username.clone(),
            client_name,
            client_logo_uri,
            accounts,
            debtor_locked,
            product,
        })
    }
}

/// Resolves which accounts the user may select. A TPP-specified debtor account locks the selection to the matching
/// owned account; a debtor the user does not own means the consent cannot be presented to them at all.
fn resolve_account_selection(
    consent_id: &ConsentId,
    debtor: Option<&AccountIdentification>,
    owned: Vec<UserAccount>,
) -> Result<(Vec<UserAccount>, bool), RcsApiError> {
    match debtor {
        None => Ok((owned, false)),
        Some(debtor) => {
            let matched = owned.into_iter().find(|account| debtor.matches(account));
            match matched {
                Some(account) => Ok((vec![account], true)),
                None => {
                    warn!("🔄️⛔️ Debtor account on consent {consent_id} is not held by the user");
                    Err(RcsApiError::DebtorAccountNotFound(consent_id.clone()))
                },
            }
        },
    }
}
