//! In-memory backend implementing all three trait seams.
//!
//! Production deployments put the bank's own consent store, account APIs and TPP directory behind the
//! [`crate::traits`] contracts; this backend exists for tests and for standalone instances, which can seed it from a
//! JSON file at startup.

use std::{collections::HashMap, path::Path, sync::Arc};

use chrono::Utc;
use log::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
    ob_types::{ApiClientInfo, ConsentId, ConsentRecord, ConsentStatus, DecisionUpdate, UserAccount},
    traits::{
        AccountApiError,
        AccountInformation,
        ApiClientDirectory,
        ApiClientError,
        ConsentStore,
        ConsentStoreError,
    },
};

#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<Inner>>,
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemoryBackend")
    }
}

#[derive(Debug, Default)]
struct Inner {
    consents: HashMap<String, ConsentRecord>,
    accounts: HashMap<String, Vec<UserAccount>>,
    api_clients: HashMap<String, ApiClientInfo>,
}

/// The JSON shape of a seed file: a list of consents, the accounts held per username, and the known TPPs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub consents: Vec<ConsentRecord>,
    pub accounts: HashMap<String, Vec<UserAccount>>,
    pub api_clients: Vec<ApiClientInfo>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Could not read the seed file. {0}")]
    IoError(#[from] std::io::Error),
    #[error("Could not parse the seed file. {0}")]
    ParseError(#[from] serde_json::Error),
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let data: SeedData = serde_json::from_str(&raw)?;
        info!(
            "🗄️ Seeded the in-memory backend with {} consent(s), {} user(s) and {} API client(s) from {}",
            data.consents.len(),
            data.accounts.len(),
            data.api_clients.len(),
            path.as_ref().display()
        );
        Ok(Self::from_seed(data))
    }

    pub fn from_seed(data: SeedData) -> Self {
        let inner = Inner {
            consents: data.consents.into_iter().map(|c| (c.id.0.clone(), c)).collect(),
            accounts: data.accounts,
            api_clients: data.api_clients.into_iter().map(|c| (c.client_id.clone(), c)).collect(),
        };
        Self { inner: Arc::new(RwLock::new(inner)) }
    }

    pub async fn add_consent(&self, consent: ConsentRecord) {
        self.inner.write().await.consents.insert(consent.id.0.clone(), consent);
    }

    pub async fn add_account(&self, username: &str, account: UserAccount) {
        self.inner.write().await.accounts.entry(username.to_string()).or_default().push(account);
    }

    pub async fn add_api_client(&self, client: ApiClientInfo) {
        self.inner.write().await.api_clients.insert(client.client_id.clone(), client);
    }
}

impl ConsentStore for MemoryBackend {
    async fn fetch_consent(&self, id: &ConsentId) -> Result<Option<ConsentRecord>, ConsentStoreError> {
        Ok(self.inner.read().await.consents.get(id.as_str()).cloned())
    }

    async fn update_consent_decision(
        &self,
        id: &ConsentId,
        update: DecisionUpdate,
    ) -> Result<ConsentRecord, ConsentStoreError> {
        let mut inner = self.inner.write().await;
        let consent = inner
            .consents
            .get_mut(id.as_str())
            .ok_or_else(|| ConsentStoreError::StorageError(format!("Consent {id} does not exist")))?;
        if consent.status != ConsentStatus::AwaitingAuthorisation {
            return Err(ConsentStoreError::StateConflict { id: id.clone(), status: consent.status });
        }
        consent.status = update.status;
        consent.resource_owner = update.resource_owner;
        consent.authorised_accounts = update.authorised_accounts;
        consent.updated_at = Utc::now();
        Ok(consent.clone())
    }
}

impl AccountInformation for MemoryBackend {
    async fn accounts_for_user(&self, username: &str) -> Result<Vec<UserAccount>, AccountApiError> {
        Ok(self.inner.read().await.accounts.get(username).cloned().unwrap_or_default())
    }
}

impl ApiClientDirectory for MemoryBackend {
    async fn fetch_api_client(&self, client_id: &str) -> Result<Option<ApiClientInfo>, ApiClientError> {
        Ok(self.inner.read().await.api_clients.get(client_id).cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{owned_account, ConsentBuilder};

    #[tokio::test]
    async fn decided_consents_cannot_be_decided_again() {
        let backend = MemoryBackend::new();
        backend.add_consent(ConsentBuilder::new("PDC_77").build()).await;
        let id = ConsentId("PDC_77".to_string());
        let update = DecisionUpdate {
            status: ConsentStatus::Authorised,
            resource_owner: Some("alice".to_string()),
            authorised_accounts: vec!["acc-1".to_string()],
        };
        let updated = backend.update_consent_decision(&id, update.clone()).await.unwrap();
        assert_eq!(updated.status, ConsentStatus::Authorised);
        assert_eq!(updated.resource_owner.as_deref(), Some("alice"));
        assert_eq!(updated.authorised_accounts, vec!["acc-1"]);

        let err = backend.update_consent_decision(&id, update).await.unwrap_err();
        assert!(matches!(err, ConsentStoreError::StateConflict { status: ConsentStatus::Authorised, .. }));
    }

    #[tokio::test]
    async fn unknown_consents_cannot_be_updated() {
        let backend = MemoryBackend::new();
        let update =
            DecisionUpdate { status: ConsentStatus::Rejected, resource_owner: None, authorised_accounts: vec![] };
        let err = backend.update_consent_decision(&ConsentId("PDC_404".to_string()), update).await.unwrap_err();
        assert!(matches!(err, ConsentStoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn seed_data_round_trips_through_json() {
        let consent = ConsentBuilder::new("AAC_12").build();
        let mut accounts = HashMap::new();
        accounts.insert("alice".to_string(), vec![owned_account("acc-1", "40400412345678")]);
        let seed = SeedData {
            consents: vec![consent],
            accounts,
            api_clients: vec![ApiClientInfo {
                client_id: "tpp-001".to_string(),
                name: "Fresco Finance".to_string(),
                logo_uri: None,
            }],
        };
        let json = serde_json::to_string(&seed).unwrap();
        let parsed: SeedData = serde_json::from_str(&json).unwrap();
        let backend = MemoryBackend::from_seed(parsed);

        let fetched = backend.fetch_consent(&ConsentId("AAC_12".to_string())).await.unwrap().unwrap();
        assert_eq!(fetched.status, ConsentStatus::AwaitingAuthorisation);
        assert_eq!(backend.accounts_for_user("alice").await.unwrap().len(), 1);
        assert!(backend.accounts_for_user("bob").await.unwrap().is_empty());
        assert!(backend.fetch_api_client("tpp-001").await.unwrap().is_some());
        assert!(backend.fetch_api_client("tpp-999").await.unwrap().is_none());
    }
}
