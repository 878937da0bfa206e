use consent_engine::{
    ob_types::{ApiClientInfo, ConsentId, ConsentRecord, DecisionUpdate, UserAccount},
    traits::{
        AccountApiError,
        AccountInformation,
        ApiClientDirectory,
        ApiClientError,
        ConsentStore,
        ConsentStoreError,
    },
};
use mockall::mock;

mock! {
    pub Backend {}
    impl ConsentStore for Backend {
        async fn fetch_consent(&self, id: &ConsentId) -> Result<Option<ConsentRecord>, ConsentStoreError>;
        async fn update_consent_decision(&self, id: &ConsentId, update: DecisionUpdate) -> Result<ConsentRecord, ConsentStoreError>;
    }
    impl AccountInformation for Backend {
        async fn accounts_for_user(&self, username: &str) -> Result<Vec<UserAccount>, AccountApiError>;
    }
    impl ApiClientDirectory for Backend {
        async fn fetch_api_client(&self, client_id: &str) -> Result<Option<ApiClientInfo>, ApiClientError>;
    }
}
