//! Builders for consent records and intent payloads, shared by the engine's own tests and (behind the `test_utils`
//! feature) by downstream test suites.

use chrono::Utc;
use serde_json::{json, Value};

use crate::ob_types::{ConsentId, ConsentRecord, ConsentStatus, UserAccount};

pub const DEFAULT_CLIENT_ID: &str = "tpp-001";

/// A domestic payment intent with a TPP-specified debtor account.
pub fn domestic_payment_intent(debtor_identification: Option<&str>) -> Value {
    let mut initiation = json!({
        "InstructedAmount": { "Amount": "165.88", "Currency": "GBP" },
        "RemittanceInformation": { "Reference": "FRESCO-101" },
        "CreditorAccount": {
            "SchemeName": "UK.OBIE.SortCodeAccountNumber",
            "Identification": "08080021325698",
            "Name": "ACME Inc"
        }
    });
    if let Some(identification) = debtor_identification {
        initiation["DebtorAccount"] = json!({
            "SchemeName": "UK.OBIE.SortCodeAccountNumber",
            "Identification": identification,
            "Name": "Mr A Jones"
        });
    }
    json!({ "Data": { "Initiation": initiation } })
}

pub fn account_access_intent() -> Value {
    json!({
        "Data": {
            "Permissions": ["ReadAccountsDetail", "ReadBalances"],
            "ExpirationDateTime": "2027-08-02T00:00:00+00:00"
        }
    })
}

pub fn vrp_intent(debtor_identification: &str) -> Value {
    json!({
        "Data": {
            "ControlParameters": {
                "MaximumIndividualAmount": { "Amount": "100.00", "Currency": "GBP" },
                "PeriodicLimits": [
                    { "Amount": "200.00", "Currency": "GBP", "PeriodAlignment": "Consent", "PeriodType": "Week" }
                ]
            },
            "Initiation": {
                "DebtorAccount": { "SchemeName": "UK.OBIE.SortCodeAccountNumber", "Identification": debtor_identification }
            }
        }
    })
}

/// Builds [`ConsentRecord`]s with sensible defaults: created by [`DEFAULT_CLIENT_ID`], awaiting authorisation, with
/// an intent payload matching the id prefix (domestic payment ids get a payment intent, `AAC_` ids an account access
/// intent).
#[derive(Debug, Clone)]
pub struct ConsentBuilder {
    id: String,
    client_id: String,
    status: ConsentStatus,
    intent: Option<Value>,
}

impl ConsentBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            status: ConsentStatus::AwaitingAuthorisation,
            intent: None,
        }
    }

    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = client_id.to_string();
        self
    }

    pub fn status(mut self, status: ConsentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn intent(mut self, intent: Value) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn build(self) -> ConsentRecord {
        let intent = self.intent.unwrap_or_else(|| {
            if self.id.starts_with("AAC_") {
                account_access_intent()
            } else {
                domestic_payment_intent(None)
            }
        });
        let now = Utc::now();
        ConsentRecord {
            id: ConsentId(self.id),
            status: self.status,
            oauth2_client_id: self.client_id,
            resource_owner: None,
            created_at: now,
            updated_at: now,
            ob_intent_object: intent,
            authorised_accounts: vec![],
        }
    }
}

pub fn owned_account(account_id: &str, identification: &str) -> UserAccount {
    UserAccount {
        account_id: account_id.to_string(),
        scheme_name: "UK.OBIE.SortCodeAccountNumber".to_string(),
        identification: identification.to_string(),
        name: Some("Household".to_string()),
        secondary_identification: None,
        balance: None,
    }
}
