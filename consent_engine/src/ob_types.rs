//! Core data types of the consent domain.
//!
//! These types mirror the records held in the consent store and the identity scheme used across the UK Open Banking
//! standard: a consent is identified by a typed, prefixed id (e.g. `PDC_...` for a domestic payment consent), and the
//! prefix alone determines which intent decoder is responsible for its `OBIntentObject` payload.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use rcs_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decoders::DecodeError;

//--------------------------------------     IntentType      ----------------------------------------------------------

/// The payment/consent products supported by the service, one per Open Banking API intent type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentType {
    AccountAccess,
    DomesticPayment,
    DomesticScheduledPayment,
    DomesticStandingOrder,
    InternationalPayment,
    InternationalScheduledPayment,
    InternationalStandingOrder,
    FilePayment,
    DomesticVrp,
    FundsConfirmation,
}

impl IntentType {
    pub const ALL: [IntentType; 10] = [
        IntentType::AccountAccess,
        IntentType::DomesticPayment,
        IntentType::DomesticScheduledPayment,
        IntentType::DomesticStandingOrder,
        IntentType::InternationalPayment,
        IntentType::InternationalScheduledPayment,
        IntentType::InternationalStandingOrder,
        IntentType::FilePayment,
        IntentType::DomesticVrp,
        IntentType::FundsConfirmation,
    ];

    /// The consent-id prefix for this intent type, including the trailing underscore.
    pub fn prefix(&self) -> &'static str {
        match self {
            IntentType::AccountAccess => "AAC_",
            IntentType::DomesticPayment => "PDC_",
            IntentType::DomesticScheduledPayment => "PDSC_",
            IntentType::DomesticStandingOrder => "PDSOC_",
            IntentType::InternationalPayment => "PIC_",
            IntentType::InternationalScheduledPayment => "PISC_",
            IntentType::InternationalStandingOrder => "PISOC_",
            IntentType::FilePayment => "PFC_",
            IntentType::DomesticVrp => "PVRP_",
            IntentType::FundsConfirmation => "FCC_",
        }
    }

    pub fn from_consent_id(id: &str) -> Option<Self> {
        IntentType::ALL.into_iter().find(|t| id.starts_with(t.prefix()))
    }

    /// Whether a user authorising this product selects exactly one account. Account access consents may cover several
    /// accounts; everything else debits (or confirms funds on) a single account.
    pub fn single_account_selection(&self) -> bool {
        !matches!(self, IntentType::AccountAccess)
    }
}

impl Display for IntentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntentType::AccountAccess => "AccountAccess",
            IntentType::DomesticPayment => "DomesticPayment",
            IntentType::DomesticScheduledPayment => "DomesticScheduledPayment",
            IntentType::DomesticStandingOrder => "DomesticStandingOrder",
            IntentType::InternationalPayment => "InternationalPayment",
            IntentType::InternationalScheduledPayment => "InternationalScheduledPayment",
            IntentType::InternationalStandingOrder => "InternationalStandingOrder",
            IntentType::FilePayment => "FilePayment",
            IntentType::DomesticVrp => "DomesticVrp",
            IntentType::FundsConfirmation => "FundsConfirmation",
        };
        write!(f, "{s}")
    }
}

//--------------------------------------      ConsentId      ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsentId(pub String);

impl ConsentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the intent type from the id prefix.
    pub fn intent_type(&self) -> Result<IntentType, DecodeError> {
        IntentType::from_consent_id(&self.0).ok_or_else(|| DecodeError::UnknownIntentType(self.0.clone()))
    }
}

impl FromStr for ConsentId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for ConsentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for ConsentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------    ConsentStatus    ----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentStatus {
    /// The consent has been created by the TPP and is waiting for the user's decision.
    AwaitingAuthorisation,
    /// The user has authorised the consent.
    Authorised,
    /// The user (or the service, on their behalf) has rejected the consent.
    Rejected,
    /// The consent was revoked after authorisation.
    Revoked,
    /// The authorised consent has been exercised and can no longer be re-used.
    Consumed,
}

impl Display for ConsentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsentStatus::AwaitingAuthorisation => write!(f, "AwaitingAuthorisation"),
            ConsentStatus::Authorised => write!(f, "Authorised"),
            ConsentStatus::Rejected => write!(f, "Rejected"),
            ConsentStatus::Revoked => write!(f, "Revoked"),
            ConsentStatus::Consumed => write!(f, "Consumed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid consent status: {0}")]
pub struct ConsentStatusParseError(String);

impl FromStr for ConsentStatus {
    type Err = ConsentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AwaitingAuthorisation" => Ok(Self::AwaitingAuthorisation),
            "Authorised" => Ok(Self::Authorised),
            "Rejected" => Ok(Self::Rejected),
            "Revoked" => Ok(Self::Revoked),
            "Consumed" => Ok(Self::Consumed),
            s => Err(ConsentStatusParseError(s.to_string())),
        }
    }
}

//--------------------------------------    ConsentRecord    ----------------------------------------------------------

/// A stored consent, as held by the consent store. The `ob_intent_object` field carries the TPP-supplied
/// `OBIntentObject` JSON envelope verbatim; it is only interpreted by the intent decoders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    pub id: ConsentId,
    pub status: ConsentStatus,
    /// The OAuth2 client id of the TPP that created this consent.
    pub oauth2_client_id: String,
    /// The user that authorised (or rejected) the consent. `None` until a decision has been made.
    #[serde(default)]
    pub resource_owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ob_intent_object: serde_json::Value,
    /// Account ids recorded when the consent was authorised.
    #[serde(default)]
    pub authorised_accounts: Vec<String>,
}

//--------------------------------------   DecisionUpdate    ----------------------------------------------------------

/// The state transition applied to a stored consent when the user's decision is recorded.
#[derive(Debug, Clone)]
pub struct DecisionUpdate {
    pub status: ConsentStatus,
    pub resource_owner: Option<String>,
    pub authorised_accounts: Vec<String>,
}

//--------------------------------------   ConsentDecision   ----------------------------------------------------------

/// The decision submitted by the user from the consent UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentDecision {
    Authorised,
    Rejected,
}

impl Display for ConsentDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsentDecision::Authorised => write!(f, "Authorised"),
            ConsentDecision::Rejected => write!(f, "Rejected"),
        }
    }
}

//-------------------------------- AccountIdentification ---------------------------------------------------------------

/// An account reference as it appears inside an intent payload (`DebtorAccount` / `CreditorAccount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountIdentification {
    pub scheme_name: String,
    pub identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_identification: Option<String>,
}

impl AccountIdentification {
    /// Payload account references match owned accounts on scheme name and identification. Display names are cosmetic
    /// and excluded from the comparison.
    pub fn matches(&self, account: &UserAccount) -> bool {
        self.scheme_name == account.scheme_name && self.identification == account.identification
    }
}

//--------------------------------------     UserAccount     ----------------------------------------------------------

/// An account owned by the resource owner, as returned by the account information service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub account_id: String,
    pub scheme_name: String,
    pub identification: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub secondary_identification: Option<String>,
    /// Current balance, when the account service supplies one for display.
    #[serde(default)]
    pub balance: Option<Money>,
}

//--------------------------------------    ApiClientInfo    ----------------------------------------------------------

/// Display information for the TPP that created a consent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientInfo {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intent_type_from_prefixes() {
        assert_eq!(IntentType::from_consent_id("PDC_133456"), Some(IntentType::DomesticPayment));
        assert_eq!(IntentType::from_consent_id("PDSC_99"), Some(IntentType::DomesticScheduledPayment));
        assert_eq!(IntentType::from_consent_id("PDSOC_7"), Some(IntentType::DomesticStandingOrder));
        assert_eq!(IntentType::from_consent_id("PIC_1"), Some(IntentType::InternationalPayment));
        assert_eq!(IntentType::from_consent_id("PISC_1"), Some(IntentType::InternationalScheduledPayment));
        assert_eq!(IntentType::from_consent_id("PISOC_1"), Some(IntentType::InternationalStandingOrder));
        assert_eq!(IntentType::from_consent_id("PFC_1"), Some(IntentType::FilePayment));
        assert_eq!(IntentType::from_consent_id("PVRP_1"), Some(IntentType::DomesticVrp));
        assert_eq!(IntentType::from_consent_id("AAC_1"), Some(IntentType::AccountAccess));
        assert_eq!(IntentType::from_consent_id("FCC_1"), Some(IntentType::FundsConfirmation));
        assert_eq!(IntentType::from_consent_id("XYZ_1"), None);
    }

    #[test]
    fn unknown_prefix_is_a_decode_error() {
        let id = ConsentId("ORDER_123".to_string());
        let err = id.intent_type().unwrap_err();
        assert_eq!(err.to_string(), "No intent type matches consent id ORDER_123");
    }

    #[test]
    fn account_matching_ignores_display_fields() {
        let reference = AccountIdentification {
            scheme_name: "UK.OBIE.SortCodeAccountNumber".to_string(),
            identification: "40400412345678".to_string(),
            name: Some("Mr A Jones".to_string()),
            secondary_identification: None,
        };
        let owned = UserAccount {
            account_id: "acc-1".to_string(),
            scheme_name: "UK.OBIE.SortCodeAccountNumber".to_string(),
            identification: "40400412345678".to_string(),
            name: Some("Household".to_string()),
            secondary_identification: Some("roll-1".to_string()),
            balance: None,
        };
        assert!(reference.matches(&owned));
        let other = UserAccount { identification: "40400487654321".to_string(), ..owned };
        assert!(!reference.matches(&other));
    }
}
