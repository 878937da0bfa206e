//! The strongly typed, per-product consent detail DTOs produced by the intent decoders.

use chrono::{DateTime, Utc};
use rcs_common::{ExchangeRate, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ob_types::AccountIdentification;

/// Product-specific consent details, tagged by product for the consent UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductDetails {
    AccountAccess(AccountAccessDetails),
    DomesticPayment(DomesticPaymentDetails),
    DomesticScheduledPayment(DomesticScheduledPaymentDetails),
    DomesticStandingOrder(DomesticStandingOrderDetails),
    InternationalPayment(InternationalPaymentDetails),
    InternationalScheduledPayment(InternationalScheduledPaymentDetails),
    InternationalStandingOrder(InternationalStandingOrderDetails),
    FilePayment(FilePaymentDetails),
    DomesticVrp(DomesticVrpDetails),
    FundsConfirmation(FundsConfirmationDetails),
}

impl ProductDetails {
    /// The debtor account named by the intent, when the TPP supplied one. Used by the details service to lock account
    /// selection to the matching owned account.
    pub fn debtor_account(&self) -> Option<&AccountIdentification> {
        match self {
            ProductDetails::AccountAccess(_) => None,
            ProductDetails::DomesticPayment(d) => d.debtor_account.as_ref(),
            ProductDetails::DomesticScheduledPayment(d) => d.debtor_account.as_ref(),
            ProductDetails::DomesticStandingOrder(d) => d.debtor_account.as_ref(),
            ProductDetails::InternationalPayment(d) => d.debtor_account.as_ref(),
            ProductDetails::InternationalScheduledPayment(d) => d.debtor_account.as_ref(),
            ProductDetails::InternationalStandingOrder(d) => d.debtor_account.as_ref(),
            ProductDetails::FilePayment(d) => d.debtor_account.as_ref(),
            ProductDetails::DomesticVrp(d) => d.debtor_account.as_ref(),
            ProductDetails::FundsConfirmation(d) => Some(&d.debtor_account),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAccessDetails {
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_from_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_to_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticPaymentDetails {
    pub instructed_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIdentification>,
    /// Total of the TPP-declared charges, in the payment currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticScheduledPaymentDetails {
    pub instructed_amount: Money,
    pub requested_execution_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

/// One leg of a standing order schedule (first, recurring or final payment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingOrderPayment {
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticStandingOrderDetails {
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_payments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalPaymentDetails {
    pub instructed_amount: Money,
    pub currency_of_transfer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIdentification>,
    /// Destination country of the creditor agent, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_agent_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalScheduledPaymentDetails {
    pub instructed_amount: Money,
    pub currency_of_transfer: String,
    pub requested_execution_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_agent_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalStandingOrderDetails {
    pub frequency: String,
    pub currency_of_transfer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_payment: Option<StandingOrderPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_payments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_transactions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_sum: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_execution_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicLimit {
    pub amount: Money,
    pub period_type: String,
    pub period_alignment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticVrpDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to_date_time: Option<DateTime<Utc>>,
    pub maximum_individual_amount: Money,
    pub periodic_limits: Vec<PeriodicLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountIdentification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountIdentification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsConfirmationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date_time: Option<DateTime<Utc>>,
    pub debtor_account: AccountIdentification,
}
