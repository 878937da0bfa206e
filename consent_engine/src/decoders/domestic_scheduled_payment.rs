use serde_json::Value;

use super::{charges, json, DecodeError, DomesticScheduledPaymentDetails, IntentDecoder, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for domestic scheduled payment consents (`PDSC_`). The shape is the immediate domestic payment plus a
/// mandatory execution date.
pub struct DomesticScheduledPaymentDecoder;

impl IntentDecoder for DomesticScheduledPaymentDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::DomesticScheduledPayment
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let instructed_amount = json::req_amount(ob_intent, "Data.Initiation.InstructedAmount")?;
        let charges = charges::total_charges(ob_intent, instructed_amount.currency(), None)?;
        let details = DomesticScheduledPaymentDetails {
            requested_execution_date_time: json::req_date_time(ob_intent, "Data.Initiation.RequestedExecutionDateTime")?,
            payment_reference: json::opt_string(ob_intent, "Data.Initiation.RemittanceInformation.Reference")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            creditor_account: json::opt_account(ob_intent, "Data.Initiation.CreditorAccount")?,
            charges,
            instructed_amount,
        };
        Ok(ProductDetails::DomesticScheduledPayment(details))
    }
}
