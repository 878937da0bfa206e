use serde_json::Value;

use super::{charges, json, DecodeError, DomesticPaymentDetails, IntentDecoder, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for single immediate domestic payment consents (`PDC_`).
pub struct DomesticPaymentDecoder;

impl IntentDecoder for DomesticPaymentDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::DomesticPayment
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let instructed_amount = json::req_amount(ob_intent, "Data.Initiation.InstructedAmount")?;
        let charges = charges::total_charges(ob_intent, instructed_amount.currency(), None)?;
        let details = DomesticPaymentDetails {
            payment_reference: json::opt_string(ob_intent, "Data.Initiation.RemittanceInformation.Reference")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            creditor_account: json::opt_account(ob_intent, "Data.Initiation.CreditorAccount")?,
            charges,
            instructed_amount,
        };
        Ok(ProductDetails::DomesticPayment(details))
    }
}
