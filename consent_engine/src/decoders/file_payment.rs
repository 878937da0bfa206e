use serde_json::Value;

use super::{charges, json, DecodeError, FilePaymentDetails, IntentDecoder, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for file payment consents (`PFC_`).
///
/// A file payment has no single instructed amount; the user reviews the file's control totals instead, and the charge
/// total is denominated by the first declared charge.
pub struct FilePaymentDecoder;

impl IntentDecoder for FilePaymentDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::FilePayment
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let details = FilePaymentDetails {
            file_reference: json::opt_string(ob_intent, "Data.Initiation.FileReference")?,
            number_of_transactions: json::opt_string(ob_intent, "Data.Initiation.NumberOfTransactions")?,
            control_sum: json::opt_decimal(ob_intent, "Data.Initiation.ControlSum")?,
            requested_execution_date_time: json::opt_date_time(ob_intent, "Data.Initiation.RequestedExecutionDateTime")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            charges: charges::total_charges_self_denominated(ob_intent)?,
        };
        Ok(ProductDetails::FilePayment(details))
    }
}
