use serde_json::Value;

use super::{json, DecodeError, FundsConfirmationDetails, IntentDecoder, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for confirmation of funds consents (`FCC_`). The debtor account is mandatory here: it names the account
/// the CBPII will run funds checks against, and the user must own it.
pub struct FundsConfirmationDecoder;

impl IntentDecoder for FundsConfirmationDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::FundsConfirmation
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let details = FundsConfirmationDetails {
            expiration_date_time: json::opt_date_time(ob_intent, "Data.ExpirationDateTime")?,
            debtor_account: json::req_account(ob_intent, "Data.DebtorAccount")?,
        };
        Ok(ProductDetails::FundsConfirmation(details))
    }
}
