use serde_json::Value;

use super::{json, AccountAccessDetails, DecodeError, IntentDecoder, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for account access consents (`AAC_`). The payload is a permission list plus an optional validity window;
/// everything account-related is resolved against the user's owned accounts by the service layer.
pub struct AccountAccessDecoder;

impl IntentDecoder for AccountAccessDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::AccountAccess
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let permissions = json::req_str_array(ob_intent, "Data.Permissions")?;
        if permissions.is_empty() {
            return Err(DecodeError::MissingField("Data.Permissions".to_string()));
        }
        let details = AccountAccessDetails {
            permissions,
            expiration_date_time: json::opt_date_time(ob_intent, "Data.ExpirationDateTime")?,
            transaction_from_date_time: json::opt_date_time(ob_intent, "Data.TransactionFromDateTime")?,
            transaction_to_date_time: json::opt_date_time(ob_intent, "Data.TransactionToDateTime")?,
        };
        Ok(ProductDetails::AccountAccess(details))
    }
}
