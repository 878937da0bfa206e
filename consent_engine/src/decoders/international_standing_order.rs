use serde_json::Value;

use super::{
    charges,
    domestic_standing_order::{schedule_currency, schedule_leg},
    international_payment::exchange_rate_information,
    json,
    DecodeError,
    IntentDecoder,
    InternationalStandingOrderDetails,
    ProductDetails,
};
use crate::ob_types::IntentType;

/// Decoder for international standing order consents (`PISOC_`): the domestic schedule shape with a transfer
/// currency and the international charge rules.
pub struct InternationalStandingOrderDecoder;

impl IntentDecoder for InternationalStandingOrderDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::InternationalStandingOrder
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let first_payment = schedule_leg(ob_intent, "First")?;
        let recurring_payment = schedule_leg(ob_intent, "Recurring")?;
        let final_payment = schedule_leg(ob_intent, "Final")?;
        let payment_currency = schedule_currency(&first_payment, &recurring_payment, &final_payment)?;
        let currency_of_transfer = json::req_string(ob_intent, "Data.Initiation.CurrencyOfTransfer")?;
        let exchange_rate = exchange_rate_information(ob_intent, &payment_currency, &currency_of_transfer)?;
        let charges = charges::total_charges(ob_intent, &payment_currency, exchange_rate.as_ref())?;
        let details = InternationalStandingOrderDetails {
            frequency: json::req_string(ob_intent, "Data.Initiation.Frequency")?,
            reference: json::opt_string(ob_intent, "Data.Initiation.Reference")?,
            first_payment,
            recurring_payment,
            final_payment,
            number_of_payments: json::opt_string(ob_intent, "Data.Initiation.NumberOfPayments")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            currency_of_transfer,
            charges,
        };
        Ok(ProductDetails::InternationalStandingOrder(details))
    }
}
