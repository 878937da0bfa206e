use serde_json::Value;

use super::{charges, json, DecodeError, DomesticStandingOrderDetails, IntentDecoder, ProductDetails, StandingOrderPayment};
use crate::ob_types::IntentType;

/// Decoder for domestic standing order consents (`PDSOC_`).
///
/// A standing order schedule is expressed as up to three legs (first, recurring, final), each an optional
/// amount/date-time pair. At least one leg must carry an amount, and the charge total is denominated by the first
/// leg that does.
pub struct DomesticStandingOrderDecoder;

impl IntentDecoder for DomesticStandingOrderDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::DomesticStandingOrder
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let first_payment = schedule_leg(ob_intent, "First")?;
        let recurring_payment = schedule_leg(ob_intent, "Recurring")?;
        let final_payment = schedule_leg(ob_intent, "Final")?;
        let payment_currency = schedule_currency(&first_payment, &recurring_payment, &final_payment)?;
        let charges = charges::total_charges(ob_intent, &payment_currency, None)?;
        let details = DomesticStandingOrderDetails {
            frequency: json::req_string(ob_intent, "Data.Initiation.Frequency")?,
            reference: json::opt_string(ob_intent, "Data.Initiation.Reference")?,
            first_payment,
            recurring_payment,
            final_payment,
            number_of_payments: json::opt_string(ob_intent, "Data.Initiation.NumberOfPayments")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            charges,
        };
        Ok(ProductDetails::DomesticStandingOrder(details))
    }
}

/// Reads one schedule leg. A leg exists iff its amount is present; a dangling `...PaymentDateTime` without the
/// matching amount is unpresentable.
pub(super) fn schedule_leg(ob_intent: &Value, leg: &str) -> Result<Option<StandingOrderPayment>, DecodeError> {
    let amount_path = format!("Data.Initiation.{leg}PaymentAmount");
    let date_path = format!("Data.Initiation.{leg}PaymentDateTime");
    let Some(amount) = json::opt_amount(ob_intent, &amount_path)? else {
        return if json::walk(ob_intent, &date_path).is_some() {
            Err(DecodeError::MissingField(amount_path))
        } else {
            Ok(None)
        };
    };
    let date_time = json::opt_date_time(ob_intent, &date_path)?;
    Ok(Some(StandingOrderPayment { amount, date_time }))
}

/// The currency the standing order pays in, taken from the first leg that carries an amount.
pub(super) fn schedule_currency(
    first: &Option<StandingOrderPayment>,
    recurring: &Option<StandingOrderPayment>,
    r#final: &Option<StandingOrderPayment>,
) -> Result<String, DecodeError> {
    [first, recurring, r#final]
        .into_iter()
        .find_map(|leg| leg.as_ref().map(|p| p.amount.currency().to_string()))
        .ok_or_else(|| DecodeError::MissingField("Data.Initiation.FirstPaymentAmount".to_string()))
}
