use rcs_common::Money;
use serde_json::Value;

use super::{json, DecodeError, DomesticVrpDetails, IntentDecoder, PeriodicLimit, ProductDetails};
use crate::ob_types::IntentType;

const LIMITS_PATH: &str = "Data.ControlParameters.PeriodicLimits";

/// Decoder for domestic variable recurring payment consents (`PVRP_`).
///
/// A VRP consent has no instructed amount; the user reviews the control parameters instead: the per-payment cap and
/// at least one periodic spending limit.
pub struct DomesticVrpDecoder;

impl IntentDecoder for DomesticVrpDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::DomesticVrp
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let details = DomesticVrpDetails {
            valid_from_date_time: json::opt_date_time(ob_intent, "Data.ControlParameters.ValidFromDateTime")?,
            valid_to_date_time: json::opt_date_time(ob_intent, "Data.ControlParameters.ValidToDateTime")?,
            maximum_individual_amount: json::req_amount(ob_intent, "Data.ControlParameters.MaximumIndividualAmount")?,
            periodic_limits: periodic_limits(ob_intent)?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            creditor_account: json::opt_account(ob_intent, "Data.Initiation.CreditorAccount")?,
        };
        Ok(ProductDetails::DomesticVrp(details))
    }
}

// Unlike charges, a periodic limit's amount and currency are flat fields on the limit itself.
fn periodic_limits(ob_intent: &Value) -> Result<Vec<PeriodicLimit>, DecodeError> {
    let node = json::required(ob_intent, LIMITS_PATH)?;
    let items =
        node.as_array().ok_or_else(|| DecodeError::WrongType { path: LIMITS_PATH.to_string(), expected: "array" })?;
    if items.is_empty() {
        return Err(DecodeError::MissingField(LIMITS_PATH.to_string()));
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let limit = (|| -> Result<PeriodicLimit, DecodeError> {
                let amount = json::req_str(item, "Amount")?;
                let currency = json::req_str(item, "Currency")?;
                let amount = Money::parse(amount, currency)
                    .map_err(|e| DecodeError::InvalidAmount { path: "Amount".to_string(), reason: e.to_string() })?;
                Ok(PeriodicLimit {
                    amount,
                    period_type: json::req_string(item, "PeriodType")?,
                    period_alignment: json::req_string(item, "PeriodAlignment")?,
                })
            })();
            limit.map_err(|e| json::prefixed(e, &format!("{LIMITS_PATH}.{i}")))
        })
        .collect()
}
