//! Aggregation of the `Data.Charges` array carried on payment intents.
//!
//! A TPP may declare any number of charges, each with its own amount object. The consent UI shows a single total, so
//! the charges are summed here under the product's currency rules:
//!
//! * Domestic products: every charge must be denominated in the payment currency.
//! * International products: a charge denominated in the transfer currency is converted into the payment currency via
//!   the intent's exchange rate (flat multiplication). Any third currency cannot be reconciled.
//! * File payments carry no single instructed amount, so the total is denominated by the first charge's currency.
//!
//! An absent or empty `Charges` array means "no charges" (`None`), which the UI renders differently from a zero
//! charge.

use rcs_common::{ExchangeRate, Money};
use serde_json::Value;

use super::{json, DecodeError};

const CHARGES_PATH: &str = "Data.Charges";

/// Sums the intent's charges into `payment_currency`. `fx` is consulted for charges denominated in its source
/// currency; domestic decoders pass `None`.
pub(crate) fn total_charges(
    ob_intent: &Value,
    payment_currency: &str,
    fx: Option<&ExchangeRate>,
) -> Result<Option<Money>, DecodeError> {
    let Some(charges) = charges_array(ob_intent)? else {
        return Ok(None);
    };
    let mut total: Option<Money> = None;
    for (i, charge) in charges.iter().enumerate() {
        let amount = json::req_amount(charge, "Amount").map_err(|e| json::prefixed(e, &format!("{CHARGES_PATH}.{i}")))?;
        let amount = reconcile(amount, payment_currency, fx)?;
        total = Some(match total {
            None => amount,
            // The running total and the reconciled amount share a currency at this point, so the checked add cannot
            // fail; map the impossible branch to a mismatch error rather than panicking.
            Some(t) => t.checked_add(&amount).map_err(|_| DecodeError::ChargeCurrencyMismatch {
                charge: amount.currency().to_string(),
                payment: payment_currency.to_string(),
            })?,
        });
    }
    Ok(total)
}

/// Sums the charges without a known payment currency: the total is denominated by the first charge, and every other
/// charge must match it.
pub(crate) fn total_charges_self_denominated(ob_intent: &Value) -> Result<Option<Money>, DecodeError> {
    let Some(charges) = charges_array(ob_intent)? else {
        return Ok(None);
    };
    let Some(first) = charges.first() else {
        return Ok(None);
    };
    let currency = json::req_string(first, "Amount.Currency").map_err(|e| json::prefixed(e, &format!("{CHARGES_PATH}.0")))?;
    total_charges(ob_intent, &currency, None)
}

fn charges_array(ob_intent: &Value) -> Result<Option<&Vec<Value>>, DecodeError> {
    let Some(charges) = json::walk(ob_intent, CHARGES_PATH) else {
        return Ok(None);
    };
    let charges = charges
        .as_array()
        .ok_or_else(|| DecodeError::WrongType { path: CHARGES_PATH.to_string(), expected: "array" })?;
    if charges.is_empty() {
        Ok(None)
    } else {
        Ok(Some(charges))
    }
}

fn reconcile(amount: Money, payment_currency: &str, fx: Option<&ExchangeRate>) -> Result<Money, DecodeError> {
    if amount.currency() == payment_currency {
        return Ok(amount);
    }
    match fx {
        Some(rate) if amount.currency() == rate.source_currency => {
            amount.convert(rate).map_err(|_| DecodeError::ChargeCurrencyMismatch {
                charge: rate.source_currency.clone(),
                payment: payment_currency.to_string(),
            })
        },
        _ => Err(DecodeError::ChargeCurrencyMismatch {
            charge: amount.currency().to_string(),
            payment: payment_currency.to_string(),
        }),
    }
}
