use serde_json::Value;

use super::{
    charges,
    international_payment::exchange_rate_information,
    json,
    DecodeError,
    IntentDecoder,
    InternationalScheduledPaymentDetails,
    ProductDetails,
};
use crate::ob_types::IntentType;

/// Decoder for international scheduled payment consents (`PISC_`).
pub struct InternationalScheduledPaymentDecoder;

impl IntentDecoder for InternationalScheduledPaymentDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::InternationalScheduledPayment
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let instructed_amount = json::req_amount(ob_intent, "Data.Initiation.InstructedAmount")?;
        let currency_of_transfer = json::req_string(ob_intent, "Data.Initiation.CurrencyOfTransfer")?;
        let exchange_rate = exchange_rate_information(ob_intent, instructed_amount.currency(), &currency_of_transfer)?;
        let charges = charges::total_charges(ob_intent, instructed_amount.currency(), exchange_rate.as_ref())?;
        let details = InternationalScheduledPaymentDetails {
            requested_execution_date_time: json::req_date_time(ob_intent, "Data.Initiation.RequestedExecutionDateTime")?,
            payment_reference: json::opt_string(ob_intent, "Data.Initiation.RemittanceInformation.Reference")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            creditor_account: json::opt_account(ob_intent, "Data.Initiation.CreditorAccount")?,
            creditor_agent_country: json::opt_string(ob_intent, "Data.Initiation.CreditorAgent.PostalAddress.Country")?,
            exchange_rate,
            currency_of_transfer,
            charges,
            instructed_amount,
        };
        Ok(ProductDetails::InternationalScheduledPayment(details))
    }
}

#[cfg(test)]
mod test {
    use rcs_common::Money;
    use serde_json::json;

    use super::*;

    #[test]
    fn scheduled_international_payment() {
        let intent = json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "750.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "EUR",
                    "RequestedExecutionDateTime": "2026-03-01T09:30:00+00:00",
                    "ExchangeRateInformation": { "ExchangeRate": "1.15", "RateType": "Actual" }
                }
            }
        });
        let ProductDetails::InternationalScheduledPayment(details) =
            InternationalScheduledPaymentDecoder.decode(&intent).unwrap()
        else {
            panic!("wrong product");
        };
        assert_eq!(details.instructed_amount, Money::parse("750.00", "GBP").unwrap());
        assert_eq!(details.currency_of_transfer, "EUR");
        assert_eq!(details.requested_execution_date_time.to_rfc3339(), "2026-03-01T09:30:00+00:00");
        assert_eq!(details.exchange_rate.unwrap().source_currency, "EUR");
    }

    #[test]
    fn execution_date_is_required() {
        let intent = json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "750.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "EUR"
                }
            }
        });
        let err = InternationalScheduledPaymentDecoder.decode(&intent).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField(ref p) if p == "Data.Initiation.RequestedExecutionDateTime"));
    }
}
