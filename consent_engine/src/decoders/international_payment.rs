use std::str::FromStr;

use rcs_common::{ExchangeRate, RateType};
use serde_json::Value;

use super::{charges, json, DecodeError, IntentDecoder, InternationalPaymentDetails, ProductDetails};
use crate::ob_types::IntentType;

/// Decoder for single immediate international payment consents (`PIC_`).
pub struct InternationalPaymentDecoder;

impl IntentDecoder for InternationalPaymentDecoder {
    fn intent_type(&self) -> IntentType {
        IntentType::InternationalPayment
    }

    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let instructed_amount = json::req_amount(ob_intent, "Data.Initiation.InstructedAmount")?;
        let currency_of_transfer = json::req_string(ob_intent, "Data.Initiation.CurrencyOfTransfer")?;
        let exchange_rate = exchange_rate_information(ob_intent, instructed_amount.currency(), &currency_of_transfer)?;
        let charges = charges::total_charges(ob_intent, instructed_amount.currency(), exchange_rate.as_ref())?;
        let details = InternationalPaymentDetails {
            payment_reference: json::opt_string(ob_intent, "Data.Initiation.RemittanceInformation.Reference")?,
            debtor_account: json::opt_account(ob_intent, "Data.Initiation.DebtorAccount")?,
            creditor_account: json::opt_account(ob_intent, "Data.Initiation.CreditorAccount")?,
            creditor_agent_country: json::opt_string(ob_intent, "Data.Initiation.CreditorAgent.PostalAddress.Country")?,
            exchange_rate,
            currency_of_transfer,
            charges,
            instructed_amount,
        };
        Ok(ProductDetails::InternationalPayment(details))
    }
}

/// Reads `Data.Initiation.ExchangeRateInformation` into a transfer-currency → payment-currency rate.
///
/// A rate is only produced when the section carries a numeric `ExchangeRate`: an indicative section without a number
/// gives the user nothing to review and cannot reconcile foreign charges, so it reads as absent.
pub(super) fn exchange_rate_information(
    ob_intent: &Value,
    payment_currency: &str,
    currency_of_transfer: &str,
) -> Result<Option<ExchangeRate>, DecodeError> {
    const RATE_PATH: &str = "Data.Initiation.ExchangeRateInformation";
    if json::walk(ob_intent, RATE_PATH).is_none() {
        return Ok(None);
    }
    let Some(rate) = json::opt_decimal(ob_intent, "Data.Initiation.ExchangeRateInformation.ExchangeRate")? else {
        return Ok(None);
    };
    let rate_type = json::req_str(ob_intent, "Data.Initiation.ExchangeRateInformation.RateType")?;
    let rate_type = RateType::from_str(rate_type).map_err(|_| DecodeError::WrongType {
        path: "Data.Initiation.ExchangeRateInformation.RateType".to_string(),
        expected: "exchange rate type",
    })?;
    Ok(Some(ExchangeRate {
        rate,
        source_currency: currency_of_transfer.to_string(),
        target_currency: payment_currency.to_string(),
        rate_type,
        contract_identification: json::opt_string(
            ob_intent,
            "Data.Initiation.ExchangeRateInformation.ContractIdentification",
        )?,
    }))
}

#[cfg(test)]
mod test {
    use rcs_common::Money;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn payload() -> Value {
        json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "1000.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "USD",
                    "ExchangeRateInformation": {
                        "UnitCurrency": "GBP",
                        "ExchangeRate": 0.8,
                        "RateType": "Agreed",
                        "ContractIdentification": "/tbill/2018/T102993"
                    },
                    "RemittanceInformation": { "Reference": "INVOICE-0117" },
                    "CreditorAgent": { "PostalAddress": { "Country": "US" } },
                    "CreditorAccount": { "SchemeName": "UK.OBIE.IBAN", "Identification": "US33XXX1234567890123" }
                },
                "Charges": [
                    { "Amount": { "Amount": "5.00", "Currency": "GBP" } },
                    { "Amount": { "Amount": "10.00", "Currency": "USD" } }
                ]
            }
        })
    }

    #[test]
    fn full_payload_with_fx_charges() {
        let ProductDetails::InternationalPayment(details) = InternationalPaymentDecoder.decode(&payload()).unwrap()
        else {
            panic!("wrong product");
        };
        assert_eq!(details.instructed_amount, Money::parse("1000.00", "GBP").unwrap());
        assert_eq!(details.currency_of_transfer, "USD");
        assert_eq!(details.creditor_agent_country.as_deref(), Some("US"));
        let rate = details.exchange_rate.unwrap();
        assert_eq!(rate.rate, Decimal::new(8, 1));
        assert_eq!(rate.source_currency, "USD");
        assert_eq!(rate.target_currency, "GBP");
        assert_eq!(rate.contract_identification.as_deref(), Some("/tbill/2018/T102993"));
        // 5.00 GBP + 10.00 USD * 0.8
        assert_eq!(details.charges, Some(Money::parse("13.00", "GBP").unwrap()));
    }

    #[test]
    fn currency_of_transfer_is_required() {
        let intent = json!({
            "Data": { "Initiation": { "InstructedAmount": { "Amount": "1000.00", "Currency": "GBP" } } }
        });
        let err = InternationalPaymentDecoder.decode(&intent).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField(ref p) if p == "Data.Initiation.CurrencyOfTransfer"));
    }

    #[test]
    fn indicative_section_without_a_numeric_rate_reads_as_absent() {
        let intent = json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "1000.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "USD",
                    "ExchangeRateInformation": { "UnitCurrency": "GBP", "RateType": "Indicative" }
                }
            }
        });
        let ProductDetails::InternationalPayment(details) = InternationalPaymentDecoder.decode(&intent).unwrap()
        else {
            panic!("wrong product");
        };
        assert!(details.exchange_rate.is_none());
    }

    #[test]
    fn foreign_charge_without_a_rate_is_rejected() {
        let intent = json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "1000.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "USD"
                },
                "Charges": [{ "Amount": { "Amount": "10.00", "Currency": "USD" } }]
            }
        });
        let err = InternationalPaymentDecoder.decode(&intent).unwrap_err();
        assert!(matches!(err, DecodeError::ChargeCurrencyMismatch { .. }));
    }

    #[test]
    fn unknown_rate_type_is_rejected() {
        let intent = json!({
            "Data": {
                "Initiation": {
                    "InstructedAmount": { "Amount": "1000.00", "Currency": "GBP" },
                    "CurrencyOfTransfer": "USD",
                    "ExchangeRateInformation": { "ExchangeRate": 0.8, "RateType": "Guessed" }
                }
            }
        });
        let err = InternationalPaymentDecoder.decode(&intent).unwrap_err();
        assert!(matches!(err, DecodeError::WrongType { expected: "exchange rate type", .. }));
    }
}
