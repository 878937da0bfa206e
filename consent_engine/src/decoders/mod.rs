//! # Intent decoders
//!
//! Every consent stores the TPP-supplied `OBIntentObject` JSON envelope verbatim. The payload is loosely typed:
//! which fields exist, and which of them are optional, depends entirely on the payment product. The decoders in this
//! module walk that JSON and produce the strongly typed [`ProductDetails`] shown to the user on the consent UI.
//!
//! Each product has its own decoder. They share the [`json`] field-extraction helpers (null-tolerant descent with
//! dotted-path error reporting) and the [`charges`] aggregation rules (checked multi-charge summation, with FX
//! conversion on the international products).
//!
//! Decoder selection is a dictionary lookup: [`DecoderRegistry`] maps an [`IntentType`] tag (derived from the consent
//! id prefix) to the decoder responsible for it.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::ob_types::IntentType;

mod account_access;
mod charges;
mod domestic_payment;
mod domestic_scheduled_payment;
mod domestic_standing_order;
mod domestic_vrp;
mod file_payment;
mod funds_confirmation;
mod international_payment;
mod international_scheduled_payment;
mod international_standing_order;
mod json;
mod product_details;

pub use account_access::AccountAccessDecoder;
pub use domestic_payment::DomesticPaymentDecoder;
pub use domestic_scheduled_payment::DomesticScheduledPaymentDecoder;
pub use domestic_standing_order::DomesticStandingOrderDecoder;
pub use domestic_vrp::DomesticVrpDecoder;
pub use file_payment::FilePaymentDecoder;
pub use funds_confirmation::FundsConfirmationDecoder;
pub use international_payment::InternationalPaymentDecoder;
pub use international_scheduled_payment::InternationalScheduledPaymentDecoder;
pub use international_standing_order::InternationalStandingOrderDecoder;
pub use product_details::{
    AccountAccessDetails,
    DomesticPaymentDetails,
    DomesticScheduledPaymentDetails,
    DomesticStandingOrderDetails,
    DomesticVrpDetails,
    FilePaymentDetails,
    FundsConfirmationDetails,
    InternationalPaymentDetails,
    InternationalScheduledPaymentDetails,
    InternationalStandingOrderDetails,
    PeriodicLimit,
    ProductDetails,
    StandingOrderPayment,
};

//--------------------------------------     DecodeError     ----------------------------------------------------------

#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("No intent type matches consent id {0}")]
    UnknownIntentType(String),
    #[error("No decoder is registered for intent type {0}")]
    UnsupportedIntentType(IntentType),
    #[error("Required field {0} is missing from the intent payload")]
    MissingField(String),
    #[error("Field {path} is not a valid {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("Field {path} is not a valid monetary amount: {reason}")]
    InvalidAmount { path: String, reason: String },
    #[error("Field {path} is not a valid RFC3339 date-time: {reason}")]
    InvalidDateTime { path: String, reason: String },
    #[error("Charge currency {charge} cannot be reconciled with the payment currency {payment}")]
    ChargeCurrencyMismatch { charge: String, payment: String },
}

//--------------------------------------    IntentDecoder    ----------------------------------------------------------

/// A single product's `OBIntentObject` → [`ProductDetails`] mapping.
///
/// Decoders are pure functions over the JSON payload. Anything that needs the consent store, the user's accounts or
/// the TPP directory lives in the service layer, not here.
pub trait IntentDecoder: Send + Sync {
    fn intent_type(&self) -> IntentType;

    /// Decodes the `OBIntentObject` envelope. `ob_intent` is the envelope root, i.e. the decoder itself descends into
    /// `Data`.
    fn decode(&self, ob_intent: &Value) -> Result<ProductDetails, DecodeError>;
}

//--------------------------------------   DecoderRegistry   ----------------------------------------------------------

/// Maps each intent type to its decoder. The full registry is built once at startup and injected into the details
/// service.
pub struct DecoderRegistry {
    decoders: HashMap<IntentType, Box<dyn IntentDecoder>>,
}

impl DecoderRegistry {
    /// A registry with all supported product decoders registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(AccountAccessDecoder));
        registry.register(Box::new(DomesticPaymentDecoder));
        registry.register(Box::new(DomesticScheduledPaymentDecoder));
        registry.register(Box::new(DomesticStandingOrderDecoder));
        registry.register(Box::new(InternationalPaymentDecoder));
        registry.register(Box::new(InternationalScheduledPaymentDecoder));
        registry.register(Box::new(InternationalStandingOrderDecoder));
        registry.register(Box::new(FilePaymentDecoder));
        registry.register(Box::new(DomesticVrpDecoder));
        registry.register(Box::new(FundsConfirmationDecoder));
        registry
    }

    pub fn empty() -> Self {
        Self { decoders: HashMap::new() }
    }

    pub fn register(&mut self, decoder: Box<dyn IntentDecoder>) {
        self.decoders.insert(decoder.intent_type(), decoder);
    }

    pub fn decode(&self, intent_type: IntentType, ob_intent: &Value) -> Result<ProductDetails, DecodeError> {
        let decoder = self.decoders.get(&intent_type).ok_or(DecodeError::UnsupportedIntentType(intent_type))?;
        decoder.decode(ob_intent)
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_registry_covers_every_intent_type() {
        let registry = DecoderRegistry::new();
        for intent_type in IntentType::ALL {
            assert!(registry.decoders.contains_key(&intent_type), "no decoder for {intent_type}");
        }
    }

    #[test]
    fn partial_registry_reports_unsupported_types() {
        let mut registry = DecoderRegistry::empty();
        registry.register(Box::new(AccountAccessDecoder));
        let err = registry.decode(IntentType::DomesticPayment, &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "No decoder is registered for intent type DomesticPayment");
    }

    #[test]
    fn registry_dispatches_on_intent_type() {
        let registry = DecoderRegistry::new();
        let intent = json!({
            "Data": {
                "Permissions": ["ReadAccountsBasic"],
            }
        });
        let details = registry.decode(IntentType::AccountAccess, &intent).unwrap();
        assert!(matches!(details, ProductDetails::AccountAccess(_)));
    }
}
