use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

//--------------------------------------      Money       -------------------------------------------------------------

/// A monetary amount in a specific ISO 4217 currency.
///
/// Open Banking payloads carry amounts as decimal strings (`{"Amount": "1000.00", "Currency": "GBP"}`), so `Money`
/// (de)serializes to and from that wire shape. Arithmetic on amounts in different currencies is always an error;
/// there is no implicit conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

#[derive(Debug, Clone, Error)]
pub enum MoneyError {
    #[error("'{0}' is not a valid monetary amount")]
    InvalidAmount(String),
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self { amount, currency: currency.into() }
    }

    /// Parses an Open Banking decimal amount string, e.g. `Money::parse("1000.00", "GBP")`.
    pub fn parse(amount: &str, currency: impl Into<String>) -> Result<Self, MoneyError> {
        let amount = Decimal::from_str(amount).map_err(|_| MoneyError::InvalidAmount(amount.to_string()))?;
        Ok(Self { amount, currency: currency.into() })
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self { amount: Decimal::ZERO, currency: currency.into() }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Adds two amounts. Currency codes must match exactly, otherwise `MoneyError::CurrencyMismatch` is returned.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(Money { amount: self.amount + other.amount, currency: self.currency.clone() })
    }

    /// Re-denominates this amount into the rate's target currency by flat multiplication.
    ///
    /// The amount must be denominated in the rate's source currency.
    pub fn convert(&self, rate: &ExchangeRate) -> Result<Money, MoneyError> {
        if self.currency != rate.source_currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: rate.source_currency.clone(),
            });
        }
        Ok(Money { amount: self.amount * rate.rate, currency: rate.target_currency.clone() })
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// The UK Open Banking wire shape for amounts.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MoneyWire {
    amount: String,
    currency: String,
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        MoneyWire { amount: self.amount.to_string(), currency: self.currency.clone() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        let wire = MoneyWire::deserialize(deserializer)?;
        Money::parse(&wire.amount, wire.currency).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------    ExchangeRate    -----------------------------------------------------------

/// A flat conversion rate between two currencies, as carried on an international payment intent's
/// `ExchangeRateInformation` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub rate: Decimal,
    pub source_currency: String,
    pub target_currency: String,
    pub rate_type: RateType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_identification: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateType {
    Actual,
    Agreed,
    Indicative,
}

impl Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateType::Actual => write!(f, "Actual"),
            RateType::Agreed => write!(f, "Agreed"),
            RateType::Indicative => write!(f, "Indicative"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("'{0}' is not a valid exchange rate type")]
pub struct RateTypeParseError(String);

impl FromStr for RateType {
    type Err = RateTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Actual" => Ok(Self::Actual),
            "Agreed" => Ok(Self::Agreed),
            "Indicative" => Ok(Self::Indicative),
            s => Err(RateTypeParseError(s.to_string())),
        }
    }
}
