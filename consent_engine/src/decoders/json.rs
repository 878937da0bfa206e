//! Null-tolerant field extraction over `serde_json::Value`.
//!
//! All helpers take the `OBIntentObject` envelope root and a dotted path (`"Data.Initiation.InstructedAmount"`).
//! An absent or `null` node reads as `None`; a node that is present with the wrong JSON type is an error naming the
//! full dotted path, so a TPP can be told exactly which field of their registered intent is malformed.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rcs_common::Money;
use rust_decimal::Decimal;
use serde_json::Value;

use super::DecodeError;
use crate::ob_types::AccountIdentification;

pub(crate) fn walk<'a>(v: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = v;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

pub(crate) fn required<'a>(v: &'a Value, path: &str) -> Result<&'a Value, DecodeError> {
    walk(v, path).ok_or_else(|| DecodeError::MissingField(path.to_string()))
}

pub(crate) fn opt_str<'a>(v: &'a Value, path: &str) -> Result<Option<&'a str>, DecodeError> {
    match walk(v, path) {
        None => Ok(None),
        Some(node) => {
            node.as_str().map(Some).ok_or_else(|| DecodeError::WrongType { path: path.to_string(), expected: "string" })
        },
    }
}

pub(crate) fn req_str<'a>(v: &'a Value, path: &str) -> Result<&'a str, DecodeError> {
    opt_str(v, path)?.ok_or_else(|| DecodeError::MissingField(path.to_string()))
}

pub(crate) fn opt_string(v: &Value, path: &str) -> Result<Option<String>, DecodeError> {
    Ok(opt_str(v, path)?.map(str::to_string))
}

pub(crate) fn req_string(v: &Value, path: &str) -> Result<String, DecodeError> {
    Ok(req_str(v, path)?.to_string())
}

pub(crate) fn opt_date_time(v: &Value, path: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
    match opt_str(v, path)? {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| DecodeError::InvalidDateTime { path: path.to_string(), reason: e.to_string() }),
    }
}

pub(crate) fn req_date_time(v: &Value, path: &str) -> Result<DateTime<Utc>, DecodeError> {
    opt_date_time(v, path)?.ok_or_else(|| DecodeError::MissingField(path.to_string()))
}

/// Reads an Open Banking amount object (`{"Amount": "...", "Currency": "..."}`) at `path`.
pub(crate) fn opt_amount(v: &Value, path: &str) -> Result<Option<Money>, DecodeError> {
    if walk(v, path).is_none() {
        return Ok(None);
    }
    let amount = req_str(v, &format!("{path}.Amount"))?;
    let currency = req_str(v, &format!("{path}.Currency"))?;
    Money::parse(amount, currency)
        .map(Some)
        .map_err(|e| DecodeError::InvalidAmount { path: format!("{path}.Amount"), reason: e.to_string() })
}

pub(crate) fn req_amount(v: &Value, path: &str) -> Result<Money, DecodeError> {
    opt_amount(v, path)?.ok_or_else(|| DecodeError::MissingField(path.to_string()))
}

/// Reads a decimal that may be carried as a JSON number or a string (`ControlSum` is a number on the wire, amounts
/// within strings elsewhere).
pub(crate) fn opt_decimal(v: &Value, path: &str) -> Result<Option<Decimal>, DecodeError> {
    let Some(node) = walk(v, path) else {
        return Ok(None);
    };
    let repr = match node {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(DecodeError::WrongType { path: path.to_string(), expected: "decimal" }),
    };
    Decimal::from_str(&repr)
        .map(Some)
        .map_err(|e| DecodeError::InvalidAmount { path: path.to_string(), reason: e.to_string() })
}

pub(crate) fn req_str_array(v: &Value, path: &str) -> Result<Vec<String>, DecodeError> {
    let node = required(v, path)?;
    let items = node
        .as_array()
        .ok_or_else(|| DecodeError::WrongType { path: path.to_string(), expected: "array of strings" })?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| DecodeError::WrongType { path: path.to_string(), expected: "array of strings" })
        })
        .collect()
}

pub(crate) fn opt_account(v: &Value, path: &str) -> Result<Option<AccountIdentification>, DecodeError> {
    if walk(v, path).is_none() {
        return Ok(None);
    }
    let account = AccountIdentification {
        scheme_name: req_string(v, &format!("{path}.SchemeName"))?,
        identification: req_string(v, &format!("{path}.Identification"))?,
        name: opt_string(v, &format!("{path}.Name"))?,
        secondary_identification: opt_string(v, &format!("{path}.SecondaryIdentification"))?,
    };
    Ok(Some(account))
}

pub(crate) fn req_account(v: &Value, path: &str) -> Result<AccountIdentification, DecodeError> {
    opt_account(v, path)?.ok_or_else(|| DecodeError::MissingField(path.to_string()))
}

/// Re-anchors an error raised relative to a nested node (typically an array element) at its full dotted path.
pub(crate) fn prefixed(e: DecodeError, prefix: &str) -> DecodeError {
    let full = |path: String| format!("{prefix}.{path}");
    match e {
        DecodeError::MissingField(path) => DecodeError::MissingField(full(path)),
        DecodeError::WrongType { path, expected } => DecodeError::WrongType { path: full(path), expected },
        DecodeError::InvalidAmount { path, reason } => DecodeError::InvalidAmount { path: full(path), reason },
        DecodeError::InvalidDateTime { path, reason } => DecodeError::InvalidDateTime { path: full(path), reason },
        other => other,
    }
}
