//! Tolerant field decoders for third-party payloads.
//!
//! Upstream APIs mix numbers and numeric strings, send `null` for missing
//! values and occasionally ship garbage (`"NaN"`, `"-"`) in numeric fields.
//! Each helper here accepts any JSON value and degrades to `None` (or an
//! empty list) when the value cannot be represented, so one bad field never
//! fails a whole payload. Use them with `#[serde(default, deserialize_with = ...)]`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(deserializer)
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

pub fn value_to_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn f64_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(value_to_f64))
}

pub fn decimal_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(value_to_decimal))
}

pub fn i32_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(value_to_i32))
}

pub fn string_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(value_to_string))
}

pub fn bool_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

/// RFC 3339 timestamp, `None` when absent or malformed.
pub fn datetime_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

/// List of strings; non-string entries are dropped, anything but an array is `None`.
pub fn string_vec_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(Value::Array(items)) => Some(items.iter().filter_map(value_to_string).collect()),
        _ => None,
    })
}

pub fn string_vec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(string_vec_opt(deserializer)?.unwrap_or_default())
}

/// JSON object or array kept verbatim, `None` for scalars and `null`.
pub fn json_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Ok(raw(deserializer)?.filter(|v| v.is_object() || v.is_array()))
}

/// List whose unparseable entries are skipped instead of failing the payload.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let Some(Value::Array(items)) = raw(deserializer)? else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        tracing::warn!(
            skipped = total - parsed.len(),
            total,
            "dropped undecodable entries from response list"
        );
    }
    Ok(parsed)
}

/// Top-level JSON array decoded with [`skip_invalid`].
#[derive(Debug, Deserialize)]
#[serde(transparent, bound = "T: serde::de::DeserializeOwned")]
pub struct LenientList<T>(#[serde(deserialize_with = "skip_invalid")] pub Vec<T>);
