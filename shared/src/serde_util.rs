//! Lenient numeric deserializers
//!
//! Aggregate endpoints return `COUNT`/`SUM` columns that arrive as JSON
//! numbers, numeric strings, or `null` when nothing matched.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Integer from a number, a numeric string, or `null` (= 0)
pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match Option::<IntOrString>::deserialize(d)? {
        None => Ok(0),
        Some(IntOrString::Int(v)) => Ok(v),
        Some(IntOrString::Str(s)) if s.trim().is_empty() => Ok(0),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer: {}", s))),
    }
}

/// Decimal from a number, a numeric string, or `null` (= 0)
pub fn lenient_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    Ok(Option::<Decimal>::deserialize(d)?.unwrap_or_default())
}
