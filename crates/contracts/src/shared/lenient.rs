//! Tolerant deserializers for fields the POS service does not type consistently.
//!
//! Money arrives as decimal strings or bare numbers, optional text fields are
//! sometimes `null` and sometimes numbers, and status flags may be missing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decimal amount kept as text. Numbers are rendered, anything else is "0".
pub fn money<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => "0".to_string(),
    })
}

/// Boolean flag; anything that is not a JSON boolean becomes `None`.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// Free text; numbers are kept as their textual form, `null` becomes empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Small integer code sent either as a number or a numeric string.
pub fn code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u8::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Non-negative count; `null`, negatives and junk become 0.
pub fn count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| usize::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// List payload that failure replies send as `null`.
pub fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default = "zero", deserialize_with = "money")]
        amount: String,
        #[serde(default, deserialize_with = "flag")]
        status: Option<bool>,
        #[serde(default, deserialize_with = "code")]
        kind: u8,
        #[serde(default, deserialize_with = "optional_text")]
        note: Option<String>,
    }

    fn zero() -> String {
        "0".to_string()
    }

    #[test]
    fn tolerates_mixed_shapes() {
        let sample: Sample =
            serde_json::from_str(r#"{"amount": 12.5, "status": "yes", "kind": "3", "note": 7}"#)
                .unwrap();
        assert_eq!(sample.amount, "12.5");
        assert_eq!(sample.status, None);
        assert_eq!(sample.kind, 3);
        assert_eq!(sample.note.as_deref(), Some("7"));
    }

    #[derive(Deserialize)]
    struct Listing {
        #[serde(default, deserialize_with = "vec_or_null")]
        items: Vec<u32>,
        #[serde(default, deserialize_with = "count")]
        total: usize,
    }

    #[test]
    fn null_lists_and_counts_become_empty() {
        let listing: Listing = serde_json::from_str(r#"{"items": null, "total": null}"#).unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.total, 0);

        let listing: Listing = serde_json::from_str(r#"{"items": [4], "total": "12"}"#).unwrap();
        assert_eq!(listing.items, vec![4]);
        assert_eq!(listing.total, 12);
    }

    #[test]
    fn missing_fields_fall_back() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.amount, "0");
        assert_eq!(sample.status, None);
        assert_eq!(sample.kind, 0);
        assert_eq!(sample.note, None);
    }
}
