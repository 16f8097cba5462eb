use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

const PLACEHOLDER_PREFIX: &str = "tmp-";

/// Identifier assigned by the POS service.
///
/// The service sends ids either as JSON strings or as JSON numbers. The
/// textual form is what identifies the record; the numeric flag only makes
/// sure the id is sent back in the shape it arrived in.
#[derive(Debug, Clone, Default)]
pub struct RemoteId {
    value: String,
    numeric: bool,
}

impl RemoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            numeric: false,
        }
    }

    /// Client-side id for a record the server has not confirmed yet.
    pub fn placeholder() -> Self {
        Self::new(format!("{}{}", PLACEHOLDER_PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.starts_with(PLACEHOLDER_PREFIX)
    }

    /// Parse the value of an HTML `<option>` back into an id.
    pub fn from_string(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }
}

impl PartialEq for RemoteId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for RemoteId {}

impl Hash for RemoteId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for RemoteId {
    fn from(value: i64) -> Self {
        Self {
            value: value.to_string(),
            numeric: true,
        }
    }
}

impl Serialize for RemoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(number) = self.value.parse::<i64>() {
                return serializer.serialize_i64(number);
            }
        }
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for RemoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => RemoteId::new(value),
            Raw::Signed(value) => RemoteId::from(value),
            Raw::Unsigned(value) => RemoteId {
                value: value.to_string(),
                numeric: true,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_and_number_ids() {
        let text: RemoteId = serde_json::from_str("\"64f0c2\"").unwrap();
        let number: RemoteId = serde_json::from_str("42").unwrap();

        assert_eq!(text.as_str(), "64f0c2");
        assert_eq!(number.as_str(), "42");
        assert_eq!(number, RemoteId::new("42"));
    }

    #[test]
    fn numeric_ids_are_sent_back_as_numbers() {
        let number: RemoteId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "42");

        let text = RemoteId::new("42");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"42\"");
    }

    #[test]
    fn placeholder_ids_are_recognisable() {
        let id = RemoteId::placeholder();
        assert!(id.is_placeholder());
        assert!(!RemoteId::new("abc").is_placeholder());
        assert_ne!(RemoteId::placeholder(), id);
    }

    #[test]
    fn option_values_parse_to_ids() {
        assert_eq!(RemoteId::from_string(" 7 "), Some(RemoteId::new("7")));
        assert_eq!(RemoteId::from_string(""), None);
    }
}
