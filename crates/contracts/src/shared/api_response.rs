use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status block every POS endpoint returns next to its payload.
///
/// Older endpoints report `status: "success"`, newer ones `success: true`;
/// a few send `status: true` or the HTTP code. All of them count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        if self.success == Some(true) {
            return true;
        }
        match &self.status {
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("success"),
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_u64() == Some(200),
            _ => false,
        }
    }

    /// Ok when the call succeeded, otherwise the server's message verbatim.
    pub fn check(&self, fallback: &str) -> Result<(), String> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// `{status, data, message}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(flatten)]
    pub meta: ApiStatus,
    #[serde(default)]
    pub data: Option<T>,
}
