use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend on non-2xx responses.
///
/// The service is inconsistent about which field it fills: validation
/// failures carry `error`, unexpected failures carry `status` + `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackendErrorBody {
    /// Best-effort human readable detail, preferring `message` over `error`.
    pub fn detail(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// Parses a raw response body, falling back to the trimmed text itself.
    pub fn describe(raw: &str) -> String {
        match serde_json::from_str::<BackendErrorBody>(raw) {
            Ok(body) => match body.detail() {
                Some(detail) => detail.to_string(),
                None => raw.trim().to_string(),
            },
            Err(_) => raw.trim().to_string(),
        }
    }
}

/// A response body that decoded as JSON but does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("response is missing the `result` field")]
    MissingResult,
    #[error("response `result` field is null")]
    NullResult,
    #[error("response reported status `{status}`")]
    UnsuccessfulStatus { status: String },
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_validation_error_body() {
        assert_eq!(
            BackendErrorBody::describe(r#"{"error":"No data provided"}"#),
            "No data provided"
        );
    }

    #[test]
    fn prefers_message_over_error_field() {
        let raw = r#"{"status":"error","message":"overflow in engine","error":"ignored"}"#;
        assert_eq!(BackendErrorBody::describe(raw), "overflow in engine");
    }

    #[test]
    fn falls_back_to_raw_text_for_non_json_bodies() {
        assert_eq!(
            BackendErrorBody::describe("  <html>502 Bad Gateway</html>\n"),
            "<html>502 Bad Gateway</html>"
        );
    }
}
