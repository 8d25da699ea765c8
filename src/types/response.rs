//! Response envelope
//!
//! Every JSON body the API produces is an [`Envelope`]: either an `error`
//! message or a `data` payload. Empty members are omitted.

use serde::{Deserialize, Serialize};

/// `{"error"?: string, "data"?: any}` wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Wrap a payload
    pub fn data(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }

    /// Wrap an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_data() {
        let envelope = Envelope::<()>::error("boom");
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_data_envelope_omits_error() {
        let envelope = Envelope::data(vec![1, 2, 3]);
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"data":[1,2,3]}"#);
    }

    #[test]
    fn test_empty_list_is_kept() {
        let envelope = Envelope::data(Vec::<String>::new());
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"data":[]}"#);
    }

    #[test]
    fn test_error_envelope_deserializes_without_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"error":"missing"}"#).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("missing"));
        assert!(envelope.data.is_none());
    }
}
