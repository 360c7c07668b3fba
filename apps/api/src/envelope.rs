//! Uniform response envelope.
//!
//! Every endpoint answers with the same shape, so clients branch on
//! `status` alone:
//!
//! ```json
//! { "status": "success", "message": "Books retrieved", "data": [ ... ] }
//! { "status": "error",   "message": "No user found",   "data": null }
//! ```

use serde::{Deserialize, Serialize};

/// Envelope wrapping every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// "success" or "error"
    pub status: String,

    /// Human-readable outcome description
    pub message: String,

    /// Payload on success, `null` on error
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Builds a success envelope with a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Envelope {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Builds an error envelope. `data` is always `null`.
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let env = Envelope::success("Books retrieved", vec![1, 2, 3]);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Books retrieved");
        assert_eq!(json["data"][0], 1);
    }

    #[test]
    fn test_error_shape_has_null_data() {
        let env = Envelope::<()>::error("No user found");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["data"].is_null());
    }
}
