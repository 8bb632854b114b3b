use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Error response returned by the provider, kept as received.
    #[error("Provider error {code} ({kind}): {message}")]
    Provider {
        code: u16,
        kind: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Body of a provider error response.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
    #[serde(default)]
    code: u16,
    #[serde(rename = "type", default)]
    kind: String,
}

impl AppError {
    pub fn provider<K: Into<String>, M: Into<String>>(code: u16, kind: K, message: M) -> Self {
        Self::Provider {
            code,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Builds a provider error from a non-2xx response body.
    ///
    /// Falls back to the raw body when it is not the provider's JSON error shape.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ProviderErrorBody>(body) {
            Ok(parsed) => Self::Provider {
                code: if parsed.code == 0 { status } else { parsed.code },
                kind: parsed.kind,
                message: parsed.message,
            },
            Err(_) => Self::Provider {
                code: status,
                kind: "unknown".to_string(),
                message: body.trim().to_string(),
            },
        }
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Provider { code, .. } => Some(*code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The resource already exists (HTTP 409).
    pub fn is_conflict(&self) -> bool {
        self.code() == Some(409)
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_parses_provider_body() {
        let body = r#"{"message":"Collection with the requested ID already exists.","code":409,"type":"collection_already_exists","version":"1.5.7"}"#;
        let err = AppError::from_response(409, body);

        assert!(err.is_conflict());
        match err {
            AppError::Provider { kind, message, .. } => {
                assert_eq!(kind, "collection_already_exists");
                assert!(message.contains("already exists"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_response_falls_back_to_raw_body() {
        let err = AppError::from_response(502, "  Bad Gateway ");
        assert_eq!(err.code(), Some(502));
        assert_eq!(err.to_string(), "Provider error 502 (unknown): Bad Gateway");
    }

    #[test]
    fn test_not_found_is_not_conflict() {
        let err = AppError::provider(404, "document_not_found", "Document not found");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
        assert_eq!(AppError::config("missing key").code(), None);
    }
}
