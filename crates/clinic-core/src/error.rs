//! Error types for API calls

use serde_json::Value;

use crate::validation::FieldErrors;

/// Errors surfaced by calls to the clinic's REST API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Too many requests")]
    RateLimited,

    #[error("Server error (status {status})")]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed (status {status})")]
    Unknown { status: u16, message: Option<String> },
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// A form submission failure: either field-level validation problems
/// (never sent over the network) or an API error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Validation failed")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ApiError {
    /// Message the server attached to the failure, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } | ApiError::Unknown { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// User-facing message for login/signup failures
    pub fn auth_message(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "Invalid email or password",
            ApiError::NotFound => "No account found with this email",
            ApiError::Forbidden => "This account has been disabled",
            ApiError::RateLimited => "Too many attempts. Please try again later.",
            ApiError::Server { .. } => "Server error. Please try again later.",
            ApiError::Network(_) => "Unable to reach the server. Check your connection and try again.",
            ApiError::Unknown { .. } => "Something went wrong. Please try again.",
        }
    }

    /// User-facing message for appointment operations. Prefers the
    /// server's own message, falling back to the given default.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized => "Authentication failed. Please login again.".to_string(),
            ApiError::Forbidden => "Access denied. Please check your permissions.".to_string(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// Map a non-2xx response to an [`ApiError`], pulling the server's
/// `message` (or `error`) field out of the body when present.
pub fn classify_response(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        429 => ApiError::RateLimited,
        500..=599 => ApiError::Server {
            status,
            message: extract_message(body),
        },
        _ => ApiError::Unknown {
            status,
            message: extract_message(body),
        },
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_maps_auth_statuses() {
        assert_eq!(classify_response(401, ""), ApiError::Unauthorized);
        assert_eq!(classify_response(403, ""), ApiError::Forbidden);
        assert_eq!(classify_response(404, ""), ApiError::NotFound);
        assert_eq!(classify_response(429, ""), ApiError::RateLimited);
    }

    #[test]
    fn classify_extracts_server_message() {
        let err = classify_response(500, r#"{"message": "database down"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: Some("database down".to_string())
            }
        );
    }

    #[test]
    fn classify_accepts_error_field() {
        let err = classify_response(422, r#"{"error": "bad date"}"#);
        assert_eq!(err.server_message(), Some("bad date"));
    }

    #[test]
    fn classify_tolerates_non_json_body() {
        let err = classify_response(502, "Bad Gateway");
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                message: None
            }
        );
    }

    #[test]
    fn auth_messages_follow_status() {
        assert_eq!(
            ApiError::Unauthorized.auth_message(),
            "Invalid email or password"
        );
        assert_eq!(
            ApiError::Forbidden.auth_message(),
            "This account has been disabled"
        );
        assert_eq!(
            ApiError::Network("offline".to_string()).auth_message(),
            "Unable to reach the server. Check your connection and try again."
        );
    }

    #[test]
    fn user_message_prefers_server_detail() {
        let err = ApiError::Unknown {
            status: 400,
            message: Some("slot already taken".to_string()),
        };
        assert_eq!(err.user_message("fallback"), "slot already taken");

        let err = ApiError::Network("timeout".to_string());
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
