use serde_json::Value;
use thiserror::Error;

/// Failure before any HTTP status was received
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Could not build HTTP client: {0}")]
    Client(String),
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors surfaced by [`crate::api::ApiClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the backend. The client has already expired the session.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("authentication required"))]
    Unauthorized { message: Option<String> },
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its JSON body.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
        let message = field("message");

        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status {
                status,
                error: field("error"),
                message,
            }
        }
    }

    /// Text for the alert banner: the server's message, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized {
                message: Some(message),
            }
            | ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::from_response(
            409,
            &json!({"error": "Email already exists", "message": "A user with this email already exists"}),
        );
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            err.user_message("Registration failed"),
            "A user with this email already exists"
        );
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::from_response(500, &Value::Null);
        assert_eq!(err.user_message("Failed to save patient"), "Failed to save patient");

        let err = ApiError::Transport(TransportError::Request("connection refused".into()));
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_unauthorized_mapping() {
        let err = ApiError::from_response(401, &json!({"message": "Invalid email or password"}));
        assert!(err.is_session_expired());
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");

        let err = ApiError::from_response(401, &json!({"msg": "Token has expired"}));
        assert!(err.is_session_expired());
        assert_eq!(err.user_message("Failed to load doctors"), "Failed to load doctors");
        assert!(!ApiError::from_response(403, &Value::Null).is_session_expired());
    }
}
