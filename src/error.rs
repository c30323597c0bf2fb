use serde::Deserialize;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. `message` and `error` are
    /// the matching JSON fields of the body, when present.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    /// A 2xx body that did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Error bodies seen from the backend: `{message}` on validation failures
/// and `{error}` elsewhere.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Builds a `Status` error, pulling the server's text out of `body`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let clean = |field: Option<String>| {
            field
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
        };
        ApiError::Status {
            status,
            message: clean(parsed.message),
            error: clean(parsed.error),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// True when the server received the request and answered.
    pub fn server_responded(&self) -> bool {
        !self.is_network()
    }

    /// The body's `message`, falling back to `error`. Form submissions
    /// report validation failures this way.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, error, .. } => {
                message.as_deref().or(error.as_deref())
            }
            _ => None,
        }
    }

    /// The body's `error`, falling back to `message`. Payment conflicts are
    /// reported this way.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, error, .. } => {
                error.as_deref().or(message.as_deref())
            }
            _ => None,
        }
    }

    /// The string a view shows: the server's own message when it sent one,
    /// otherwise `rejected` for answered requests and `unreachable` for
    /// network failures.
    pub fn user_message(&self, rejected: &str, unreachable: &str) -> String {
        match self {
            ApiError::Network(_) => unreachable.to_string(),
            _ => self.server_message().unwrap_or(rejected).to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => ApiError::Decode(err.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_prefers_message_field() {
        let err = ApiError::from_status(400, r#"{"message": "Cost must be positive"}"#);
        assert_eq!(err.server_message(), Some("Cost must be positive"));
    }

    #[test]
    fn status_falls_back_to_error_field() {
        let err = ApiError::from_status(409, r#"{"error": "Already paid"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 409,
                message: None,
                error: Some("Already paid".to_string())
            }
        );
        assert_eq!(err.server_message(), Some("Already paid"));
    }

    #[test]
    fn each_reader_prefers_its_own_field() {
        let err = ApiError::from_status(
            409,
            r#"{"message": "Conflict", "error": "Already paid"}"#,
        );
        assert_eq!(err.server_message(), Some("Conflict"));
        assert_eq!(err.server_error(), Some("Already paid"));
    }

    #[test]
    fn status_without_json_body_has_no_message() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("rejected", "offline"), "rejected");
    }

    #[test]
    fn network_errors_use_unreachable_text() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(!err.server_responded());
        assert_eq!(err.user_message("rejected", "offline"), "offline");
    }

    #[test]
    fn decode_errors_count_as_answered() {
        let err = ApiError::Decode("expected an array".to_string());
        assert!(err.server_responded());
        assert_eq!(err.user_message("rejected", "offline"), "rejected");
    }
}
