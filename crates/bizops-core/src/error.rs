//! Error types shared by the API client and the domain helpers.

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure talking to the REST backend or local storage.
///
/// Errors are shown to the user at the call site; nothing here is fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired or not authorized")]
    Unauthorized,

    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Build an error from an HTTP status and the server's `message` body
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// 404s and any error whose message says "not found"; these are never retried
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_)) || self.to_string().to_ascii_lowercase().contains("not found")
    }

    /// Text for the dismissible error banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Cannot reach the server. Check your connection and try again.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("The server returned an error ({}).", status),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies() {
        assert_eq!(ApiError::from_status(401, "x"), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(404, "Item 7"), ApiError::NotFound("Item 7".into()));
        assert!(matches!(ApiError::from_status(500, "boom"), ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_not_found_detected_from_message() {
        assert!(ApiError::NotFound("x".into()).is_not_found());
        assert!(ApiError::Status { status: 400, message: "Part Not Found in catalog".into() }.is_not_found());
        assert!(!ApiError::Network("timeout".into()).is_not_found());
    }

    #[test]
    fn test_user_message() {
        let err = ApiError::Status { status: 422, message: "Quantity too large".into() };
        assert_eq!(err.user_message(), "Quantity too large");
        let err = ApiError::Status { status: 502, message: String::new() };
        assert_eq!(err.user_message(), "The server returned an error (502).");
    }
}
