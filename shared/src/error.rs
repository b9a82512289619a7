use thiserror::Error;

/// Failure reported by the remote backend or by the transport in front of it.
///
/// Remote calls never panic across the fetch boundary; every operation on
/// [`crate::remote::TableClient`] and [`crate::remote::AuthClient`] returns
/// this type instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status without a structured error body.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Structured error returned by the backend.
    #[error("backend error {code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// A singleton fetch matched zero or several rows.
    #[error("expected exactly one row, got {rows}")]
    NotSingle { rows: usize },

    /// The call needs a signed-in session.
    #[error("not signed in")]
    Unauthorized,
}

impl BackendError {
    /// `true` when the failure means "nothing matched", which pages render as
    /// a not-found state rather than an error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotSingle { rows: 0 })
            || matches!(self, BackendError::Http { status: 404, .. })
    }

    /// Human-readable message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api {
                message, ..
            }
            | BackendError::Http {
                message, ..
            } if !message.trim().is_empty() => message.clone(),
            BackendError::Network(_) => "Network error, please try again".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::BackendError;

    #[test]
    fn zero_row_singleton_is_not_found() {
        assert!(BackendError::NotSingle { rows: 0 }.is_not_found());
        assert!(!BackendError::NotSingle { rows: 2 }.is_not_found());
        assert!(!BackendError::Network("offline".into()).is_not_found());
    }

    #[test]
    fn user_message_prefers_backend_text() {
        let err = BackendError::Api {
            status: 400,
            code: "invalid_credentials".into(),
            message: "Invalid login credentials".into(),
        };
        assert_eq!(err.user_message(), "Invalid login credentials");
    }
}
