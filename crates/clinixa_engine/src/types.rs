use std::fmt;

pub const SERVER_UNREACHABLE: &str =
    "Cannot connect to server. Please make sure the backend is running.";
pub const TIMED_OUT: &str = "The analysis service did not respond in time. Please try again.";
pub const ANALYSIS_FALLBACK: &str = "Failed to analyze symptoms";
pub const MALFORMED_RESPONSE: &str = "Failed to analyze symptoms. Please try again.";
pub const HEALTH_CHECK_FAILED: &str = "Server health check failed";

/// A failed call to the analysis service.
///
/// `message` carries the underlying cause for logs. Only [`TransportError::user_message`]
/// is meant for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self.kind {
            FailureKind::Unreachable => SERVER_UNREACHABLE.to_string(),
            FailureKind::Timeout => TIMED_OUT.to_string(),
            // Already the service's `detail` or the fallback text.
            FailureKind::Application { .. } => self.message.clone(),
            FailureKind::MalformedResponse => MALFORMED_RESPONSE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response at all (connection refused, DNS, reset).
    Unreachable,
    /// Configured request timeout elapsed.
    Timeout,
    /// Service answered with a non-success status.
    Application { status: u16 },
    /// Success status, but the body was not the expected JSON.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unreachable => write!(f, "server unreachable"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Application { status } => write!(f, "http status {status}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
