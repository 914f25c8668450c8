use std::fmt;

use serde_json::Value;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CheckCompleted {
        request_id: RequestId,
        result: Result<Value, CheckFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CheckFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl CheckFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Connect,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
}

impl FailureKind {
    /// True when the backend was never reached or never answered.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::InvalidEndpoint | FailureKind::Connect | FailureKind::Timeout
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}
