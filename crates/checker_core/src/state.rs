use std::fmt;

use serde_json::Value;

use crate::Query;

pub type RequestId = u64;

/// Opaque JSON payload returned by the backend on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult(Value);

impl CheckResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Best-effort extraction of the fields the reference backend returns.
    /// Anything missing or of an unexpected type is left as `None`.
    pub fn summary(&self) -> CheckSummary {
        let field_str = |name: &str| {
            self.0
                .get(name)
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        };
        CheckSummary {
            status: field_str("status"),
            url_checked: field_str("url_checked"),
            verdict: field_str("verdict"),
            is_true: self.0.get("is_true").and_then(Value::as_bool),
            truth_percentage: self.0.get("truth_percentage").and_then(Value::as_f64),
            justification: field_str("justification"),
        }
    }
}

impl From<Value> for CheckResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckSummary {
    pub status: Option<String>,
    pub url_checked: Option<String>,
    pub verdict: Option<String>,
    pub is_true: Option<bool>,
    pub truth_percentage: Option<f64>,
    pub justification: Option<String>,
}

impl CheckSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend could not be reached (connect failure, timeout).
    Network,
    /// The backend answered, but not with something usable.
    Protocol,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Protocol => write!(f, "protocol error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CheckError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending {
        query: Query,
        request_id: RequestId,
    },
    Succeeded {
        query: Query,
        request_id: RequestId,
        result: CheckResult,
    },
    Failed {
        query: Query,
        request_id: RequestId,
        error: CheckError,
    },
}

impl RequestState {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RequestState::Idle => None,
            RequestState::Pending { request_id, .. }
            | RequestState::Succeeded { request_id, .. }
            | RequestState::Failed { request_id, .. } => Some(*request_id),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }
}
