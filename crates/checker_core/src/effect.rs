use crate::{Query, RequestId, ValidationError};

/// A backend check the caller must run and report back via
/// [`crate::Msg::CheckCompleted`] with the same `request_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub request_id: RequestId,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Check(CheckRequest),
    InputRejected(ValidationError),
}
