use crate::{CheckError, CheckResult, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the query input box.
    InputChanged(String),
    /// User submitted the current input for checking.
    Submitted,
    /// User cleared the input.
    ResetRequested,
    /// Backend completion for a previously issued check.
    CheckCompleted {
        request_id: RequestId,
        outcome: Result<CheckResult, CheckError>,
    },
}
