use crate::view_model::{StatusView, ViewModel};
use crate::{CheckError, CheckRequest, CheckResult, Query, RequestId, RequestState, ValidationError};

/// Whether a backend completion changed the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Owns the lifecycle of one outstanding query.
///
/// Every submission gets a fresh, strictly increasing request id. A completion
/// is applied only while the state is still `Pending` for `latest_request_id`,
/// so a slow superseded response can never overwrite a newer result, and a
/// response arriving after [`reset`](Self::reset) cannot revive old state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionController {
    input: String,
    latest_request_id: RequestId,
    state: RequestState,
    dirty: bool,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a check for `text`. The returned request must be executed by the
    /// caller; its completion goes to [`on_collaborator_result`](Self::on_collaborator_result).
    pub fn submit(&mut self, text: &str) -> Result<CheckRequest, ValidationError> {
        let query = Query::parse(text)?;
        let request_id = self.latest_request_id + 1;
        self.latest_request_id = request_id;
        self.state = RequestState::Pending {
            query: query.clone(),
            request_id,
        };
        self.dirty = true;
        Ok(CheckRequest { request_id, query })
    }

    pub fn on_collaborator_result(
        &mut self,
        request_id: RequestId,
        outcome: Result<CheckResult, CheckError>,
    ) -> Completion {
        if request_id != self.latest_request_id {
            return Completion::Stale;
        }
        let query = match &self.state {
            RequestState::Pending {
                query,
                request_id: pending,
            } if *pending == request_id => query.clone(),
            _ => return Completion::Stale,
        };

        self.state = match outcome {
            Ok(result) => RequestState::Succeeded {
                query,
                request_id,
                result,
            },
            Err(error) => RequestState::Failed {
                query,
                request_id,
                error,
            },
        };
        self.dirty = true;
        Completion::Applied
    }

    /// Returns to `Idle`. The in-flight request, if any, keeps running but its
    /// completion will be stale.
    pub fn reset(&mut self) {
        if self.state != RequestState::Idle {
            self.state = RequestState::Idle;
            self.dirty = true;
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state.clone()
    }

    pub fn latest_request_id(&self) -> RequestId {
        self.latest_request_id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> ViewModel {
        let status = match &self.state {
            RequestState::Idle => StatusView::Idle,
            RequestState::Pending { query, request_id } => StatusView::Pending {
                request_id: *request_id,
                query: query.as_str().to_owned(),
                kind: query.kind(),
            },
            RequestState::Succeeded {
                query,
                request_id,
                result,
            } => StatusView::Succeeded {
                request_id: *request_id,
                query: query.as_str().to_owned(),
                query_kind: query.kind(),
                result: result.clone(),
            },
            RequestState::Failed {
                query,
                request_id,
                error,
            } => StatusView::Failed {
                request_id: *request_id,
                query: query.as_str().to_owned(),
                query_kind: query.kind(),
                kind: error.kind,
                message: error.message.clone(),
            },
        };
        ViewModel {
            input: self.input.clone(),
            status,
            latest_request_id: self.latest_request_id,
        }
    }
}
