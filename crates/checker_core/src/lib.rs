//! Checker core: pure submission state machine and view-model helpers.
mod controller;
mod effect;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use controller::{Completion, SubmissionController};
pub use effect::{CheckRequest, Effect};
pub use msg::Msg;
pub use query::{Query, QueryKind, Site, ValidationError};
pub use state::{CheckError, CheckResult, CheckSummary, ErrorKind, RequestId, RequestState};
pub use update::update;
pub use view_model::{StatusView, ViewModel};
