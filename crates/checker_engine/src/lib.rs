//! Checker engine: backend collaborator and async effect execution.
mod engine;
mod service;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use service::{CheckService, CheckSettings, HttpCheckService, DEFAULT_ENDPOINT};
pub use types::{CheckFailure, EngineEvent, FailureKind, RequestId};
