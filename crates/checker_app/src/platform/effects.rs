use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use checker_core::{CheckError, CheckRequest, CheckResult, Msg, RequestId};
use checker_engine::{
    CheckFailure, CheckService, CheckSettings, EngineError, EngineEvent, EngineHandle,
};
use checker_logging::{checker_info, checker_warn};
use serde_json::Value;

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: CheckSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?, event_tx))
    }

    pub fn with_service(
        service: Arc<dyn CheckService>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        Ok(Self::with_engine(
            EngineHandle::with_service(service)?,
            event_tx,
        ))
    }

    fn with_engine(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self { engine, event_tx };
        runner.spawn_event_loop(runner.event_tx.clone());
        runner
    }

    pub fn enqueue(&self, request: CheckRequest) {
        checker_info!(
            "Check request_id={} query_len={} kind={:?}",
            request.request_id,
            request.query.as_str().len(),
            request.query.kind()
        );
        if let Err(err) = self
            .engine
            .enqueue(request.request_id, request.query.as_str())
        {
            checker_warn!("Check {} not started: {}", request.request_id, err);
            let _ = self
                .event_tx
                .send(AppEvent::Core(engine_stopped(request.request_id, &err)));
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            match event {
                EngineEvent::CheckCompleted { request_id, result } => {
                    let msg = Msg::CheckCompleted {
                        request_id,
                        outcome: map_outcome(request_id, result),
                    };
                    if event_tx.send(AppEvent::Core(msg)).is_err() {
                        break;
                    }
                }
            }
        });
    }
}

/// Completes a check that never reached the engine, so it does not stay pending.
fn engine_stopped(request_id: RequestId, err: &EngineError) -> Msg {
    Msg::CheckCompleted {
        request_id,
        outcome: Err(CheckError::network(err.to_string())),
    }
}

/// Collapses engine failures into the controller's network/protocol split.
fn map_outcome(
    request_id: RequestId,
    result: Result<Value, CheckFailure>,
) -> Result<CheckResult, CheckError> {
    match result {
        Ok(value) => Ok(CheckResult::new(value)),
        Err(failure) => {
            checker_warn!("Check {} failed: {}", request_id, failure);
            let message = failure.to_string();
            if failure.kind.is_transport() {
                Err(CheckError::network(message))
            } else {
                Err(CheckError::protocol(message))
            }
        }
    }
}
