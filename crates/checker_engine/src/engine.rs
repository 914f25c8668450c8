use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use checker_logging::{checker_debug, checker_info};

use crate::service::{CheckService, CheckSettings, HttpCheckService};
use crate::{CheckFailure, EngineEvent, RequestId};

enum EngineCommand {
    Check { request_id: RequestId, query: String },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to set up check service: {0}")]
    Service(#[from] CheckFailure),
    #[error("check engine has stopped")]
    Stopped,
}

/// Runs backend checks on a background tokio runtime.
///
/// Checks are never cancelled once enqueued; completions are delivered in the
/// order they finish.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: CheckSettings) -> Result<Self, EngineError> {
        let service = HttpCheckService::new(settings)?;
        checker_info!("Checking against {}", service.endpoint());
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn CheckService>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("checker-engine-rt")
            .build()?;

        thread::Builder::new()
            .name("checker-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), command, event_tx).await;
                    });
                }
                checker_debug!("Engine command channel closed; shutting down");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    /// Fails only if the worker thread is gone; no completion will follow then.
    pub fn enqueue(
        &self,
        request_id: RequestId,
        query: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Check {
                request_id,
                query: query.into(),
            })
            .map_err(|_| EngineError::Stopped)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    service: &dyn CheckService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Check { request_id, query } => {
            checker_debug!("Check #{} started query_len={}", request_id, query.len());
            let result = service.check(&query).await;
            let _ = event_tx.send(EngineEvent::CheckCompleted { request_id, result });
        }
    }
}
