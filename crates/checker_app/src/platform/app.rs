use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::Context;
use checker_core::{update, Effect, Msg, RequestId, RequestState, SubmissionController};
use checker_logging::{checker_info, checker_warn};
use chrono::Utc;

use super::cli::OutputMode;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{input, render};

/// Everything the main loop reacts to. Only the main loop touches the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    ShowHelp,
    /// Stdin reached EOF; exit once nothing is in flight.
    InputClosed,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Controller plus the presentation state the event loop keeps between events.
pub struct Session {
    controller: SubmissionController,
    mode: OutputMode,
    submitted: Option<(RequestId, Instant)>,
    input_closed: bool,
}

impl Session {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            controller: SubmissionController::new(),
            mode,
            submitted: None,
            input_closed: false,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.controller.current_state()
    }

    pub fn exit_code(&self) -> ExitCode {
        if matches!(self.controller.current_state(), RequestState::Failed { .. }) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    /// Applies one event: runs `update`, executes its effects, renders if dirty.
    pub fn dispatch(
        &mut self,
        event: AppEvent,
        runner: &EffectRunner,
        out: &mut impl Write,
    ) -> io::Result<Flow> {
        let msg = match event {
            AppEvent::Quit => return Ok(Flow::Exit),
            AppEvent::ShowHelp => {
                write_lines(out, &render::help())?;
                return Ok(Flow::Continue);
            }
            AppEvent::InputClosed => {
                self.input_closed = true;
                return Ok(self.flow());
            }
            AppEvent::Core(msg) => msg,
        };

        let controller = std::mem::take(&mut self.controller);
        let (controller, effects) = update(controller, msg);
        self.controller = controller;

        for effect in effects {
            match effect {
                Effect::Check(request) => {
                    self.submitted = Some((request.request_id, Instant::now()));
                    runner.enqueue(request);
                }
                Effect::InputRejected(err) => {
                    checker_warn!("Input rejected: {}", err);
                    write_lines(out, &render::rejection(&err))?;
                }
            }
        }

        if self.controller.consume_dirty() {
            let view = self.controller.view();
            let elapsed = self
                .submitted
                .filter(|(request_id, _)| *request_id == view.latest_request_id)
                .map(|(_, started)| started.elapsed());
            let context = render::RenderContext {
                mode: self.mode,
                now: Utc::now(),
                elapsed,
            };
            write_lines(out, &render::render(&view, &context))?;
        }

        Ok(self.flow())
    }

    fn flow(&self) -> Flow {
        if self.input_closed && !self.controller.current_state().is_pending() {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }
}

pub fn run_app(config: &AppConfig, mode: OutputMode) -> anyhow::Result<ExitCode> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.check_settings(), event_tx.clone())
        .context("starting check engine")?;
    input::spawn_stdin_reader(event_tx).context("starting input reader")?;

    let mut out = io::stdout().lock();
    if mode == OutputMode::Verbose {
        writeln!(out, "News Authenticity Checker ({})", config.endpoint)?;
        write_lines(&mut out, &render::help())?;
    }

    let mut session = Session::new(mode);
    while let Ok(event) = event_rx.recv() {
        if session.dispatch(event, &runner, &mut out)? == Flow::Exit {
            break;
        }
    }

    checker_info!(
        "Exiting after {} submission(s)",
        session.controller.latest_request_id()
    );
    Ok(session.exit_code())
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use checker_core::CheckError;
    use checker_engine::{CheckFailure, CheckService};
    use serde_json::{json, Value};

    use super::*;

    /// "slow" answers after the others; "down" fails like a refused connection.
    struct ScriptedService;

    #[async_trait::async_trait]
    impl CheckService for ScriptedService {
        async fn check(&self, query: &str) -> Result<Value, CheckFailure> {
            let delay = if query == "slow" { 200 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if query == "down" {
                return Err(CheckFailure {
                    kind: checker_engine::FailureKind::Connect,
                    message: "refused".to_string(),
                });
            }
            Ok(json!({ "verdict": format!("verdict for {query}") }))
        }
    }

    fn harness() -> (EffectRunner, mpsc::Receiver<AppEvent>) {
        checker_logging::initialize_for_tests();
        let (event_tx, event_rx) = mpsc::channel();
        let runner =
            EffectRunner::with_service(Arc::new(ScriptedService), event_tx).expect("engine");
        (runner, event_rx)
    }

    fn submit(session: &mut Session, runner: &EffectRunner, out: &mut Vec<u8>, text: &str) {
        for event in [
            AppEvent::Core(Msg::InputChanged(text.to_string())),
            AppEvent::Core(Msg::Submitted),
        ] {
            assert_eq!(session.dispatch(event, runner, out).expect("write"), Flow::Continue);
        }
    }

    /// Feeds engine completions back into the session until `count` arrived.
    fn pump_completions(
        session: &mut Session,
        runner: &EffectRunner,
        rx: &mpsc::Receiver<AppEvent>,
        out: &mut Vec<u8>,
        count: usize,
    ) -> Flow {
        let mut flow = Flow::Continue;
        for _ in 0..count {
            let event = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
            assert!(matches!(event, AppEvent::Core(Msg::CheckCompleted { .. })));
            flow = session.dispatch(event, runner, out).expect("write");
        }
        flow
    }

    #[test]
    fn superseded_slow_check_does_not_overwrite_newer_result() {
        let (runner, rx) = harness();
        let mut session = Session::new(OutputMode::Compact);
        let mut out = Vec::new();

        submit(&mut session, &runner, &mut out, "slow");
        submit(&mut session, &runner, &mut out, "fast");
        pump_completions(&mut session, &runner, &rx, &mut out, 2);

        match session.current_state() {
            RequestState::Succeeded {
                request_id, result, ..
            } => {
                assert_eq!(request_id, 2);
                assert_eq!(result.summary().verdict.as_deref(), Some("verdict for fast"));
            }
            other => panic!("expected succeeded, got {other:?}"),
        }
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("#2 fast: verdict for fast"));
        assert!(!printed.contains("verdict for slow"));
    }

    #[test]
    fn closed_input_waits_for_pending_check() {
        let (runner, rx) = harness();
        let mut session = Session::new(OutputMode::Compact);
        let mut out = Vec::new();

        submit(&mut session, &runner, &mut out, "https://x.com/u/status/1");
        let flow = session
            .dispatch(AppEvent::InputClosed, &runner, &mut out)
            .expect("write");
        assert_eq!(flow, Flow::Continue);

        assert_eq!(
            pump_completions(&mut session, &runner, &rx, &mut out, 1),
            Flow::Exit
        );
        assert_eq!(session.exit_code(), ExitCode::SUCCESS);
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("#1 https://x.com/u/status/1: verdict for"));
    }

    #[test]
    fn failed_final_check_exits_with_failure() {
        let (runner, rx) = harness();
        let mut session = Session::new(OutputMode::Verbose);
        let mut out = Vec::new();

        submit(&mut session, &runner, &mut out, "down");
        session
            .dispatch(AppEvent::InputClosed, &runner, &mut out)
            .expect("write");

        assert_eq!(
            pump_completions(&mut session, &runner, &rx, &mut out, 1),
            Flow::Exit
        );
        assert!(matches!(
            session.current_state(),
            RequestState::Failed { ref error, .. } if *error == CheckError::network("connection failed: refused")
        ));
        assert_eq!(session.exit_code(), ExitCode::FAILURE);
        assert!(String::from_utf8(out).expect("utf8").contains("Failed #1 for down"));
    }

    #[test]
    fn closed_input_when_idle_exits_immediately() {
        let (runner, _rx) = harness();
        let mut session = Session::new(OutputMode::Verbose);
        let mut out = Vec::new();

        let flow = session
            .dispatch(AppEvent::InputClosed, &runner, &mut out)
            .expect("write");

        assert_eq!(flow, Flow::Exit);
        assert_eq!(session.exit_code(), ExitCode::SUCCESS);
    }
}
