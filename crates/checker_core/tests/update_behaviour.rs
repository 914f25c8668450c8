use checker_core::{
    update, CheckError, CheckRequest, CheckResult, Effect, ErrorKind, Msg, Query, QueryKind,
    RequestState, Site, StatusView, SubmissionController, ValidationError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn submit_input(
    controller: SubmissionController,
    input: &str,
) -> (SubmissionController, Vec<Effect>) {
    let (controller, _) = update(controller, Msg::InputChanged(input.to_string()));
    update(controller, Msg::Submitted)
}

fn query(text: &str) -> Query {
    Query::parse(text).expect("valid query")
}

#[test]
fn submit_enters_pending_and_emits_check() {
    let (mut controller, effects) =
        submit_input(SubmissionController::new(), "https://x.com/u/status/1");

    assert_eq!(
        effects,
        vec![Effect::Check(CheckRequest {
            request_id: 1,
            query: query("https://x.com/u/status/1"),
        })]
    );
    assert_eq!(
        controller.current_state(),
        RequestState::Pending {
            query: query("https://x.com/u/status/1"),
            request_id: 1,
        }
    );
    assert!(controller.consume_dirty());
}

#[test]
fn success_scenario_reaches_succeeded() {
    let (controller, _) = submit_input(SubmissionController::new(), "https://x.com/u/status/1");
    let result = CheckResult::new(json!({ "verdict": "likely-authentic" }));

    let (controller, effects) = update(
        controller,
        Msg::CheckCompleted {
            request_id: 1,
            outcome: Ok(result.clone()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        controller.current_state(),
        RequestState::Succeeded {
            query: query("https://x.com/u/status/1"),
            request_id: 1,
            result,
        }
    );
}

#[test]
fn empty_submit_is_rejected_without_state_change() {
    let (mut controller, effects) = submit_input(SubmissionController::new(), "");

    assert_eq!(effects, vec![Effect::InputRejected(ValidationError::Empty)]);
    assert_eq!(controller.current_state(), RequestState::Idle);
    assert_eq!(controller.latest_request_id(), 0);
    assert!(!controller.consume_dirty());
}

#[test]
fn whitespace_submit_while_pending_keeps_pending() {
    let (controller, _) = submit_input(SubmissionController::new(), "some claim");
    let before = controller.current_state();

    let (controller, effects) = submit_input(controller, "  \t\n ");

    assert_eq!(effects, vec![Effect::InputRejected(ValidationError::Empty)]);
    assert_eq!(controller.current_state(), before);
    assert_eq!(controller.latest_request_id(), 1);
}

#[test]
fn submitted_query_keeps_raw_text() {
    let (controller, effects) =
        submit_input(SubmissionController::new(), "  https://x.com/u/status/1 ");

    match controller.current_state() {
        RequestState::Pending { query, .. } => {
            assert_eq!(query.as_str(), "  https://x.com/u/status/1 ");
            assert_eq!(
                query.kind(),
                QueryKind::Link {
                    site: Some(Site::X)
                }
            );
        }
        other => panic!("expected pending, got {other:?}"),
    }
    match effects.as_slice() {
        [Effect::Check(request)] => {
            assert_eq!(request.query.as_str(), "  https://x.com/u/status/1 ")
        }
        other => panic!("expected one check, got {other:?}"),
    }
}

#[test]
fn failed_then_resubmit_clears_error() {
    let (controller, _) = submit_input(SubmissionController::new(), "claim");
    let (controller, _) = update(
        controller,
        Msg::CheckCompleted {
            request_id: 1,
            outcome: Err(CheckError::network("connection refused")),
        },
    );
    assert!(matches!(
        controller.current_state(),
        RequestState::Failed { ref error, .. } if error.kind == ErrorKind::Network
    ));

    let (controller, effects) = update(controller, Msg::Submitted);

    assert_eq!(effects.len(), 1);
    assert_eq!(
        controller.current_state(),
        RequestState::Pending {
            query: query("claim"),
            request_id: 2,
        }
    );
}

#[test]
fn reset_clears_input_and_returns_to_idle() {
    let (controller, _) = submit_input(SubmissionController::new(), "claim");

    let (mut controller, effects) = update(controller, Msg::ResetRequested);

    assert!(effects.is_empty());
    assert_eq!(controller.current_state(), RequestState::Idle);
    assert_eq!(controller.input(), "");
    assert!(controller.consume_dirty());
}

#[test]
fn view_reflects_failed_state() {
    let (controller, _) = submit_input(SubmissionController::new(), "claim");
    let (controller, _) = update(
        controller,
        Msg::CheckCompleted {
            request_id: 1,
            outcome: Err(CheckError::protocol("http status 500")),
        },
    );

    let view = controller.view();
    assert_eq!(view.input, "claim");
    assert_eq!(view.latest_request_id, 1);
    assert_eq!(
        view.status,
        StatusView::Failed {
            request_id: 1,
            query: "claim".to_string(),
            query_kind: QueryKind::Text,
            kind: ErrorKind::Protocol,
            message: "http status 500".to_string(),
        }
    );
}
