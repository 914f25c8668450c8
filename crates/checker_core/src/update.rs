use crate::{Effect, Msg, SubmissionController};

/// Pure update function: applies a message to the controller and returns any effects.
pub fn update(
    mut controller: SubmissionController,
    msg: Msg,
) -> (SubmissionController, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            controller.set_input(text);
            Vec::new()
        }
        Msg::Submitted => {
            let input = controller.input().to_owned();
            match controller.submit(&input) {
                Ok(request) => vec![Effect::Check(request)],
                Err(err) => vec![Effect::InputRejected(err)],
            }
        }
        Msg::ResetRequested => {
            controller.set_input(String::new());
            controller.reset();
            Vec::new()
        }
        Msg::CheckCompleted {
            request_id,
            outcome,
        } => {
            controller.on_collaborator_result(request_id, outcome);
            Vec::new()
        }
    };

    (controller, effects)
}
