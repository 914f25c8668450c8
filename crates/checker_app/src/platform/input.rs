use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use checker_core::Msg;
use checker_logging::checker_warn;

use super::app::AppEvent;

/// Reads stdin line by line on its own thread and reports EOF as `InputClosed`.
pub fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        checker_warn!("Failed to read stdin: {}", err);
                        break;
                    }
                };
                for event in events_for_line(&line) {
                    if event_tx.send(event).is_err() {
                        return;
                    }
                }
            }
            let _ = event_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

/// A line starting with `:` is a command; anything else (even blank) is submitted.
pub(crate) fn events_for_line(line: &str) -> Vec<AppEvent> {
    match line.trim() {
        ":reset" | ":clear" => vec![AppEvent::Core(Msg::ResetRequested)],
        ":quit" | ":q" => vec![AppEvent::Quit],
        ":help" | ":h" => vec![AppEvent::ShowHelp],
        _ => vec![
            AppEvent::Core(Msg::InputChanged(line.to_string())),
            AppEvent::Core(Msg::Submitted),
        ],
    }
}
