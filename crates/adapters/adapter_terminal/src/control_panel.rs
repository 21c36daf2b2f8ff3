//! Control panel driven by line commands.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use homedash_app::ports::ControlPanel;
use homedash_app::ui::UiEvent;
use homedash_domain::control::{ControlId, ControlInputs, ControlSnapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::commands::{Command, CommandError, HELP};

/// [`ControlPanel`] whose state is changed by [`Command`]s.
#[derive(Default)]
pub struct TerminalControlPanel {
    inputs: Mutex<ControlInputs>,
}

impl TerminalControlPanel {
    #[must_use]
    pub fn new(inputs: ControlInputs) -> Self {
        Self {
            inputs: Mutex::new(inputs),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlInputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `command` to the controls and return the interaction it
    /// represents. `help` changes nothing and yields no event.
    pub fn execute(&self, command: Command) -> Option<UiEvent> {
        let mut inputs = self.lock();
        let changed = match command {
            Command::Led1(switch) => {
                inputs.led1 = switch.apply(inputs.led1);
                ControlId::Led1
            }
            Command::Led2(switch) => {
                inputs.led2 = switch.apply(inputs.led2);
                ControlId::Led2
            }
            Command::Door(switch) => {
                inputs.door_open = switch.apply(inputs.door_open);
                ControlId::Door
            }
            Command::Angle(text) => {
                inputs.door_angle = text;
                ControlId::DoorAngle
            }
            Command::Apply => return Some(UiEvent::ApplyClicked),
            Command::Help => return None,
        };
        Some(UiEvent::ControlChanged(changed))
    }
}

impl ControlPanel for TerminalControlPanel {
    fn read_controls(&self) -> ControlInputs {
        self.lock().clone()
    }

    fn apply_snapshot(&self, snapshot: &ControlSnapshot) {
        snapshot.apply_to(&mut self.lock());
        tracing::info!(?snapshot, "controls synced from backend");
    }
}

/// Read commands line by line, apply them to `panel` and forward the
/// resulting events.
///
/// Unparsable lines are reported on `feedback` and skipped. Stops at end of
/// input, when the event receiver is gone, or when `cancel` fires.
pub async fn run_commands<R, W>(
    reader: R,
    panel: &TerminalControlPanel,
    events: mpsc::Sender<UiEvent>,
    mut feedback: W,
    cancel: CancellationToken,
) where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::debug!("command input closed");
                break;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read command input");
                break;
            }
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                write_feedback(&mut feedback, &err);
                continue;
            }
        };
        if command == Command::Help {
            write_feedback(&mut feedback, &HELP);
            continue;
        }

        if let Some(event) = panel.execute(command)
            && events.send(event).await.is_err()
        {
            tracing::debug!("ui event receiver dropped");
            break;
        }
    }
}

fn write_feedback(feedback: &mut impl Write, text: &dyn std::fmt::Display) {
    if let Err(err) = writeln!(feedback, "{text}").and_then(|()| feedback.flush()) {
        tracing::warn!(error = %err, "failed to write command feedback");
    }
}
