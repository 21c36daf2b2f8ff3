//! What the host reports about user interaction.

use std::future::Future;

use homedash_domain::control::ControlId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A user interaction reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The "apply" button was pressed.
    ApplyClicked,
    /// A control changed value.
    ControlChanged(ControlId),
}

impl UiEvent {
    /// Whether this interaction submits the control state.
    ///
    /// Only the apply button and the `led1` toggle submit; other controls
    /// wait for an explicit apply.
    #[must_use]
    pub fn submits_controls(self) -> bool {
        matches!(self, Self::ApplyClicked | Self::ControlChanged(ControlId::Led1))
    }
}

/// Spawn the task that turns submitting events into calls to `on_submit`.
///
/// Submissions are handled one at a time in arrival order. The task ends
/// when every sender is dropped or `cancel` fires.
pub fn wire_ui<F, Fut>(
    mut events: mpsc::Receiver<UiEvent>,
    cancel: CancellationToken,
    on_submit: F,
) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                event = events.recv() => event,
            };
            let Some(event) = event else {
                tracing::debug!("ui event channel closed");
                break;
            };

            if !event.submits_controls() {
                tracing::trace!(?event, "ui event does not submit");
                continue;
            }

            tracing::debug!(?event, "submitting controls");
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = on_submit() => {}
            }
        }
    })
}
