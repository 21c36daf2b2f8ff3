//! Control panel port — the user-facing controls of the host.

use homedash_domain::control::{ControlInputs, ControlSnapshot};

/// Exposes the current state of the host's controls.
pub trait ControlPanel: Send + Sync {
    /// Current raw control state (door angle as typed).
    fn read_controls(&self) -> ControlInputs;

    /// Move the controls to the state reported by the backend.
    fn apply_snapshot(&self, snapshot: &ControlSnapshot);
}

impl<T: ControlPanel> ControlPanel for std::sync::Arc<T> {
    fn read_controls(&self) -> ControlInputs {
        (**self).read_controls()
    }

    fn apply_snapshot(&self, snapshot: &ControlSnapshot) {
        (**self).apply_snapshot(snapshot);
    }
}
