//! Where rendered text ends up.

use homedash_domain::display::Field;

/// Receives text for the dashboard's named fields.
///
/// Writes are fire-and-forget: a host that does not show a field simply
/// ignores it.
pub trait DisplaySink: Send + Sync {
    /// Replace the text of `field`.
    fn set_text(&self, field: Field, text: &str);
}

impl<T: DisplaySink> DisplaySink for std::sync::Arc<T> {
    fn set_text(&self, field: Field, text: &str) {
        (**self).set_text(field, text);
    }
}
