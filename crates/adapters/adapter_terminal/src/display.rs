//! Line-oriented rendering of dashboard fields.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use homedash_app::ports::DisplaySink;
use homedash_domain::display::Field;

struct State<W> {
    out: W,
    fields: BTreeMap<Field, String>,
}

/// [`DisplaySink`] writing one `[HH:MM:SS] <field>: <text>` line per change.
///
/// Writes that do not change a field's text print nothing. Multi-line text
/// (the metrics listing) follows its header line.
pub struct TerminalDisplay<W> {
    state: Mutex<State<W>>,
}

impl<W: Write> TerminalDisplay<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(State {
                out,
                fields: BTreeMap::new(),
            }),
        }
    }

    /// Current text of every field written so far.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Field, String> {
        self.lock().fields.clone()
    }

    /// Current text of one field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<String> {
        self.lock().fields.get(&field).cloned()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_field(out: &mut impl Write, field: Field, text: &str) -> std::io::Result<()> {
    let time = chrono::Local::now().format("%H:%M:%S");
    if text.contains('\n') {
        writeln!(out, "[{time}] {field}:")?;
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "[{time}] {field}: {text}")?;
    }
    out.flush()
}

impl<W: Write + Send> DisplaySink for TerminalDisplay<W> {
    fn set_text(&self, field: Field, text: &str) {
        let mut state = self.lock();
        if state.fields.get(&field).is_some_and(|current| current == text) {
            return;
        }
        state.fields.insert(field, text.to_string());
        if let Err(err) = write_field(&mut state.out, field, text) {
            tracing::warn!(error = %err, %field, "failed to render field");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(display: TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn should_write_one_line_per_field() {
        let display = TerminalDisplay::new(Vec::new());
        display.set_text(Field::TempValue, "21.5 C");
        display.set_text(Field::TempUpdated, "12:00");

        let text = output(display);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] temp-value: 21.5 C"));
        assert!(lines[1].ends_with("] temp-updated: 12:00"));
    }

    #[test]
    fn should_skip_unchanged_text() {
        let display = TerminalDisplay::new(Vec::new());
        display.set_text(Field::HumValue, "55.2 %");
        display.set_text(Field::HumValue, "55.2 %");

        assert_eq!(output(display).lines().count(), 1);
    }

    #[test]
    fn should_print_multi_line_text_below_header() {
        let display = TerminalDisplay::new(Vec::new());
        display.set_text(Field::MetricsJson, "[\n  1\n]");

        let text = output(display);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("] metrics-json:"));
        assert_eq!(&lines[1..], &["[", "  1", "]"]);
    }

    #[test]
    fn should_expose_current_field_values() {
        let display = TerminalDisplay::new(std::io::sink());
        display.set_text(Field::MotionValue, "Activo");
        display.set_text(Field::MotionValue, "Inactivo");

        assert_eq!(display.get(Field::MotionValue).as_deref(), Some("Inactivo"));
        assert_eq!(display.snapshot().len(), 1);
    }
}
