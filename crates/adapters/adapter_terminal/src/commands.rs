//! Line commands understood by the terminal control panel.

/// Usage text printed for `help`.
pub const HELP: &str = "\
commands:
  led1 on|off|toggle    switch LED 1 (submits immediately)
  led2 on|off|toggle    switch LED 2
  door open|close|toggle
  angle <degrees>       set the door angle
  apply                 send the current controls
  help                  show this text";

/// New value for a boolean control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Toggle,
}

impl Switch {
    /// The control's value after applying this switch to `current`.
    #[must_use]
    pub fn apply(self, current: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Toggle => !current,
        }
    }
}

/// A parsed line command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Led1(Switch),
    Led2(Switch),
    Door(Switch),
    /// Raw angle text; parsing happens when the command is built.
    Angle(String),
    Apply,
    Help,
}

/// Why a line could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

impl Command {
    /// Parse one input line. Keywords are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for blank lines, unknown keywords and
    /// missing or invalid switch arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));

        match keyword.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "led1" => parse_switch("led1", rest, "on", "off").map(Self::Led1),
            "led2" => parse_switch("led2", rest, "on", "off").map(Self::Led2),
            "door" => parse_switch("door", rest, "open", "close").map(Self::Door),
            "angle" => Ok(Self::Angle(rest.to_string())),
            "apply" => Ok(Self::Apply),
            "help" | "?" => Ok(Self::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_switch(
    command: &'static str,
    arg: &str,
    on: &str,
    off: &str,
) -> Result<Switch, CommandError> {
    let arg = arg.to_ascii_lowercase();
    if arg == on {
        Ok(Switch::On)
    } else if arg == off {
        Ok(Switch::Off)
    } else if arg == "toggle" {
        Ok(Switch::Toggle)
    } else {
        Err(CommandError::BadArgument {
            command,
            expected: if on == "on" {
                "on, off or toggle"
            } else {
                "open, close or toggle"
            },
        })
    }
}
