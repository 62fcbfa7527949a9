use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// How leaf command output is recorded while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureBackend {
    /// A pseudo-terminal allocated in-process.
    #[default]
    Pty,
    /// The system `script(1)` recorder writing a typescript file.
    Script,
}

impl FromStr for CaptureBackend {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pty" => Ok(CaptureBackend::Pty),
            "script" => Ok(CaptureBackend::Script),
            other => Err(Error::UnknownCaptureBackend(other.to_string())),
        }
    }
}

impl Display for CaptureBackend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureBackend::Pty => formatter.write_str("pty"),
            CaptureBackend::Script => formatter.write_str("script"),
        }
    }
}

/// Launcher settings as read from the YAML settings file.
///
/// Every field is optional; unset fields fall back to the defaults in
/// [`crate::config`]. Command-line flags are folded in with
/// [`Settings::overridden_by`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub root: Option<String>,
    pub extension: Option<String>,
    pub shell: Option<String>,
    pub utility_path: Option<String>,
    pub capture: Option<String>,
    pub echo_output: Option<bool>,
    pub terminal_rows: Option<u16>,
    pub terminal_columns: Option<u16>,
    pub clear_screen: Option<bool>,
}

impl Settings {
    /// Returns a copy where every field set in `overrides` replaces ours.
    #[must_use]
    pub fn overridden_by(self, overrides: Settings) -> Settings {
        Settings {
            root: overrides.root.or(self.root),
            extension: overrides.extension.or(self.extension),
            shell: overrides.shell.or(self.shell),
            utility_path: overrides.utility_path.or(self.utility_path),
            capture: overrides.capture.or(self.capture),
            echo_output: overrides.echo_output.or(self.echo_output),
            terminal_rows: overrides.terminal_rows.or(self.terminal_rows),
            terminal_columns: overrides.terminal_columns.or(self.terminal_columns),
            clear_screen: overrides.clear_screen.or(self.clear_screen),
        }
    }
}
