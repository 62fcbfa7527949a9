//! Type definitions for menu input and in-frame notices.

use std::fmt::{Display, Formatter};

use script_menu_core::help::HelpInfo;

use super::{BACK_OPTION, EXIT_OPTION, HELP_PREFIX};

/// One parsed line of menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Ascend one level, or exit at the root.
    Back,
    Exit,
    /// Show help for the 1-based entry index.
    Help(usize),
    /// Open a directory or run a leaf command by 1-based index.
    Select(usize),
    Invalid,
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Too many digits to fit can't name an entry either
    Some(digits.parse().unwrap_or(usize::MAX))
}

impl MenuCommand {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input == BACK_OPTION {
            return MenuCommand::Back;
        }

        if input == EXIT_OPTION {
            return MenuCommand::Exit;
        }

        if let Some(index) = input.strip_prefix(HELP_PREFIX).and_then(parse_index) {
            return MenuCommand::Help(index);
        }

        match parse_index(input) {
            Some(index) => MenuCommand::Select(index),
            None => MenuCommand::Invalid,
        }
    }
}

/// Messages shown once, inside the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    InvalidSelection,
    HelpOnDirectory,
    InvalidNumericChoice,
    InvalidInput,
    Help { name: String, help: HelpInfo },
    Unreadable { name: String, reason: String },
    RunFailed { name: String, reason: String },
    Unlistable { directory: String, reason: String },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::InvalidSelection => f.write_str("Invalid selection."),
            Notice::HelpOnDirectory => f.write_str("Cannot show help for a directory."),
            Notice::InvalidNumericChoice => f.write_str("Invalid numeric choice."),
            Notice::InvalidInput => write!(
                f,
                "Invalid input. Enter a number, {HELP_PREFIX}<number>, {BACK_OPTION} or {EXIT_OPTION}."
            ),
            Notice::Help { name, help } => write!(f, "Help for {name}:\n{help}"),
            Notice::Unreadable { name, reason } => write!(f, "Cannot read {name}: {reason}"),
            Notice::RunFailed { name, reason } => write!(f, "Could not run {name}: {reason}"),
            Notice::Unlistable { directory, reason } => {
                write!(f, "Cannot list {directory}: {reason}")
            }
        }
    }
}
