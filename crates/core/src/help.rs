//! Help text mined from a leaf command's leading comment block.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

const COMMENT_MARKER: char = '#';
const INTERPRETER_DIRECTIVE: &str = "#!";
const USAGE_PREFIX: &str = "./";

pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpInfo {
    /// A commented, ready-to-run invocation such as `./Ping.sh host`.
    UsageExample(String),
    /// The whole leading comment block, marker stripped.
    CommentBlock(String),
}

impl Display for HelpInfo {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HelpInfo::UsageExample(line) => write!(formatter, "Usage: {line}"),
            HelpInfo::CommentBlock(text) => formatter.write_str(text),
        }
    }
}

/// Extracts help from the comment lines at the top of a leaf command.
///
/// A leading `#!` line is skipped. Scanning stops at the first line that is
/// not a comment. Bare `#` lines are skipped without ending the block. The
/// first comment whose content starts with `./` wins as a usage example;
/// otherwise the collected block is returned.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn extract_help(leaf_command_path: &Path) -> Result<HelpInfo> {
    let file = File::open(leaf_command_path).map_err(|e| {
        Error::io_error(
            "leaf command".to_string(),
            leaf_command_path.display().to_string(),
            e,
        )
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            Error::io_error(
                "leaf command".to_string(),
                leaf_command_path.display().to_string(),
                e,
            )
        })?;
        // Only the leading block matters, stop reading the rest of the file
        let is_comment = line.starts_with(COMMENT_MARKER);
        lines.push(line);
        if !is_comment {
            break;
        }
    }

    let help = extract_help_from_lines(&lines);
    debug!(
        "Extracted {} for `{}`",
        match help {
            HelpInfo::UsageExample(_) => "usage example",
            HelpInfo::CommentBlock(_) => "comment block",
        },
        leaf_command_path.display()
    );

    Ok(help)
}

/// Same as [`extract_help`] over lines already in memory.
pub fn extract_help_from_lines<S: AsRef<str>>(lines: &[S]) -> HelpInfo {
    let mut lines = lines.iter().map(AsRef::as_ref).peekable();

    if lines
        .peek()
        .is_some_and(|first| first.starts_with(INTERPRETER_DIRECTIVE))
    {
        lines.next();
    }

    let mut block: Vec<&str> = Vec::new();
    let mut usage_example: Option<&str> = None;

    for line in lines {
        let Some(content) = line.strip_prefix(COMMENT_MARKER) else {
            break;
        };

        if content.is_empty() {
            continue;
        }

        let content = content.trim_start();
        if usage_example.is_none() && content.starts_with(USAGE_PREFIX) {
            usage_example = Some(content);
        }

        block.push(content);
    }

    match usage_example {
        Some(example) => HelpInfo::UsageExample(example.to_string()),
        None if block.is_empty() => HelpInfo::CommentBlock(NO_DESCRIPTION.to_string()),
        None => HelpInfo::CommentBlock(block.join("\n")),
    }
}
