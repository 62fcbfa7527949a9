use std::fmt::Display;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Color::{DarkCyan, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::types::Notice;
use super::{BACK_OPTION, EXIT_OPTION, HELP_PREFIX};
use script_menu_core::error::{Error, Result};
use script_menu_core::session::LastRun;
use script_menu_core::tree::{EntryKind, MenuFrame};

const BANNER: &str = "Script Menu";

/// Everything drawn for one directory.
pub struct FrameView<'a> {
    pub frame: &'a MenuFrame,
    /// Directory label relative to the root.
    pub location: &'a str,
    pub notices: &'a [Notice],
    pub last_run: Option<&'a LastRun>,
    pub clear_screen: bool,
}

/// Draws a full frame and leaves the cursor after the input prompt.
///
/// # Errors
///
/// Returns [`Error::Stdio`] if the terminal can't be written.
pub fn render_frame<W: Write>(output: &mut W, view: &FrameView) -> Result<()> {
    write_frame(output, view).map_err(Error::Stdio)
}

fn write_frame<W: Write>(output: &mut W, view: &FrameView) -> io::Result<()> {
    if view.clear_screen {
        queue!(output, Clear(ClearType::All), MoveTo(0, 0))?;
    }

    print_header(output, view.location)?;
    print_entries(output, view.frame)?;

    queue!(
        output,
        Print(format!(
            "\nType a number to open a directory or run a script, {HELP_PREFIX}<number> for help,\n\
             {BACK_OPTION} to go back, {EXIT_OPTION} to exit.\n"
        ))
    )?;

    for notice in view.notices {
        queue!(
            output,
            Print("\n"),
            SetForegroundColor(Yellow),
            Print(notice),
            SetForegroundColor(Reset),
            Print("\n"),
        )?;
    }

    if let Some(last_run) = view.last_run {
        print_last_run(output, last_run)?;
    }

    queue!(output, Print("\n> "))?;
    output.flush()?;

    Ok(())
}

fn print_header<W: Write>(output: &mut W, location: &str) -> io::Result<()> {
    queue!(
        output,
        SetBackgroundColor(DarkGreen),
        SetAttribute(Attribute::Bold),
        Print(format!("  {BANNER}  ")),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        Print(format!("\nCurrent directory: {location}\n\n")),
    )?;

    Ok(())
}

fn print_entries<W: Write>(output: &mut W, frame: &MenuFrame) -> io::Result<()> {
    if frame.is_empty() {
        queue!(output, Print("(no scripts or directories here)\n"))?;
        return Ok(());
    }

    for (index, entry) in frame.indexed() {
        queue!(output, Print(format!("{}) ", pad_to_width_of(index, frame.len()))))?;

        match entry.kind {
            EntryKind::Directory => queue!(
                output,
                SetForegroundColor(DarkCyan),
                Print(entry),
                SetForegroundColor(Reset),
            )?,
            EntryKind::LeafCommand => queue!(output, Print(entry))?,
        }

        queue!(output, Print("\n"))?;
    }

    Ok(())
}

fn print_last_run<W: Write>(output: &mut W, last_run: &LastRun) -> io::Result<()> {
    queue!(
        output,
        Print("\n"),
        SetAttribute(Attribute::Bold),
        Print(format!("Last run: {}", last_run.display_name)),
        SetAttribute(Attribute::Reset),
        Print("\n"),
        Print(&last_run.truncated_output),
        Print("\n"),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{}", max_number).len();
    format!("{:>width$}", value.to_string())
}
