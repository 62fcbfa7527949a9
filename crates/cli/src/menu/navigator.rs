//! The menu state machine.
//!
//! The navigator keeps an explicit stack of directories with the root at the
//! bottom. `b` pops one level and exits once only the root is left.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::input::{prompt_arguments, read_line};
use super::types::{MenuCommand, Notice};
use super::ui::{render_frame, FrameView};
use script_menu_core::capture::TerminalCapture;
use script_menu_core::config::LauncherConfig;
use script_menu_core::error::{Error, Result};
use script_menu_core::execution::ExecutionEngine;
use script_menu_core::help::extract_help;
use script_menu_core::session::SessionState;
use script_menu_core::tree::{MenuFrame, TreeEntry};

/// Whether the loop keeps going after handling one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Exit,
}

pub struct Navigator<C: TerminalCapture, R: BufRead, W: Write> {
    root: PathBuf,
    extension: String,
    clear_screen: bool,
    engine: ExecutionEngine<C>,
    session: SessionState,
    input: R,
    output: W,
    stack: Vec<PathBuf>,
    notices: Vec<Notice>,
}

impl<C: TerminalCapture, R: BufRead, W: Write> Navigator<C, R, W> {
    /// Starts in `Browsing(root)` with an empty session.
    pub fn new(config: &LauncherConfig, engine: ExecutionEngine<C>, input: R, output: W) -> Self {
        Self {
            root: config.root.clone(),
            extension: config.extension.clone(),
            clear_screen: config.clear_screen,
            engine,
            session: SessionState::new(),
            input,
            output,
            stack: vec![config.root.clone()],
            notices: Vec::new(),
        }
    }

    pub fn current_directory(&self) -> &Path {
        self.stack.last().map_or(self.root.as_path(), PathBuf::as_path)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn engine(&self) -> &ExecutionEngine<C> {
        &self.engine
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Notices waiting for the next frame.
    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    fn at_root(&self) -> bool {
        self.stack.len() <= 1
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn location(&self) -> String {
        if self.at_root() {
            self.root.display().to_string()
        } else {
            format!("{}/", self.relative_name(self.current_directory()))
        }
    }

    /// Runs until `e`, `b` at the root, or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the root can no longer be listed or the terminal
    /// can't be read or written.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(frame) = self.build_frame()? else {
                continue;
            };

            let location = self.location();
            render_frame(
                &mut self.output,
                &FrameView {
                    frame: &frame,
                    location: &location,
                    notices: &self.notices,
                    last_run: self.session.current(),
                    clear_screen: self.clear_screen,
                },
            )?;
            self.notices.clear();

            let Some(line) = read_line(&mut self.input)? else {
                debug!("End of input, exiting");
                return Ok(());
            };

            if self.handle(&frame, MenuCommand::parse(&line))? == Transition::Exit {
                return Ok(());
            }
        }
    }

    /// Lists the current directory. A vanished sub-directory is reported and
    /// popped, giving `None`; the root vanishing is fatal.
    fn build_frame(&mut self) -> Result<Option<MenuFrame>> {
        let directory = self.current_directory().to_path_buf();

        match MenuFrame::build(&directory, &self.extension) {
            Ok(frame) => Ok(Some(frame)),
            Err(e) if !self.at_root() => {
                warn!("Leaving `{}`: {e}", directory.display());
                self.notices.push(Notice::Unlistable {
                    directory: self.relative_name(&directory),
                    reason: e.to_string(),
                });
                self.stack.pop();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Applies one parsed command to the frame currently on screen.
    ///
    /// # Errors
    ///
    /// Returns an error only for terminal I/O failures.
    pub fn handle(&mut self, frame: &MenuFrame, command: MenuCommand) -> Result<Transition> {
        match command {
            MenuCommand::Exit => return Ok(Transition::Exit),
            MenuCommand::Back => {
                if self.at_root() {
                    return Ok(Transition::Exit);
                }
                self.stack.pop();
            }
            MenuCommand::Help(index) => match frame.get(index) {
                None => self.notices.push(Notice::InvalidSelection),
                Some(entry) if entry.is_directory() => self.notices.push(Notice::HelpOnDirectory),
                Some(entry) => self.show_help(entry),
            },
            MenuCommand::Select(index) => match frame.get(index) {
                None => self.notices.push(Notice::InvalidNumericChoice),
                Some(entry) if entry.is_directory() => {
                    debug!("Descending into `{}`", entry.path.display());
                    self.stack.push(entry.path.clone());
                }
                Some(entry) => self.run_leaf(entry)?,
            },
            MenuCommand::Invalid => self.notices.push(Notice::InvalidInput),
        }

        Ok(Transition::Stay)
    }

    fn show_help(&mut self, entry: &TreeEntry) {
        let name = self.relative_name(&entry.path);

        let notice = match extract_help(&entry.path) {
            Ok(help) => Notice::Help { name, help },
            Err(e) => Notice::Unreadable {
                name,
                reason: e.to_string(),
            },
        };
        self.notices.push(notice);
    }

    fn run_leaf(&mut self, entry: &TreeEntry) -> Result<()> {
        let display_name = self.relative_name(&entry.path);
        let argv_line = prompt_arguments(&mut self.input, &mut self.output, &display_name)?;

        match self.engine.run(&entry.path, &display_name, &argv_line) {
            Ok(Some(result)) => {
                info!(
                    "`{display_name}` produced {} lines of output",
                    result.raw_output_lines.len()
                );
                self.session
                    .record(result.display_name.clone(), result.truncated_output());
            }
            Ok(None) => {}
            Err(e @ Error::Stdio(_)) => return Err(e),
            Err(e) => {
                warn!("Running `{display_name}` failed: {e}");
                self.notices.push(Notice::RunFailed {
                    name: display_name,
                    reason: e.to_string(),
                });
            }
        }

        Ok(())
    }
}
