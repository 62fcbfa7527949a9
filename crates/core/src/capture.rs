//! Terminal output capture for leaf commands.
//!
//! Many leaf commands only print their boxed/colored status output when they
//! detect a terminal, so output is recorded through a pseudo-terminal rather
//! than a pipe. The [`TerminalCapture`] trait lets the menu run against a
//! canned implementation in tests.

use std::fs;
use std::io::{stdout, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, info};
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// First line `script(1)` writes into a typescript.
pub const RECORDING_STARTED: &str = "Script started";
/// Last line `script(1)` writes into a typescript.
pub const RECORDING_DONE: &str = "Script done";

const FALLBACK_TERM: &str = "xterm-256color";

/// The terminal's end-of-file character (Ctrl-D).
const END_OF_TRANSMISSION: u8 = 0x04;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A fully resolved leaf command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Added on top of the inherited environment.
    pub environment: Vec<(String, String)>,
    pub working_directory: PathBuf,
}

/// Runs an invocation to completion and returns what it wrote to its terminal.
pub trait TerminalCapture {
    /// Blocks until the child exits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Capture`] when the recording terminal cannot be set up
    /// or the child cannot be spawned. A child exiting non-zero is not an error.
    fn capture(&mut self, invocation: &Invocation) -> Result<Vec<String>>;
}

impl<T: TerminalCapture + ?Sized> TerminalCapture for Box<T> {
    fn capture(&mut self, invocation: &Invocation) -> Result<Vec<String>> {
        (**self).capture(invocation)
    }
}

/// Splits captured terminal text into lines, dropping `\r\n` line endings.
///
/// A line redrawn with bare carriage returns keeps only its last redraw, the
/// way a terminal would show it.
pub fn split_output_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            line.rsplit('\r').next().unwrap_or(line).to_string()
        })
        .collect()
}

/// Removes the banner lines a recorder wraps around the captured output.
///
/// Only a header on the first line and a footer on the last non-blank line
/// are removed, so a leaf command printing similar text mid-output keeps it.
pub fn strip_recording_banners(mut lines: Vec<String>) -> Vec<String> {
    if lines
        .first()
        .is_some_and(|line| line.starts_with(RECORDING_STARTED))
    {
        lines.remove(0);
    }

    let footer = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .filter(|&i| lines[i].starts_with(RECORDING_DONE));

    if let Some(footer) = footer {
        lines.truncate(footer);
        // script(1) separates the footer from the output with an empty line
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
    }

    lines
}

/// Translates a key press into the bytes a terminal would send for it.
fn key_to_bytes(key: &KeyEvent) -> Option<Vec<u8>> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let sequence: &[u8] = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl-A through Ctrl-Z are 0x01 through 0x1a
            return c
                .is_ascii_alphabetic()
                .then(|| vec![c.to_ascii_lowercase() as u8 - b'a' + 1]);
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
            return Some(format!("\x1b{c}").into_bytes());
        }
        KeyCode::Char(c) => return Some(c.to_string().into_bytes()),
        KeyCode::Enter => b"\r",
        KeyCode::Backspace => b"\x7f",
        KeyCode::Tab => b"\t",
        KeyCode::BackTab => b"\x1b[Z",
        KeyCode::Esc => b"\x1b",
        KeyCode::Up => b"\x1b[A",
        KeyCode::Down => b"\x1b[B",
        KeyCode::Right => b"\x1b[C",
        KeyCode::Left => b"\x1b[D",
        KeyCode::Home => b"\x1b[H",
        KeyCode::End => b"\x1b[F",
        KeyCode::Delete => b"\x1b[3~",
        KeyCode::PageUp => b"\x1b[5~",
        KeyCode::PageDown => b"\x1b[6~",
        _ => return None,
    };

    Some(sequence.to_vec())
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().map_err(Error::Stdio)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Feeds the operator's keystrokes to a leaf command until dropped.
///
/// The host terminal stays in raw mode meanwhile, so Ctrl-C reaches the leaf
/// command instead of the launcher.
struct InputForwarder {
    child_done: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    // Restored only after the thread has stopped reading keys
    _raw_mode: RawModeGuard,
}

impl InputForwarder {
    fn start(mut writer: Box<dyn Write + Send>) -> Result<Self> {
        let raw_mode = RawModeGuard::enable()?;
        let child_done = Arc::new(AtomicBool::new(false));

        let done = Arc::clone(&child_done);
        let handle = thread::spawn(move || {
            if let Err(e) = forward_keys(writer.as_mut(), &done) {
                debug!("Stopped forwarding input: {e}");
            }
        });

        Ok(Self {
            child_done,
            handle: Some(handle),
            _raw_mode: raw_mode,
        })
    }
}

impl Drop for InputForwarder {
    fn drop(&mut self) {
        self.child_done.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn forward_keys(writer: &mut dyn Write, done: &AtomicBool) -> std::io::Result<()> {
    while !done.load(Ordering::Relaxed) {
        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if let Some(bytes) = key_to_bytes(&key) {
                writer.write_all(&bytes)?;
                writer.flush()?;
            }
        }
    }

    Ok(())
}

/// Captures through an in-process pseudo-terminal.
pub struct PtyCapture {
    rows: u16,
    columns: u16,
    echo: bool,
    forward_input: bool,
}

impl PtyCapture {
    /// `echo` mirrors the child's output to our stdout while it runs.
    ///
    /// Operator input is not forwarded until enabled with
    /// [`PtyCapture::with_operator_input`].
    #[must_use]
    pub fn new(rows: u16, columns: u16, echo: bool) -> Self {
        Self {
            rows,
            columns,
            echo,
            forward_input: false,
        }
    }

    /// Forwards the operator's terminal to the leaf command while it runs.
    ///
    /// Only meaningful when our stdin is a terminal. Without forwarding the
    /// leaf command reads end of file.
    #[must_use]
    pub fn with_operator_input(mut self, forward_input: bool) -> Self {
        self.forward_input = forward_input;
        self
    }
}

impl TerminalCapture for PtyCapture {
    fn capture(&mut self, invocation: &Invocation) -> Result<Vec<String>> {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows: self.rows,
                cols: self.columns,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| Error::capture_error("allocating pseudo-terminal", e))?;

        let mut command = CommandBuilder::new(&invocation.program);
        command.args(&invocation.args);
        command.cwd(&invocation.working_directory);
        if std::env::var_os("TERM").is_none() {
            command.env("TERM", FALLBACK_TERM);
        }
        for (key, value) in &invocation.environment {
            command.env(key, value);
        }

        info!(
            "Spawning `{}` with arguments {:?} on a pseudo-terminal",
            invocation.program, invocation.args
        );

        let mut child = pair
            .slave
            .spawn_command(command)
            .map_err(|e| Error::capture_error("spawning leaf command", e))?;

        // The child must hold the only slave handle, or reads never see EOF
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| Error::capture_error("reading pseudo-terminal", e))?;
        let mut writer = pair
            .master
            .take_writer()
            .map_err(|e| Error::capture_error("writing pseudo-terminal", e))?;

        let forwarder = if self.forward_input {
            Some(InputForwarder::start(writer)?)
        } else {
            debug!("No operator input, closing leaf command input");
            writer
                .write_all(&[END_OF_TRANSMISSION])
                .and_then(|()| writer.flush())
                .map_err(|e| Error::capture_error("writing pseudo-terminal", e))?;
            None
        };

        let mut captured = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if self.echo {
                        let mut stdout = stdout();
                        stdout.write_all(&buf[..n]).map_err(Error::Stdio)?;
                        stdout.flush().map_err(Error::Stdio)?;
                    }
                    captured.extend_from_slice(&buf[..n]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                // Linux reports EIO once the last slave handle closes
                Err(e) => {
                    debug!("Pseudo-terminal read ended: {e}");
                    break;
                }
            }
        }
        drop(forwarder);

        let status = child.wait()?;
        debug!(
            "`{}` exited with code {}",
            invocation.program,
            status.exit_code()
        );

        Ok(split_output_lines(&String::from_utf8_lossy(&captured)))
    }
}

/// Captures by delegating to the system `script(1)` recorder.
///
/// The typescript file lives in a temporary file removed on drop.
pub struct ScriptCapture {
    echo: bool,
}

impl ScriptCapture {
    #[must_use]
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }

    fn recorder_command(invocation: &Invocation, typescript: &str) -> Result<Command> {
        let mut command = Command::new("script");

        if cfg!(target_os = "macos") {
            command
                .arg("-q")
                .arg(typescript)
                .arg(&invocation.program)
                .args(&invocation.args);
        } else {
            let words = std::iter::once(invocation.program.as_str())
                .chain(invocation.args.iter().map(String::as_str));
            let command_line = shlex::try_join(words)
                .map_err(|e| Error::capture_error("quoting leaf command", e))?;
            command
                .arg("-q")
                .arg("-c")
                .arg(command_line)
                .arg(typescript);
        }

        Ok(command)
    }
}

impl TerminalCapture for ScriptCapture {
    fn capture(&mut self, invocation: &Invocation) -> Result<Vec<String>> {
        let typescript = NamedTempFile::new()
            .map_err(|e| Error::capture_error("creating typescript file", e))?;
        let typescript_path = typescript.path().display().to_string();

        let mut command = Self::recorder_command(invocation, &typescript_path)?;
        command
            .current_dir(&invocation.working_directory)
            .envs(invocation.environment.iter().cloned())
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .stdout(if self.echo {
                Stdio::inherit()
            } else {
                Stdio::null()
            });

        info!(
            "Recording `{}` with arguments {:?} through script(1)",
            invocation.program, invocation.args
        );

        let status = command
            .status()
            .map_err(|e| Error::capture_error("running script(1)", e))?;
        debug!("script(1) exited with {status}");

        let recorded = fs::read(typescript.path()).map_err(|e| {
            Error::io_error("typescript".to_string(), typescript_path.clone(), e)
        })?;

        Ok(split_output_lines(&String::from_utf8_lossy(&recorded)))
    }
}
