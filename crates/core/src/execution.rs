use std::env;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::capture::{strip_recording_banners, Invocation, TerminalCapture};
use crate::error::Result;
use crate::truncation::truncate;

/// Argument line meaning "don't run anything".
pub const CANCEL_SENTINEL: &str = "c";

/// Output of one leaf command run, before truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub display_name: String,
    pub raw_output_lines: Vec<String>,
}

impl ExecutionResult {
    /// The bounded form kept in the session.
    #[must_use]
    pub fn truncated_output(&self) -> String {
        truncate(&self.raw_output_lines)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}

/// Runs leaf commands through a [`TerminalCapture`].
pub struct ExecutionEngine<C: TerminalCapture> {
    capture: C,
    shell: String,
    environment: Vec<(String, String)>,
}

impl<C: TerminalCapture> ExecutionEngine<C> {
    /// `shell` interprets leaf commands lacking execute permission.
    /// `environment` is added to every invocation.
    pub fn new(capture: C, shell: impl Into<String>, environment: Vec<(String, String)>) -> Self {
        Self {
            capture,
            shell: shell.into(),
            environment,
        }
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Turns a leaf command and the operator's argument line into an invocation.
    ///
    /// Files with an execute bit are run directly, anything else through the
    /// configured shell.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn build_invocation(&self, leaf_command_path: &Path, argv_line: &str) -> Result<Invocation> {
        let arguments = argv_line.split_whitespace().map(ToString::to_string);
        let path = leaf_command_path.display().to_string();

        let (program, args) = if is_executable(leaf_command_path) {
            (path, arguments.collect())
        } else {
            debug!("`{path}` is not executable, running through {}", self.shell);
            (
                self.shell.clone(),
                std::iter::once(path).chain(arguments).collect(),
            )
        };

        Ok(Invocation {
            program,
            args,
            environment: self.environment.clone(),
            working_directory: env::current_dir()?,
        })
    }

    /// Runs a leaf command and returns its captured output.
    ///
    /// Returns `Ok(None)` without spawning anything when `argv_line` is the
    /// [`CANCEL_SENTINEL`]. The leaf command's exit status is not reported;
    /// whatever it printed is the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be captured.
    pub fn run(
        &mut self,
        leaf_command_path: &Path,
        display_name: &str,
        argv_line: &str,
    ) -> Result<Option<ExecutionResult>> {
        if argv_line == CANCEL_SENTINEL {
            info!("Run of `{display_name}` cancelled");
            return Ok(None);
        }

        let invocation = self.build_invocation(leaf_command_path, argv_line)?;
        let captured = self.capture.capture(&invocation)?;

        Ok(Some(ExecutionResult {
            display_name: display_name.to_string(),
            raw_output_lines: strip_recording_banners(captured),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs::File;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CannedCapture {
        lines: Vec<String>,
        invocations: Vec<Invocation>,
        fail: bool,
    }

    impl TerminalCapture for CannedCapture {
        fn capture(&mut self, invocation: &Invocation) -> Result<Vec<String>> {
            self.invocations.push(invocation.clone());
            if self.fail {
                return Err(Error::Capture("no pseudo-terminal".to_string()));
            }
            Ok(self.lines.clone())
        }
    }

    fn leaf(temp_dir: &TempDir, name: &str, mode: u32) -> std::path::PathBuf {
        let path = temp_dir.path().join(name);
        File::create(&path).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = mode;
        path
    }

    #[test]
    fn test_cancel_never_spawns() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "Ping.sh", 0o755);
        let mut engine = ExecutionEngine::new(CannedCapture::default(), "/bin/bash", Vec::new());

        let result = engine.run(&path, "Ping.sh", "c").unwrap();

        assert!(result.is_none());
        assert!(engine.capture().invocations.is_empty());
    }

    #[test]
    fn test_only_exact_sentinel_cancels() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "Ping.sh", 0o755);
        let mut engine = ExecutionEngine::new(CannedCapture::default(), "/bin/bash", Vec::new());

        let result = engine.run(&path, "Ping.sh", " c ").unwrap();

        assert!(result.is_some());
        assert_eq!(engine.capture().invocations.len(), 1);
        assert_eq!(engine.capture().invocations[0].args.last().unwrap(), "c");
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_runs_directly() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "Ping.sh", 0o755);
        let engine = ExecutionEngine::new(CannedCapture::default(), "/bin/bash", Vec::new());

        let invocation = engine.build_invocation(&path, "  10.0.0.1   -c 3 ").unwrap();

        assert_eq!(invocation.program, path.display().to_string());
        assert_eq!(invocation.args, vec!["10.0.0.1", "-c", "3"]);
    }

    #[test]
    fn test_non_executable_runs_through_shell() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "Ping.sh", 0o644);
        let engine = ExecutionEngine::new(
            CannedCapture::default(),
            "/bin/sh",
            vec![("UTILITYPATH".to_string(), "/opt/utils".to_string())],
        );

        let invocation = engine.build_invocation(&path, "").unwrap();

        assert_eq!(invocation.program, "/bin/sh");
        assert_eq!(invocation.args, vec![path.display().to_string()]);
        assert_eq!(
            invocation.environment,
            vec![("UTILITYPATH".to_string(), "/opt/utils".to_string())]
        );
    }

    #[test]
    fn test_run_strips_banners() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "List.sh", 0o755);
        let capture = CannedCapture {
            lines: vec![
                "Script started on today".to_string(),
                "local".to_string(),
                "local-lvm".to_string(),
                "Script done on today".to_string(),
            ],
            ..CannedCapture::default()
        };
        let mut engine = ExecutionEngine::new(capture, "/bin/bash", Vec::new());

        let result = engine.run(&path, "Storage/List.sh", "").unwrap().unwrap();

        assert_eq!(result.display_name, "Storage/List.sh");
        assert_eq!(result.raw_output_lines, vec!["local", "local-lvm"]);
        assert_eq!(result.truncated_output(), "local\nlocal-lvm");
    }

    #[test]
    fn test_capture_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let path = leaf(&temp_dir, "List.sh", 0o755);
        let capture = CannedCapture {
            fail: true,
            ..CannedCapture::default()
        };
        let mut engine = ExecutionEngine::new(capture, "/bin/bash", Vec::new());

        let result = engine.run(&path, "List.sh", "");
        assert!(matches!(result, Err(Error::Capture(_))));
    }
}
