//! Configuration path utilities and resolved launcher settings.
//!
//! This module resolves the settings file location, expands shell variables
//! like `~` in paths, and turns the optional [`Settings`] into a fully
//! populated [`LauncherConfig`].

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::settings::{CaptureBackend, Settings};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.script-menu/settings.yml";
/// Default starting directory when none is configured
const DEFAULT_ROOT: &str = ".";
/// Default extension identifying leaf commands
const DEFAULT_EXTENSION: &str = "sh";

/// Default shell used to interpret leaf commands without execute permission
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Environment variable pointing leaf commands at the shared helper functions
pub const HELPER_ENV_VAR: &str = "UTILITYPATH";

pub const DEFAULT_TERMINAL_ROWS: u16 = 24;
pub const DEFAULT_TERMINAL_COLUMNS: u16 = 80;

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use script_menu_core::config::get_settings_path;
///
/// let default_path = get_settings_path(&None);
/// assert!(default_path.ends_with("settings.yml"));
///
/// let custom_path = get_settings_path(&Some("/etc/script-menu.yml".to_string()));
/// assert_eq!(custom_path, "/etc/script-menu.yml");
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    let settings_path = match settings_path_arg {
        Some(settings_path) => settings_path,
        None => DEFAULT_SETTINGS_PATH,
    };

    shellexpand::tilde(settings_path).to_string()
}

/// Expands `~` in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Fully resolved launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub root: PathBuf,
    pub extension: String,
    pub shell: String,
    pub utility_path: Option<PathBuf>,
    pub capture: CaptureBackend,
    pub echo_output: bool,
    pub terminal_rows: u16,
    pub terminal_columns: u16,
    pub clear_screen: bool,
}

impl LauncherConfig {
    /// Fills unset settings with defaults.
    ///
    /// The root is not checked here; see [`LauncherConfig::validated_root`].
    ///
    /// # Errors
    ///
    /// Returns an error if the capture backend name is not recognised.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let capture = match settings.capture.as_deref() {
            Some(name) => name.parse()?,
            None => CaptureBackend::default(),
        };

        let extension = settings
            .extension
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
            .trim_start_matches('.')
            .to_string();

        Ok(Self {
            root: expand_path(settings.root.as_deref().unwrap_or(DEFAULT_ROOT)),
            extension,
            shell: settings.shell.unwrap_or_else(|| DEFAULT_SHELL.to_string()),
            utility_path: settings.utility_path.as_deref().map(expand_path),
            capture,
            echo_output: settings.echo_output.unwrap_or(true),
            terminal_rows: settings.terminal_rows.unwrap_or(DEFAULT_TERMINAL_ROWS),
            terminal_columns: settings
                .terminal_columns
                .unwrap_or(DEFAULT_TERMINAL_COLUMNS),
            clear_screen: settings.clear_screen.unwrap_or(true),
        })
    }

    /// Returns the root if it is an existing directory.
    ///
    /// # Errors
    ///
    /// A missing root is fatal at startup: [`Error::MissingRoot`].
    pub fn validated_root(&self) -> Result<&Path> {
        if self.root.is_dir() {
            Ok(&self.root)
        } else {
            Err(Error::MissingRoot(self.root.display().to_string()))
        }
    }

    /// Environment additions handed to every leaf command.
    pub fn leaf_environment(&self) -> Vec<(String, String)> {
        self.utility_path
            .iter()
            .map(|path| (HELPER_ENV_VAR.to_string(), path.display().to_string()))
            .collect()
    }
}
