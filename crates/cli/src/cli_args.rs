//! Command-line argument parsing.
//!
//! Every flag here mirrors a field of the settings file and, when given,
//! overrides it.

use clap::Parser;
use script_menu_core::settings::Settings;

/// Command-line arguments for the script-menu launcher.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use script_menu_cli::cli_args::Args;
///
/// let args = Args::parse_from(["smenu", "/srv/scripts", "--no-clear"]);
/// assert_eq!(args.root.as_deref(), Some("/srv/scripts"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Directory to start browsing from.
    ///
    /// If not provided, the settings file `root` is used, then the current directory.
    #[arg(num_args(1))]
    pub root: Option<String>,

    /// Path to the settings YAML.
    ///
    /// If not provided, defaults to `~/.script-menu/settings.yml`.
    #[arg(long, short = 's')]
    pub settings_path: Option<String>,

    /// File extension identifying runnable scripts, e.g. `sh`.
    #[arg(long, short = 'x')]
    pub extension: Option<String>,

    /// Interpreter for scripts that lack execute permission.
    #[arg(long)]
    pub shell: Option<String>,

    /// Helper functions exported to scripts as `UTILITYPATH`.
    #[arg(long, short = 'u')]
    pub utility_path: Option<String>,

    /// How script output is recorded: `pty` or `script`.
    #[arg(long, short = 'c')]
    pub capture: Option<String>,

    /// Don't clear the screen before drawing each menu.
    #[arg(long, action)]
    pub no_clear: bool,

    /// Don't mirror script output while it runs; only the summary is shown.
    #[arg(long, short = 'q', action)]
    pub quiet: bool,
}

impl Args {
    /// The settings these arguments override. Unset flags stay `None`.
    #[must_use]
    pub fn to_settings(&self) -> Settings {
        Settings {
            root: self.root.clone(),
            extension: self.extension.clone(),
            shell: self.shell.clone(),
            utility_path: self.utility_path.clone(),
            capture: self.capture.clone(),
            echo_output: self.quiet.then_some(false),
            clear_screen: self.no_clear.then_some(false),
            ..Settings::default()
        }
    }
}
