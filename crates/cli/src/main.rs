use clap::Parser;
use log::{debug, info};
use std::io::{stdin, stdout, IsTerminal};
use std::process::ExitCode;

use script_menu_cli::cli_args::Args;
use script_menu_cli::menu::Navigator;
use script_menu_core::capture::{PtyCapture, ScriptCapture, TerminalCapture};
use script_menu_core::config::{self, LauncherConfig};
use script_menu_core::error::Result;
use script_menu_core::execution::ExecutionEngine;
use script_menu_core::file_handling;
use script_menu_core::settings::CaptureBackend;

/// Load the settings file and fold the command-line overrides over it
fn initialize_config(args: &Args) -> Result<LauncherConfig> {
    let settings_path = config::get_settings_path(&args.settings_path);
    debug!("Settings path: `{}`", settings_path);

    let settings = file_handling::get_settings(&settings_path)?.overridden_by(args.to_settings());
    let launcher_config = LauncherConfig::from_settings(settings)?;
    debug!("Resolved configuration: {:?}", launcher_config);

    Ok(launcher_config)
}

fn build_capture(launcher_config: &LauncherConfig) -> Box<dyn TerminalCapture> {
    match launcher_config.capture {
        CaptureBackend::Pty => Box::new(
            PtyCapture::new(
                launcher_config.terminal_rows,
                launcher_config.terminal_columns,
                launcher_config.echo_output,
            )
            .with_operator_input(stdin().is_terminal()),
        ),
        CaptureBackend::Script => Box::new(ScriptCapture::new(launcher_config.echo_output)),
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let launcher_config = initialize_config(&args)?;

    // A missing root is fatal before anything is drawn
    let root = launcher_config.validated_root()?;
    info!(
        "Browsing `{}` for `*.{}` scripts, capturing with {}",
        root.display(),
        launcher_config.extension,
        launcher_config.capture
    );

    let engine = ExecutionEngine::new(
        build_capture(&launcher_config),
        launcher_config.shell.clone(),
        launcher_config.leaf_environment(),
    );

    let stdin = stdin();
    let mut navigator = Navigator::new(&launcher_config, engine, stdin.lock(), stdout());
    navigator.run()
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
