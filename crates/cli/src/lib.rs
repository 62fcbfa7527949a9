//! Script Menu CLI Library
//!
//! This crate provides the command-line interface for script-menu, an
//! interactive launcher that browses a tree of automation scripts and runs
//! one with supplied arguments.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing, folded over the settings file
//! - [`menu`]: The numbered-menu state machine, its rendering and prompts
//!
//! # Examples
//!
//! ```bash
//! # Browse the current directory
//! smenu
//!
//! # Browse a script tree, exporting helper functions to every script
//! smenu /srv/ProxmoxScripts -u /srv/ProxmoxScripts/Utilities
//!
//! # Record through script(1) and don't mirror output while it runs
//! smenu --capture script --quiet
//! ```

pub mod cli_args;
pub mod menu;
