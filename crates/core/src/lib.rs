//! Script Menu Core Library
//!
//! This crate provides the core functionality for script-menu, an interactive
//! terminal launcher for browsing a tree of automation scripts and running
//! one with supplied arguments.
//!
//! # Key Features
//!
//! - **Tree Enumeration**: List a directory's sub-directories and leaf commands
//! - **Help Extraction**: Mine a leaf command's leading comment block for usage
//! - **Execution**: Run a leaf command on a pseudo-terminal and capture its output
//! - **Truncation**: Reduce captured output to a scannable head and tail
//! - **Session State**: Remember the last run for display across redraws
//! - **Settings**: Optional YAML settings with command-line overrides
//!
//! # Examples
//!
//! Listing the scripts under a directory:
//!
//! ```no_run
//! use std::path::Path;
//! use script_menu_core::tree::MenuFrame;
//!
//! let frame = MenuFrame::build(Path::new("/srv/scripts"), "sh")?;
//! for (index, entry) in frame.indexed() {
//!     println!("{index}) {entry}");
//! }
//! # Ok::<(), script_menu_core::error::Error>(())
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod help;
pub mod session;
pub mod settings;
pub mod tree;
pub mod truncation;
