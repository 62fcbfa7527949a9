//! Interactive numbered menu over the script tree.
//!
//! Each frame lists the current directory's sub-directories and leaf
//! commands, reads one line, and transitions:
//!
//! - `<N>`: open directory `N`, or prompt for arguments and run leaf command `N`
//! - `h<N>`: show help mined from leaf command `N`
//! - `b`: go back up one level (exits at the root)
//! - `e`: exit

pub mod input;
pub mod navigator;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{prompt_arguments, read_line};
pub use navigator::{Navigator, Transition};
pub use types::{MenuCommand, Notice};

/// Input that goes back one level
pub const BACK_OPTION: &str = "b";
/// Input that leaves the menu
pub const EXIT_OPTION: &str = "e";
/// Prefix asking for help on an entry, e.g. `h3`
pub const HELP_PREFIX: char = 'h';
