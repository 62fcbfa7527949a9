//! Directory enumeration for the script tree.
//!
//! Listings are never cached: every menu redraw calls [`list`] again so
//! changes made on disk while the navigator runs show up immediately.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    LeafCommand,
}

/// One child of a browsed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

impl Display for TreeEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EntryKind::Directory => write!(formatter, "{}/", self.name),
            EntryKind::LeafCommand => formatter.write_str(&self.name),
        }
    }
}

fn is_leaf_command(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|found| found.eq_ignore_ascii_case(extension))
}

/// Lists the immediate children of `directory`.
///
/// Directories come first, then leaf commands (files with `extension`), each
/// group sorted by name. Hidden entries (leading `.`) and files with any
/// other extension are skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list(directory: &Path, extension: &str) -> Result<Vec<TreeEntry>> {
    let read_dir = fs::read_dir(directory).map_err(|e| {
        Error::io_error(
            "directory".to_string(),
            directory.display().to_string(),
            e,
        )
    })?;

    let mut entries = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| {
            Error::io_error(
                "directory entry".to_string(),
                directory.display().to_string(),
                e,
            )
        })?;

        let name = dir_entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        // Follows symlinks, so a linked directory is browsable
        let path = dir_entry.path();
        let kind = if path.is_dir() {
            EntryKind::Directory
        } else if is_leaf_command(&path, extension) {
            EntryKind::LeafCommand
        } else {
            continue;
        };

        entries.push(TreeEntry { name, path, kind });
    }

    let entries: Vec<TreeEntry> = entries
        .into_iter()
        .sorted_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)))
        .collect();

    debug!(
        "Listed {} entries in `{}`",
        entries.len(),
        directory.display()
    );

    Ok(entries)
}

/// The numbered view of one directory, rebuilt on every redraw.
///
/// Indices shown to the operator are 1-based and contiguous in listing order.
#[derive(Debug, Clone)]
pub struct MenuFrame {
    pub directory: PathBuf,
    entries: Vec<TreeEntry>,
}

impl MenuFrame {
    /// Enumerates `directory` and indexes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn build(directory: &Path, extension: &str) -> Result<Self> {
        Ok(Self {
            directory: directory.to_path_buf(),
            entries: list(directory, extension)?,
        })
    }

    /// Looks up a 1-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TreeEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Entries paired with their 1-based index, in display order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &TreeEntry)> {
        self.entries.iter().enumerate().map(|(i, entry)| (i + 1, entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, File};
    use tempfile::TempDir;

    fn populate(root: &Path) {
        create_dir(root.join("Storage")).unwrap();
        create_dir(root.join("Networking")).unwrap();
        create_dir(root.join(".git")).unwrap();
        File::create(root.join("Ping.sh")).unwrap();
        File::create(root.join("Backup.sh")).unwrap();
        File::create(root.join(".hidden.sh")).unwrap();
        File::create(root.join("README.md")).unwrap();
    }

    #[test]
    fn test_list_directories_first_then_sorted_leaves() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path());

        let entries = list(temp_dir.path(), "sh").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["Networking", "Storage", "Backup.sh", "Ping.sh"]);
        assert!(entries[0].is_directory());
        assert!(entries[1].is_directory());
        assert_eq!(entries[2].kind, EntryKind::LeafCommand);
        assert_eq!(entries[3].kind, EntryKind::LeafCommand);
    }

    #[test]
    fn test_list_is_stable_across_calls() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path());

        let first = list(temp_dir.path(), "sh").unwrap();
        let second = list(temp_dir.path(), "sh").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_reflects_filesystem_changes() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path());
        assert_eq!(list(temp_dir.path(), "sh").unwrap().len(), 4);

        File::create(temp_dir.path().join("Aardvark.sh")).unwrap();
        let entries = list(temp_dir.path(), "sh").unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].name, "Aardvark.sh");
    }

    #[test]
    fn test_list_missing_directory() {
        let result = list(Path::new("/this/path/does/not/exist"), "sh");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_menu_frame_indices_are_contiguous() {
        let temp_dir = TempDir::new().unwrap();
        populate(temp_dir.path());

        let frame = MenuFrame::build(temp_dir.path(), "sh").unwrap();
        let indices: Vec<usize> = frame.indexed().map(|(i, _)| i).collect();

        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(frame.len(), 4);
        assert!(frame.get(0).is_none());
        assert_eq!(frame.get(1).unwrap().name, "Networking");
        assert_eq!(frame.get(4).unwrap().name, "Ping.sh");
        assert!(frame.get(5).is_none());
    }

    #[test]
    fn test_tree_entry_display() {
        let directory = TreeEntry {
            name: "Cluster".to_string(),
            path: PathBuf::from("Cluster"),
            kind: EntryKind::Directory,
        };
        let leaf = TreeEntry {
            name: "Join.sh".to_string(),
            path: PathBuf::from("Join.sh"),
            kind: EntryKind::LeafCommand,
        };

        assert_eq!(format!("{directory}"), "Cluster/");
        assert_eq!(format!("{leaf}"), "Join.sh");
    }
}
