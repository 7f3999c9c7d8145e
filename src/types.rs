/*!
 * Core types and data structures for projdump
 */

use std::path::{Component, Path, PathBuf};

/// Kind of a filesystem entry found during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (or symlink resolving to one)
    Directory,
    /// Regular file (or symlink resolving to one)
    File,
    /// Dangling symlinks, sockets, fifos
    Other,
}

/// A kept filesystem entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Absolute location
    pub path: PathBuf,
    /// Path relative to the project root
    pub relative: PathBuf,
    /// File, directory or other
    pub kind: EntryKind,
}

impl PathEntry {
    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Base name of the entry
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Relative path joined with `/`
    pub fn relative_posix(&self) -> String {
        to_posix(&self.relative)
    }
}

/// Join the normal components of a path with `/`
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The assembled overview document
#[derive(Debug, Clone)]
pub struct Document {
    /// Base name of the project root
    pub project_name: String,
    /// Fenced directory tree
    pub tree: String,
    /// Concatenated per-file sections
    pub contents: String,
}
