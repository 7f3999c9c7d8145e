/*!
 * Directory walking
 */

use std::fs;

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::rules::PatternMatcher;
use crate::types::{EntryKind, PathEntry};

/// Walks the project root and collects every kept entry
pub struct TreeWalker<'a> {
    /// Classifier deciding which entries survive
    matcher: &'a PatternMatcher,
}

impl<'a> TreeWalker<'a> {
    /// Create a new walker
    pub fn new(matcher: &'a PatternMatcher) -> Self {
        Self { matcher }
    }

    /// Walk the root depth-first, pruning ignored directories, and return
    /// the kept entries sorted directories first, then by lower-cased path.
    ///
    /// Directories that cannot be read contribute no children. Dangling
    /// links are kept as [`EntryKind::Other`]; links to an ancestor are kept
    /// as directories but not followed.
    pub fn walk(&self) -> Vec<PathEntry> {
        let root = self.matcher.root();
        let mut entries = Vec::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| self.keep(e));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    if let Some(entry) = self.recover(&e) {
                        entries.push(entry);
                    } else {
                        warn!("Skipping unreadable entry: {}", e);
                    }
                    continue;
                }
            };

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            entries.push(PathEntry {
                path: entry.path().to_path_buf(),
                relative: relative.to_path_buf(),
                kind: kind_of(&entry),
            });
        }

        sort_entries(&mut entries);
        entries
    }

    /// Entries walkdir reports as errors but that still exist as links:
    /// dangling links and links back to an ancestor. Listing failures of an
    /// already yielded directory return `None`.
    fn recover(&self, err: &walkdir::Error) -> Option<PathEntry> {
        let path = err.path()?;
        let relative = path.strip_prefix(self.matcher.root()).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }

        let kind = if err.loop_ancestor().is_some() {
            EntryKind::Directory
        } else if fs::symlink_metadata(path).ok()?.file_type().is_symlink()
            && fs::metadata(path).is_err()
        {
            EntryKind::Other
        } else {
            return None;
        };

        if self.matcher.should_ignore_kind(path, false) {
            debug!("Ignoring {}", path.display());
            return None;
        }

        debug!("Keeping {} without descending: {}", path.display(), err);
        Some(PathEntry {
            path: path.to_path_buf(),
            relative: relative.to_path_buf(),
            kind,
        })
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        let is_file = entry.file_type().is_file();
        if self.matcher.should_ignore_kind(entry.path(), is_file) {
            debug!("Ignoring {}", entry.path().display());
            return false;
        }
        true
    }
}

/// Sort by (is file, lower-cased absolute path)
pub fn sort_entries(entries: &mut [PathEntry]) {
    entries.sort_by_cached_key(|e| (e.is_file(), e.path.to_string_lossy().to_lowercase()));
}

fn kind_of(entry: &DirEntry) -> EntryKind {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::{self, Write};
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;
    use crate::rules::IgnoreRuleSet;
    use crate::tree::TreeRenderer;

    fn setup() -> io::Result<(tempfile::TempDir, PathBuf)> {
        let temp_dir = tempdir()?;
        let root = fs::canonicalize(temp_dir.path())?;

        fs::create_dir_all(root.join("src").join("nested"))?;
        fs::create_dir_all(root.join("node_modules").join("pkg"))?;
        fs::create_dir(root.join("Docs"))?;

        for rel in [
            "src/main.rs",
            "src/nested/util.rs",
            "node_modules/pkg/index.js",
            "node_modules/keep_me.rs",
            "Docs/guide.md",
            "b.txt",
            "A.txt",
            "logo.png",
        ] {
            let mut f = File::create(root.join(rel))?;
            writeln!(f, "content of {}", rel)?;
        }

        Ok((temp_dir, root))
    }

    fn relative_list(entries: &[PathEntry]) -> Vec<String> {
        entries.iter().map(PathEntry::relative_posix).collect()
    }

    #[test]
    fn test_walk_prunes_ignored_directories() -> io::Result<()> {
        let (_tmp, root) = setup()?;
        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::new(["node_modules", "*.png"]));
        let entries = TreeWalker::new(&matcher).walk();

        let rels = relative_list(&entries);
        assert!(rels.iter().all(|r| !r.starts_with("node_modules")));
        assert!(!rels.contains(&"logo.png".to_string()));
        assert!(rels.contains(&"src/nested/util.rs".to_string()));
        Ok(())
    }

    #[test]
    fn test_walk_order_directories_first_case_insensitive() -> io::Result<()> {
        let (_tmp, root) = setup()?;
        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::new(["node_modules", "*.png"]));
        let entries = TreeWalker::new(&matcher).walk();

        assert_eq!(
            relative_list(&entries),
            vec![
                "Docs",
                "src",
                "src/nested",
                "A.txt",
                "b.txt",
                "Docs/guide.md",
                "src/main.rs",
                "src/nested/util.rs",
            ]
        );

        let first_file = entries.iter().position(PathEntry::is_file).unwrap();
        assert!(entries[..first_file].iter().all(|e| !e.is_file()));
        assert!(entries[first_file..].iter().all(PathEntry::is_file));
        Ok(())
    }

    #[test]
    fn test_walk_is_deterministic() -> io::Result<()> {
        let (_tmp, root) = setup()?;
        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::defaults());
        let walker = TreeWalker::new(&matcher);
        assert_eq!(walker.walk(), walker.walk());
        Ok(())
    }

    #[test]
    fn test_walk_empty_root() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = fs::canonicalize(temp_dir.path())?;
        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::defaults());
        assert!(TreeWalker::new(&matcher).walk().is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_survives_unreadable_directory() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, root) = setup()?;
        let locked = root.join("locked");
        fs::create_dir(&locked)?;
        File::create(locked.join("secret.rs"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Permission bits do not stop a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::new(["node_modules"]));
        let entries = TreeWalker::new(&matcher).walk();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        let rels = relative_list(&entries);
        assert!(rels.contains(&"locked".to_string()));
        assert!(!rels.contains(&"locked/secret.rs".to_string()));
        assert!(rels.contains(&"src/main.rs".to_string()));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_keeps_dangling_symlink() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = fs::canonicalize(temp_dir.path())?;
        fs::write(root.join("a.rs"), "fn a() {}")?;
        std::os::unix::fs::symlink("missing_target", root.join("dangling"))?;

        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::default());
        let entries = TreeWalker::new(&matcher).walk();

        let listed: Vec<(String, EntryKind)> = entries
            .iter()
            .map(|e| (e.relative_posix(), e.kind))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("dangling".to_string(), EntryKind::Other),
                ("a.rs".to_string(), EntryKind::File),
            ]
        );

        let tree = TreeRenderer::new(&root).render(&entries);
        assert!(tree.contains("├── dangling\n└── a.rs"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_ignored_dangling_symlink() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = fs::canonicalize(temp_dir.path())?;
        std::os::unix::fs::symlink("missing_target", root.join("stale.log"))?;

        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::new(["*.log"]));
        assert!(TreeWalker::new(&matcher).walk().is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_symlink_loop_keeps_siblings() -> io::Result<()> {
        let (_tmp, root) = setup()?;
        std::os::unix::fs::symlink(".", root.join("loop"))?;

        let matcher = PatternMatcher::new(&root, IgnoreRuleSet::new(["node_modules", "*.png"]));
        let entries = TreeWalker::new(&matcher).walk();

        let rels = relative_list(&entries);
        assert!(rels.contains(&"loop".to_string()));
        assert!(rels.iter().all(|r| !r.starts_with("loop/")));
        assert!(rels.contains(&"src/nested/util.rs".to_string()));
        assert!(rels.contains(&"Docs/guide.md".to_string()));
        Ok(())
    }
}
