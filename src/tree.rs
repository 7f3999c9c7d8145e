/*!
 * Text tree rendering
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::PathEntry;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Renders kept entries as a fenced box-drawing tree
pub struct TreeRenderer {
    root: PathBuf,
}

impl TreeRenderer {
    /// Create a renderer for the given project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Render `entries` (already in walk order) under the root name
    pub fn render(&self, entries: &[PathEntry]) -> String {
        let mut children: HashMap<&Path, Vec<&PathEntry>> = HashMap::new();
        for entry in entries {
            if let Some(parent) = entry.path.parent() {
                children.entry(parent).or_default().push(entry);
            }
        }

        let root_name = self
            .root
            .file_name()
            .unwrap_or(self.root.as_os_str())
            .to_string_lossy();

        let mut lines = vec![format!("{}/", root_name)];
        render_children(&self.root, "", &children, &mut lines);

        format!("```\n{}\n```", lines.join("\n"))
    }
}

fn render_children(
    dir: &Path,
    prefix: &str,
    children: &HashMap<&Path, Vec<&PathEntry>>,
    lines: &mut Vec<String>,
) {
    let Some(kids) = children.get(dir) else {
        return;
    };

    for (i, child) in kids.iter().enumerate() {
        let is_last = i == kids.len() - 1;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, child.name()));

        if child.is_dir() {
            let next = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            render_children(&child.path, &next, children, lines);
        }
    }
}
