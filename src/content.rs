/*!
 * File content aggregation
 *
 * Every kept file becomes one markdown section: a `## path` heading followed
 * by a fenced block tagged with the file's language. Documentation-like files
 * are escaped and wrapped in a longer fence so their own markup cannot break
 * out of the block.
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::PathEntry;

/// Standard code fence
pub const FENCE: &str = "```";

/// Fence used around escaped documentation files
pub const LONG_FENCE: &str = "````";

/// Marker emitted instead of a code block for zero-length files
pub const EMPTY_MARKER: &str = "[File is empty]";

/// Escaped form of [`FENCE`]
const ESCAPED_FENCE: &str = "\\`\\`\\`";

/// Extensions whose content is escaped before embedding
pub const SPECIAL_EXTENSIONS: [&str; 3] = ["md", "txt", "rst"];

/// Language tags keyed by dotted lower-cased extension or exact file name
const LANGUAGES: &[(&str, &str)] = &[
    (".py", "python"),
    (".js", "javascript"),
    (".cjs", "javascript"),
    (".mjs", "javascript"),
    (".jsx", "jsx"),
    (".ts", "typescript"),
    (".tsx", "tsx"),
    (".vue", "vue"),
    (".html", "html"),
    (".css", "css"),
    (".scss", "scss"),
    (".json", "json"),
    (".xml", "xml"),
    (".yaml", "yaml"),
    (".yml", "yaml"),
    (".toml", "toml"),
    (".ini", "ini"),
    (".md", "text"),
    (".sh", "shell"),
    (".bash", "shell"),
    (".bat", "batch"),
    (".ps1", "powershell"),
    (".sql", "sql"),
    (".java", "java"),
    (".cpp", "cpp"),
    (".hpp", "cpp"),
    (".c", "c"),
    (".h", "c"),
    (".cs", "csharp"),
    (".go", "go"),
    (".rs", "rust"),
    (".php", "php"),
    (".rb", "ruby"),
    (".swift", "swift"),
    (".kt", "kotlin"),
    ("Dockerfile", "dockerfile"),
    ("Makefile", "makefile"),
];

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,3}) ").unwrap());
static ESCAPED_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\\(#{1,3}) ").unwrap());

/// Line and character counts for one aggregated file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Number of lines
    pub lines: usize,
    /// Number of characters
    pub chars: usize,
    /// Whether the file could be read
    pub readable: bool,
}

/// Language tag for a path; an exact file name match wins over the extension
pub fn language_for(path: &Path) -> &'static str {
    let lookup = |key: &str| {
        LANGUAGES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, lang)| *lang)
    };

    let by_name = path
        .file_name()
        .and_then(|name| lookup(&name.to_string_lossy()));

    by_name
        .or_else(|| lookup(&format!(".{}", lower_extension(path))))
        .unwrap_or("")
}

/// Whether the file's content must be escaped before embedding
pub fn is_special(path: &Path) -> bool {
    SPECIAL_EXTENSIONS.contains(&lower_extension(path).as_str())
}

/// Neutralize fences and leading headings (`#`, `##`, `###`)
pub fn escape_markdown(content: &str) -> String {
    let content = content.replace(FENCE, ESCAPED_FENCE);
    HEADING.replace_all(&content, r"\$1 ").into_owned()
}

/// Undo [`escape_markdown`]
pub fn unescape_markdown(content: &str) -> String {
    let content = ESCAPED_HEADING.replace_all(content, "$1 ");
    content.replace(ESCAPED_FENCE, FENCE)
}

fn lower_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Reads kept files and concatenates them into markdown sections
pub struct ContentAggregator {
    root: PathBuf,
}

impl ContentAggregator {
    /// Create an aggregator for the given project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Concatenate the sections of every file entry, in order
    pub fn aggregate(&self, entries: &[PathEntry]) -> String {
        self.aggregate_with(entries, |_, _| {})
    }

    /// Like [`aggregate`](Self::aggregate), reporting each processed file
    pub fn aggregate_with<F>(&self, entries: &[PathEntry], mut on_file: F) -> String
    where
        F: FnMut(&PathEntry, &FileStats),
    {
        let mut out = String::new();
        for entry in entries.iter().filter(|e| e.is_file()) {
            let stats = self.write_section(entry, &mut out);
            on_file(entry, &stats);
        }
        out
    }

    fn write_section(&self, entry: &PathEntry, out: &mut String) -> FileStats {
        let relative = entry
            .path
            .strip_prefix(&self.root)
            .map(crate::types::to_posix)
            .unwrap_or_else(|_| entry.relative_posix());
        debug!("Aggregating {}", relative);

        out.push_str(&format!("## `{}`\n\n", relative));

        let content = match fs::read(&entry.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Could not read {}: {}", entry.path.display(), e);
                out.push_str(&format!("[Could not read file: {}]\n\n", e));
                return FileStats::default();
            }
        };

        let stats = FileStats {
            lines: content.lines().count(),
            chars: content.chars().count(),
            readable: true,
        };

        if content.is_empty() {
            out.push_str(EMPTY_MARKER);
            out.push_str("\n\n");
            return stats;
        }

        let lang = language_for(&entry.path);
        if is_special(&entry.path) {
            let escaped = escape_markdown(&content);
            out.push_str(&format!("{LONG_FENCE}{lang}\n{escaped}\n{LONG_FENCE}\n\n"));
        } else {
            out.push_str(&format!("{FENCE}{lang}\n{content}\n{FENCE}\n\n"));
        }

        stats
    }
}
