/*!
 * projdump - Generate a markdown overview of a project
 *
 * The overview holds the filtered directory tree of a project followed by the
 * content of every kept file, ready to hand to a reader or an LLM in one pass.
 */

pub mod config;
pub mod content;
pub mod error;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use content::{escape_markdown, language_for, unescape_markdown, ContentAggregator};
pub use error::{ProjDumpError, Result};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use rules::{IgnoreRuleSet, PatternMatcher};
pub use scanner::{Scanner, ScannerStatistics};
pub use tree::TreeRenderer;
pub use types::{Document, EntryKind, PathEntry};
pub use walker::TreeWalker;
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
