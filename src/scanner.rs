/*!
 * Overview generation: walk, render, aggregate
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::info;

use crate::config::Config;
use crate::content::ContentAggregator;
use crate::error::Result;
use crate::report::FileReportInfo;
use crate::rules::PatternMatcher;
use crate::tree::TreeRenderer;
use crate::types::{Document, PathEntry};
use crate::walker::TreeWalker;

/// Scanner statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Number of kept entries (files and directories)
    pub entries: usize,
    /// Number of files aggregated
    pub files_processed: usize,
    /// Number of files that could not be read
    pub files_unreadable: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Details for each file, keyed by relative path
    pub file_details: BTreeMap<String, FileReportInfo>,
}

/// Produces the overview document for a project root
pub struct Scanner {
    /// Canonical project root
    root: PathBuf,
    /// Path classifier for this run
    matcher: PatternMatcher,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner; fails if the root cannot be resolved
    pub fn new(config: &Config, progress: Arc<ProgressBar>) -> Result<Self> {
        let root = config.root()?;
        let matcher = PatternMatcher::new(&root, config.rules());
        Ok(Self {
            root,
            matcher,
            progress,
        })
    }

    /// Canonical project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path classifier used by the walk
    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Collect the kept entries in document order
    pub fn collect(&self) -> Vec<PathEntry> {
        self.progress.set_message("Filtering project paths...");
        let entries = TreeWalker::new(&self.matcher).walk();
        info!(
            "Kept {} entries under {}",
            entries.len(),
            self.root.display()
        );
        entries
    }

    /// Build the document from already collected entries
    pub fn build(&self, entries: &[PathEntry]) -> (Document, ScannerStatistics) {
        let mut stats = ScannerStatistics {
            entries: entries.len(),
            ..Default::default()
        };

        self.progress.set_message("Rendering directory tree...");
        let tree = TreeRenderer::new(&self.root).render(entries);

        let file_count = entries.iter().filter(|e| e.is_file()).count();
        self.progress.set_length(file_count as u64);
        self.progress.set_position(0);

        let contents =
            ContentAggregator::new(&self.root).aggregate_with(entries, |entry, file_stats| {
                let rel = entry.relative_posix();
                self.progress.inc(1);
                self.progress.set_message(format!("Processing {}", rel));

                stats.files_processed += 1;
                if !file_stats.readable {
                    stats.files_unreadable += 1;
                }
                stats.total_lines += file_stats.lines;
                stats.total_chars += file_stats.chars;
                stats.file_details.insert(
                    rel,
                    FileReportInfo {
                        lines: file_stats.lines,
                        chars: file_stats.chars,
                    },
                );
            });

        let document = Document {
            project_name: self
                .root
                .file_name()
                .unwrap_or(self.root.as_os_str())
                .to_string_lossy()
                .to_string(),
            tree,
            contents,
        };

        (document, stats)
    }

    /// Walk the root and build the document
    pub fn scan(&self) -> (Document, ScannerStatistics) {
        let entries = self.collect();
        self.build(&entries)
    }
}
