/*!
 * Configuration handling for projdump
 */

use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::Result;
use crate::rules::IgnoreRuleSet;
use crate::utils::{DEFAULT_OUTPUT_FILE, TOOL_NAME};

/// Command-line arguments for projdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a markdown overview of a project's structure and file contents",
    long_about = "Writes a single markdown document containing the filtered directory tree of a project followed by the content of every kept file."
)]
pub struct Args {
    /// Project directory to document
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output markdown file name, relative to the project directory
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Comma-separated list of additional patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Do not apply the built-in ignore list
    #[clap(long)]
    pub no_default_ignores: bool,

    /// Suppress progress and the final report
    #[clap(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root
    pub target_dir: PathBuf,

    /// Output file; relative paths are resolved against the project root
    pub output_file: PathBuf,

    /// Additional patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Whether the built-in ignore list applies
    pub use_default_ignores: bool,
}

impl Config {
    /// Configuration with defaults for the given project root
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            ignore_patterns: Vec::new(),
            use_default_ignores: true,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            ignore_patterns: args.ignore_patterns,
            use_default_ignores: !args.no_default_ignores,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        let output = self.output_path()?;
        if let Some(parent) = output.parent() {
            crate::ensure!(
                parent.is_dir(),
                PathNotFound,
                "Output directory not found: {}",
                parent.display()
            );
        }

        crate::ensure!(
            output.file_name().is_some(),
            Config,
            "Output file has no file name: {}",
            self.output_file.display()
        );

        Ok(())
    }

    /// Canonical project root
    pub fn root(&self) -> Result<PathBuf> {
        Ok(fs::canonicalize(&self.target_dir)?)
    }

    /// Where the document is written
    pub fn output_path(&self) -> Result<PathBuf> {
        if self.output_file.is_absolute() {
            Ok(self.output_file.clone())
        } else {
            Ok(self.root()?.join(&self.output_file))
        }
    }

    /// Rule set for this run; the tool and its output are always excluded
    pub fn rules(&self) -> IgnoreRuleSet {
        let mut rules = if self.use_default_ignores {
            IgnoreRuleSet::defaults()
        } else {
            IgnoreRuleSet::default()
        };

        rules.extend(self.ignore_patterns.iter().map(|p| p.trim().to_string()));
        rules.extend([TOOL_NAME]);
        if let Some(name) = self.output_file.file_name() {
            rules.extend([name.to_string_lossy().into_owned()]);
        }
        rules
    }
}
