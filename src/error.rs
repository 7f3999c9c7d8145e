//! Global error handling for projdump
//!
//! Only failures that end the run are represented here. Traversal and
//! per-file read problems are recovered where they happen.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for projdump operations
#[derive(Error, Debug)]
pub enum ProjDumpError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// The overview document could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination of the document
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },
}

/// Specialized Result type for projdump operations
pub type Result<T> = std::result::Result<T, ProjDumpError>;

/// Creates a ProjDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ProjDumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl From<ProjDumpError> for io::Error {
    fn from(err: ProjDumpError) -> Self {
        match err {
            ProjDumpError::Io(e) => e,
            ProjDumpError::Write { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
