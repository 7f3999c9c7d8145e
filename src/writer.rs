/*!
 * Markdown writer for the overview document
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{ProjDumpError, Result};
use crate::types::Document;
use crate::utils::TOOL_NAME;

/// Writes the overview document to disk
pub struct MarkdownWriter {
    /// Destination file
    output_path: PathBuf,
}

impl MarkdownWriter {
    /// Create a new writer targeting `output_path`
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Destination file
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Render the full document text
    pub fn render(&self, document: &Document) -> String {
        format!(
            "# Project Overview: {name}\n\n\
             This document was generated by `{tool}` and contains the project structure and the contents of every readable file.\n\n\
             ## Project Structure\n\n{tree}\n\n---\n\n\
             # File Contents\n\n{contents}",
            name = document.project_name,
            tool = TOOL_NAME,
            tree = document.tree,
            contents = document.contents,
        )
    }

    /// Write the document, replacing any existing file
    pub fn write(&self, document: &Document) -> Result<()> {
        let text = self.render(document);
        self.write_text(&text).map_err(|source| ProjDumpError::Write {
            path: self.output_path.clone(),
            source,
        })?;
        info!("Wrote {} bytes to {}", text.len(), self.output_path.display());
        Ok(())
    }

    fn write_text(&self, text: &str) -> std::io::Result<()> {
        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }
}
