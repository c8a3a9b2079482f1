//! Text report writer for export operations
//!
//! Writes the export output file: one section per collection, one block
//! per document, blocks separated by blank lines. The file is truncated
//! on open, so a run always replaces the previous output entirely.
//!
//! Section format:
//!
//! ```text
//! --- Colección: <name> ---
//! Documento ID: <id>
//!   - <field>: <value>
//!
//! ```
//!
//! A failed collection contributes a single line instead of a section:
//!
//! ```text
//! Error al leer la colección '<name>': <reason>
//! ```

use std::path::{Path, PathBuf};

use mongodb::bson::Document;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::formatter::TextValueFormatter;

/// Buffer capacity for the output writer
const WRITE_BUFFER_CAPACITY: usize = 8 * 1024 * 1024;

/// Writer for the plain-text export report
pub struct TextReportWriter {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Number of documents written across all sections
    documents_written: u64,
    /// Field value renderer
    formatter: TextValueFormatter,
}

impl TextReportWriter {
    /// Create a new text report writer
    ///
    /// Truncates any existing file at `path`.
    ///
    /// # Arguments
    /// * `path` - Output file path
    ///
    /// # Returns
    /// * `Result<Self>` - New writer instance or error
    pub async fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_path(path)?;

        let file = File::create(path).await.map_err(|e| {
            ExportError::InvalidOutputPath(format!("Failed to create file: {e}"))
        })?;

        debug!("Created text report writer for: {}", path.display());

        Ok(Self {
            writer: BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, file),
            path: path.to_path_buf(),
            documents_written: 0,
            formatter: TextValueFormatter::new(),
        })
    }

    /// Write one collection section: header, document blocks, trailing blank line.
    ///
    /// # Arguments
    /// * `name` - Collection name
    /// * `docs` - Documents to write, in source iteration order
    ///
    /// # Returns
    /// * `Result<u64>` - Number of documents written
    pub async fn write_collection(&mut self, name: &str, docs: &[Document]) -> Result<u64> {
        self.write_str(&format!("--- Colección: {name} ---\n")).await?;

        for doc in docs {
            self.write_document(doc).await?;
        }

        self.write_str("\n").await?;

        self.documents_written += docs.len() as u64;
        debug!(
            "Wrote section '{}' ({} documents, total: {})",
            name,
            docs.len(),
            self.documents_written
        );

        Ok(docs.len() as u64)
    }

    /// Write the inline error line for a collection that failed to read.
    pub async fn write_collection_error(&mut self, name: &str, reason: &str) -> Result<()> {
        self.write_str(&format!("Error al leer la colección '{name}': {reason}\n"))
            .await
    }

    /// Write a single document block: identifier line, field lines, blank line.
    ///
    /// `_id` is the identifier; it goes on the `Documento ID:` line and is
    /// excluded from the field list.
    async fn write_document(&mut self, doc: &Document) -> Result<()> {
        let id = doc
            .get("_id")
            .map(|v| self.formatter.format(v))
            .unwrap_or_default();
        self.write_str(&format!("Documento ID: {id}\n")).await?;

        for (key, value) in doc.iter() {
            if key == "_id" {
                continue;
            }
            let rendered = self.formatter.format(value);
            self.write_str(&format!("  - {key}: {rendered}\n")).await?;
        }

        self.write_str("\n").await
    }

    /// Flush buffered output to disk.
    pub async fn finalize(&mut self) -> Result<()> {
        self.writer
            .flush()
            .await
            .map_err(|e| ExportError::WriteFailed(format!("Failed to flush file: {e}")))?;

        debug!(
            "Finalized report file: {} ({} documents)",
            self.path.display(),
            self.documents_written
        );
        Ok(())
    }

    /// Get the current file size in bytes.
    pub async fn file_size(&self) -> Result<u64> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|e| {
            ExportError::WriteFailed(format!("Failed to get file metadata: {e}"))
        })?;
        Ok(metadata.len())
    }

    /// Total documents written across all sections.
    pub fn documents_written(&self) -> u64 {
        self.documents_written
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_str(&mut self, s: &str) -> Result<()> {
        self.writer
            .write_all(s.as_bytes())
            .await
            .map_err(|e| ExportError::WriteFailed(format!("Failed to write to file: {e}")).into())
    }
}

/// Validate that the output path's parent directory exists.
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(ExportError::InvalidOutputPath(format!(
                "Directory does not exist: {}",
                parent.display()
            ))
            .into());
        }
    }

    Ok(())
}
