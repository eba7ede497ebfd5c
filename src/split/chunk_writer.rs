//! Atomic writer for a single chunk file.
//!
//! Writes to a temporary file in the destination directory, then atomically
//! replaces the final path on `finish()`. If dropped before finishing, the
//! temporary file is cleaned up automatically.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::{Terminator, Writer, WriterBuilder};
use tempfile::NamedTempFile;

use crate::error::AppError;

/// Column header written at the top of every chunk file.
pub const CHUNK_HEADER: &str = "domain";

/// Writer for one chunk file.
///
/// The header row is emitted on creation; callers only append domain rows
/// and call `finish()` to persist the file under its final name.
pub struct ChunkWriter {
    writer: Writer<BufWriter<NamedTempFile>>,
    final_path: PathBuf,
}

impl ChunkWriter {
    /// Creates a writer targeting `final_path` and emits the header row.
    ///
    /// The temporary file lives in the same directory as `final_path` so the
    /// final rename stays on one filesystem.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ChunkWrite` if the parent directory cannot be
    /// determined or the temporary file cannot be created.
    pub fn create(final_path: impl AsRef<Path>) -> Result<Self, AppError> {
        let final_path = final_path.as_ref().to_path_buf();

        let parent = final_path
            .parent()
            .ok_or_else(|| chunk_err(&final_path, "path has no parent directory".to_string()))?;

        let temp = NamedTempFile::new_in(parent)
            .map_err(|e| chunk_err(&final_path, format!("failed to create temp file: {}", e)))?;

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(BufWriter::new(temp));

        writer
            .write_record([CHUNK_HEADER])
            .map_err(|e| chunk_err(&final_path, format!("failed to write header: {}", e)))?;

        Ok(Self { writer, final_path })
    }

    /// Appends one domain row.
    pub fn write_domain(&mut self, domain: &str) -> Result<(), AppError> {
        self.writer
            .write_record([domain])
            .map_err(|e| chunk_err(&self.final_path, format!("failed to write row: {}", e)))
    }

    /// Flushes all buffers and atomically persists the chunk to its final
    /// name, overwriting any existing file. Returns the final path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ChunkWrite` if flushing or persisting fails; the
    /// temporary file is cleaned up in that case.
    pub fn finish(self) -> Result<PathBuf, AppError> {
        let Self { writer, final_path } = self;

        let buf_writer = writer
            .into_inner()
            .map_err(|e| chunk_err(&final_path, format!("failed to flush csv writer: {}", e.error())))?;

        let temp = buf_writer
            .into_inner()
            .map_err(|e| chunk_err(&final_path, format!("failed to flush buffer: {}", e.error())))?;

        temp.persist(&final_path)
            .map_err(|e| chunk_err(&final_path, format!("failed to persist file: {}", e.error)))?;

        Ok(final_path)
    }
}

fn chunk_err(path: &Path, message: String) -> AppError {
    AppError::ChunkWrite {
        path: path.display().to_string(),
        message,
    }
}
