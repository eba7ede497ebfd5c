//! Partitioning a domain list into fixed-size chunk files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::split::chunk_writer::ChunkWriter;

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// One output file produced by a split run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkFile {
    /// Final path of the chunk file.
    pub path: PathBuf,
    /// Number of domain rows in the file (header excluded).
    pub rows: usize,
}

/// Result of splitting a domain list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitReport {
    /// Chunk files in write order, which is also filename order.
    pub files: Vec<ChunkFile>,
    /// Total domain rows across all chunks.
    pub total_rows: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Splits `domains` into files of at most `chunk_size` entries each.
///
/// Files are named `<stem>_part_0001.csv` onward inside `output_dir`, which
/// is created with its parents on first use. Every file starts with the
/// literal `domain` header; existing files with the same name are
/// overwritten. An empty list produces no files and touches nothing on
/// disk.
///
/// # Errors
///
/// Returns `AppError::InvalidChunkSize` if `chunk_size` is zero (checked
/// before any I/O), `AppError::OutputDir` if the directory cannot be
/// created, or `AppError::ChunkWrite` if a file cannot be written. Chunks
/// persisted before a failure are left in place.
pub fn write_chunks(
    domains: &[String],
    stem: &str,
    output_dir: &Path,
    chunk_size: usize,
) -> Result<SplitReport, AppError> {
    if chunk_size == 0 {
        return Err(AppError::InvalidChunkSize);
    }

    if domains.is_empty() {
        return Ok(SplitReport::default());
    }

    fs::create_dir_all(output_dir).map_err(|e| AppError::OutputDir {
        path: output_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let num_files = domains.len().div_ceil(chunk_size);
    info!(num_files, chunk_size, "splitting domain list");

    let mut report = SplitReport::default();

    for (i, chunk) in domains.chunks(chunk_size).enumerate() {
        let path = output_dir.join(chunk_file_name(stem, i));

        let mut writer = ChunkWriter::create(&path)?;
        for domain in chunk {
            writer.write_domain(domain)?;
        }
        let path = writer.finish()?;

        info!(file = %path.display(), rows = chunk.len(), "created chunk");
        report.total_rows += chunk.len();
        report.files.push(ChunkFile {
            path,
            rows: chunk.len(),
        });
    }

    Ok(report)
}

/// File name for the chunk at `index` (0-based): `<stem>_part_0001.csv` onward.
fn chunk_file_name(stem: &str, index: usize) -> String {
    format!("{}_part_{:04}.csv", stem, index + 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
