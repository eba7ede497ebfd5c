use thiserror::Error;

/// Application-wide error type.
///
/// Every fatal condition maps to exactly one variant. Rows that merely fail
/// to yield a usable domain are not errors; they are counted in aggregate by
/// the loader and never surface here.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Arguments ─────────────────────────────────────────────────────────────
    #[error("chunk size must be a positive integer")]
    InvalidChunkSize,

    // ── Input ─────────────────────────────────────────────────────────────────
    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    #[error("failed to read input file {path}: {message}")]
    InputRead { path: String, message: String },

    // ── Output ────────────────────────────────────────────────────────────────
    #[error("failed to create output directory {path}: {message}")]
    OutputDir { path: String, message: String },

    #[error("failed to write chunk file {path}: {message}")]
    ChunkWrite { path: String, message: String },
}
