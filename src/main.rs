//! CLI entry point: read a domain list CSV, normalize it, and write it back
//! out as fixed-size chunk files.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use domainsplit::error::AppError;
use domainsplit::loader::load_domains;
use domainsplit::split::write_chunks;

/// Split a domain list CSV into fixed-size chunk files.
///
/// The input may be a bare one-column list or `rank,domain` pairs, with or
/// without a header row. Output files contain a single `domain` column.
#[derive(Parser, Debug)]
#[command(name = "domainsplit", version, about)]
struct Cli {
    /// Source CSV file (`rank,domain` pairs or one domain per line)
    #[arg(default_value = "top-1m.csv")]
    input_file: PathBuf,

    /// Directory for the chunk files, created if missing
    #[arg(default_value = "split")]
    output_dir: PathBuf,

    /// Maximum number of domains per chunk file
    #[arg(default_value_t = 500)]
    chunk_size: usize,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    // Reject a zero chunk size before touching the filesystem.
    if cli.chunk_size == 0 {
        return Err(AppError::InvalidChunkSize);
    }

    info!(file = %cli.input_file.display(), "reading domain list");
    let list = load_domains(&cli.input_file)?;

    if list.skipped > 0 {
        warn!(skipped = list.skipped, "dropped rows without a usable domain");
    }
    info!(domains = list.domains.len(), "domains found");

    if list.domains.is_empty() {
        warn!("no domains found in the input file, nothing to write");
        return Ok(());
    }

    let stem = cli
        .input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "domains".to_owned());

    let report = write_chunks(&list.domains, &stem, &cli.output_dir, cli.chunk_size)?;

    info!(
        files = report.files.len(),
        rows = report.total_rows,
        dir = %cli.output_dir.display(),
        "split complete"
    );

    Ok(())
}
