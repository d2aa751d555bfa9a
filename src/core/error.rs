use std::path::PathBuf;

/// Errors raised while scanning alignment files and reporting the results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open alignment file {}: {source}", .path.display())]
    Open { source: rust_htslib::errors::Error, path: PathBuf },

    #[error("failed to parse record #{index} from {} (HTS file corrupted?): {source}", .path.display())]
    Record { source: rust_htslib::errors::Error, path: PathBuf, index: u64 },

    #[error("failed to write the report: {0}")]
    Report(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
