use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Failed to read source: {0}")]
    SourceRead(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledgers have not been loaded for this session")]
    LedgersNotLoaded,

    #[error("No date has been selected for detail matching")]
    NoDateSelected,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
