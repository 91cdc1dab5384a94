use thiserror::Error;

/// Failures reading or writing the persisted session record
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures exporting the mood journal
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
