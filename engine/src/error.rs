use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data error: {0}")]
    MarketDataError(String),

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    // Failures while producing a result that are not tied to input data
    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error("Background task failed: {source}")]
    TaskError {
        #[from]
        source: tokio::task::JoinError,
    },

    // Catch-all for anyhow errors when direct conversion is suitable
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Whether the error means the requested symbol has no data, as opposed
    /// to a failure while producing it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::MarketDataError(msg) if msg.to_lowercase().contains("not found"))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
