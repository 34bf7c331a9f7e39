use thiserror::Error;

/// Errors raised at the edges of the engine.
///
/// The scoring operations themselves never fail: missing inputs degrade to a
/// documented default or to `None`. These variants cover configuration,
/// decoding and the bar-series helpers that genuinely need data.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
