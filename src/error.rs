use thiserror::Error;

/// Errors raised while reading rota inputs or building a horizon.
///
/// Running out of candidates or hitting the swap budget during a repair is
/// not an error; the engine logs it and returns what it has.
#[derive(Debug, Error)]
pub enum RotaError {
    #[error("invalid date {0:?}: expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),

    #[error("horizon contains no dates")]
    EmptyHorizon,

    #[error("horizon is not contiguous: {previous} is followed by {next}")]
    NonContiguousHorizon { previous: String, next: String },

    #[error("horizon end {end} is before start {start}")]
    InvertedRange { start: String, end: String },

    #[error("unsupported data file {0:?}: expected a .csv or .json extension")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RotaError>;
