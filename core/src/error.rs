use thiserror::Error;

#[derive(Error, Debug)]
pub enum MissionError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown stats field '{field}'")]
    UnknownStatField { field: String },

    #[error("Stats field '{field}' requires a numeric value")]
    InvalidStatValue { field: String },

    #[error("Invalid log severity '{value}'")]
    InvalidSeverity { value: String },

    #[error("Operation log message must not be empty")]
    EmptyLogMessage,

    #[error("Assistant query must not be empty")]
    EmptyQuery,

    #[error("Unsupported timeline speed {speed}x")]
    InvalidTimelineSpeed { speed: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type MissionResult<T> = Result<T, MissionError>;
