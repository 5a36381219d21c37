use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Alias table collision on {key:?}: {first} vs {second}")]
    AliasCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("Unknown competition label: {0}")]
    UnknownCompetition(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Fetch(_) => true,
            _ => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionDefect {
    #[error("rating {value}/10 for {raw_name:?} is outside 0..=10")]
    OutOfRange { raw_name: String, value: u32 },

    #[error("rating digits {digits:?} for {raw_name:?} are not a number")]
    Unparsable { raw_name: String, digits: String },
}
