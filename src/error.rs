
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollsError {
    // Absent and not-yet-published records are reported identically.
    #[error("No {entity} matches the given query")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid record: {0}")]
    Invalid(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PollsError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PollsError>;

// Helper conversions
impl From<rusqlite::Error> for PollsError {
    fn from(e: rusqlite::Error) -> Self { Self::Storage(e.to_string()) }
}
impl From<config::ConfigError> for PollsError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl<T> From<std::sync::PoisonError<T>> for PollsError {
    fn from(e: std::sync::PoisonError<T>) -> Self { Self::Lock(e.to_string()) }
}
