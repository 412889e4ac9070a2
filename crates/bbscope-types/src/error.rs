use std::fmt;

/// Result type for bbscope-types operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur building or validating domain types.
#[derive(Debug)]
pub enum Error {
    /// `BuildEntries` was called without a required field (program_url, platform).
    MissingField(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for Error {}
