use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer.
#[derive(Debug)]
pub enum Error {
    /// Database operation failed.
    Database(rusqlite::Error),

    /// IO operation failed (opening the database file, creating its parent dir).
    Io(std::io::Error),

    /// A poller adapter reported an empty scope for a program that already
    /// has stored targets. The caller must log and skip; never retried.
    AbortingScopeWipe { program_url: String },

    /// Query-specific error (invalid input, not found, etc.)
    Query(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => write!(f, "database error: {err}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::AbortingScopeWipe { program_url } => write!(
                f,
                "aborting scope wipe for {program_url}: poller returned zero targets for a program with stored history"
            ),
            Error::Query(msg) => write!(f, "query error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::AbortingScopeWipe { .. } => None,
            Error::Query(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    /// True for the `ErrAbortingScopeWipe` sentinel: callers match on this
    /// to decide whether to log-and-continue instead of propagating.
    pub fn is_scope_wipe(&self) -> bool {
        matches!(self, Error::AbortingScopeWipe { .. })
    }
}
