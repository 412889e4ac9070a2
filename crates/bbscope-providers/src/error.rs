use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Authentication failed outright — the spec requires pollers to
    /// surface this as a hard error so the coordinator skips the platform.
    Authentication(String),

    /// Transport failure (DNS, TLS, timeout, connection reset).
    Http(reqwest::Error),

    /// Platform returned a body we couldn't decode as JSON, or JSON that
    /// didn't have the shape we expected.
    Decode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "authentication failed: {msg}"),
            Error::Http(err) => write!(f, "http error: {err}"),
            Error::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
