use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Resolve the data directory bbscope stores its database and config under,
/// by priority:
/// 1. Explicit path (with tilde expansion)
/// 2. `BBSCOPE_PATH` environment variable (with tilde expansion)
/// 3. System data directory (e.g. XDG on Linux)
/// 4. `~/.bbscope` fallback for systems without a standard data directory
pub fn resolve_data_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("BBSCOPE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("bbscope"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".bbscope"));
    }

    Err(Error::Config(
        "could not determine data directory: no HOME or system data directory found".to_string(),
    ))
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_everything() {
        let resolved = resolve_data_path(Some("/explicit/path")).unwrap();
        assert_eq!(resolved, PathBuf::from("/explicit/path"));
    }

    #[test]
    fn expand_tilde_without_home_returns_literal() {
        // Not asserting on HOME-present behavior since it depends on the
        // test environment; this only checks the non-tilde passthrough.
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
