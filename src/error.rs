use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("output error: {0}")]
    Output(#[source] std::io::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl ScanError {
    /// Wrap an io error raised while listing or inspecting `path`.
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_error_names_path() {
        let err = ScanError::access(
            "/no/such/dir",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/no/such/dir"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn storage_error_from_rusqlite() {
        let err: ScanError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, ScanError::Storage(_)));
        assert!(err.to_string().starts_with("storage error"));
    }
}
