use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        data: Option<String>,
    },
    #[error("catalog fetch failed: {message}")]
    Fetch {
        message: String,
        data: Option<String>,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    pub fn auth<T: Into<String>>(message: T) -> Self {
        SnapshotError::Auth {
            message: message.into(),
            data: None,
        }
    }

    pub fn fetch<T: Into<String>>(message: T) -> Self {
        SnapshotError::Fetch {
            message: message.into(),
            data: None,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnapshotError::Write {
            path: path.into(),
            source,
        }
    }

    /// Attach a payload (usually the upstream response body) to auth and fetch errors.
    pub fn with_data(self, payload: impl Into<String>) -> Self {
        match self {
            SnapshotError::Auth { message, .. } => SnapshotError::Auth {
                message,
                data: Some(payload.into()),
            },
            SnapshotError::Fetch { message, .. } => SnapshotError::Fetch {
                message,
                data: Some(payload.into()),
            },
            other => other,
        }
    }

    pub fn data(&self) -> Option<&str> {
        match self {
            SnapshotError::Auth { data, .. } | SnapshotError::Fetch { data, .. } => {
                data.as_deref()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_only_kept_for_remote_failures() {
        let err = SnapshotError::fetch("catalog responded with 500").with_data("boom");
        assert_eq!(err.data(), Some("boom"));
        assert_eq!(err.to_string(), "catalog fetch failed: catalog responded with 500");

        let err = SnapshotError::Config("missing CLIENT_ID".to_string()).with_data("ignored");
        assert_eq!(err.data(), None);
    }
}
