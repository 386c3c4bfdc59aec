use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request superseded by a newer one")]
    Superseded,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl AtlasError {
    /// True for failures of the remote data source: network errors, non-2xx
    /// responses, missing records and timeouts. UIs answer these with a retry
    /// message rather than aborting.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AtlasError::Http(_)
                | AtlasError::Status { .. }
                | AtlasError::NotFound(_)
                | AtlasError::Timeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_are_fetch_errors() {
        let err = AtlasError::Status {
            url: "http://x/v3.1/all".to_string(),
            status: 503,
        };
        assert!(err.is_fetch_error());
        assert_eq!(
            err.to_string(),
            "Request to http://x/v3.1/all failed with status 503"
        );
    }

    #[test]
    fn test_store_errors_are_not_fetch_errors() {
        assert!(!AtlasError::Store("disk full".into()).is_fetch_error());
        assert!(!AtlasError::Superseded.is_fetch_error());
    }
}
