use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogError {
    /// Network or transport failure reaching a provider.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider-reported throttling (HTTP 429).
    #[error("Provider rate limited: {0}")]
    ProviderRateLimited(String),

    /// Schema violation inside an otherwise successful provider response.
    #[error("Malformed provider response: {0}")]
    ProviderMalformedResponse(String),

    /// No record at any tier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache medium I/O failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation not offered by the addressed source.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::ProviderUnavailable("request timeout".to_string())
        } else if err.is_connect() {
            CatalogError::ProviderUnavailable("failed to connect to provider".to_string())
        } else if err.is_decode() {
            CatalogError::ProviderMalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => CatalogError::ProviderRateLimited("too many requests".to_string()),
                404 => CatalogError::NotFound("provider resource not found".to_string()),
                _ => CatalogError::ProviderUnavailable(format!("HTTP {}: {}", status, err)),
            }
        } else {
            CatalogError::ProviderUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::ProviderMalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

// Result type alias for convenience
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match CatalogError::from(io) {
            CatalogError::Storage(msg) => assert!(msg.contains("denied")),
            other => panic!("expected Storage, got {:?}", other),
        }
    }

    #[test]
    fn json_errors_become_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        assert!(matches!(
            CatalogError::from(err),
            CatalogError::ProviderMalformedResponse(_)
        ));
    }
}
