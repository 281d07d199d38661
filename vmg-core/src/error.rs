/// Error types for loading VeloMagg data
use thiserror::Error;

/// Why a stats or station load failed.
///
/// Variants carry rendered messages rather than source errors so the same
/// type serves both the native reqwest client and the WASM fetch path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The request never completed (offline, DNS failure, timeout)
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status code
    #[error("unexpected response status: {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape
    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::LoadError;

    #[test]
    fn test_error_display() {
        let err = LoadError::Status(503);
        assert_eq!(err.to_string(), "unexpected response status: 503");

        let err = LoadError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network request failed: connection refused");
    }
}
