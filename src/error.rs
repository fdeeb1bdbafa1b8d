use thiserror::Error;

/// Top-level application error type.
///
/// Only startup-time failures ever reach a caller as an `Err`; everything
/// that happens after startup degrades at the component boundary instead
/// (empty map, absent result) and is logged there.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("mapping file error: {0}")]
    Mapping(#[from] MappingError),

    #[error("analytics API error: {0}")]
    Api(#[from] ApiError),
}

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var_name} is not set")]
    EnvVarNotFound { var_name: String },

    #[error("environment variable {var_name} has value '{value}', expected {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// Errors raised while reading the professor/course mapping file.
///
/// Distinguished so the load path can log "not found" differently from
/// "unreadable" and "unparseable"; all three degrade to an empty map.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("mapping file not found: {path}")]
    NotFound { path: String },

    #[error("failed to read mapping file {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse mapping file {path}: {source}")]
    ParseFailed {
        path: String,
        source: serde_json::Error,
    },
}

/// Errors raised by calls to the remote analytics API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Remote answered with a non-success status other than 404.
    #[error("{endpoint} returned HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },

    /// Remote answered 404 for the requested resource.
    #[error("resource not found: {endpoint}")]
    NotFound { endpoint: String },

    /// Body was not decodable into the expected shape.
    #[error("failed to decode response from {endpoint}: {source}")]
    JsonParseFailed {
        endpoint: String,
        source: serde_json::Error,
    },
}

impl ApiError {
    /// True when the failure means "no such resource" rather than
    /// "service unreachable or broken".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;
