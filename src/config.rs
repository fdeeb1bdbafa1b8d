use std::path::PathBuf;

use crate::error::{AppResult, ConfigError};

/// Runtime configuration, read from environment variables.
///
/// Everything has a default except the analytics base URL: a gateway that
/// does not know where the analytics API lives is misconfigured and must
/// not start (degrading would silently hide a deployment mistake).
#[derive(Clone, Debug)]
pub struct Config {
    /// Base address of the analytics API, e.g. `http://localhost:5000`
    pub analytics_base_url: String,
    /// Content root against which the mapping file path is resolved
    pub content_root: PathBuf,
    /// Path of the professor/course mapping file, relative to the content root
    pub professor_mapping_file: String,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
}

const ANALYTICS_API_BASE_URL: &str = "ANALYTICS_API_BASE_URL";
const CONTENT_ROOT: &str = "CONTENT_ROOT";
const PROFESSOR_MAPPING_FILE: &str = "PROFESSOR_MAPPING_FILE";
const ANALYTICS_TIMEOUT_SECS: &str = "ANALYTICS_TIMEOUT_SECS";

const DEFAULT_MAPPING_FILE: &str = "professor_courses.json";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let analytics_base_url =
            std::env::var(ANALYTICS_API_BASE_URL).map_err(|_| ConfigError::EnvVarNotFound {
                var_name: ANALYTICS_API_BASE_URL.to_string(),
            })?;

        let content_root = std::env::var(CONTENT_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let professor_mapping_file = std::env::var(PROFESSOR_MAPPING_FILE)
            .unwrap_or_else(|_| DEFAULT_MAPPING_FILE.to_string());

        let request_timeout_secs = match std::env::var(ANALYTICS_TIMEOUT_SECS) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: ANALYTICS_TIMEOUT_SECS.to_string(),
                value: raw,
                expected_type: "u64".to_string(),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            analytics_base_url,
            content_root,
            professor_mapping_file,
            request_timeout_secs,
        })
    }

    /// Absolute location of the mapping file: content root + relative path.
    pub fn mapping_file_path(&self) -> PathBuf {
        self.content_root.join(&self.professor_mapping_file)
    }
}
