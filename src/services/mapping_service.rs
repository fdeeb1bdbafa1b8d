//! Professor-to-course mapping cache.
//!
//! Answers "which courses may professor X see" from a JSON file named in
//! the configuration. The file is read exactly once, during application
//! startup; after that the table is immutable and lookups are lock-free.
//! A missing or broken file degrades lookups to "no courses" instead of
//! taking the host application down.

use std::collections::HashMap;
use std::path::Path;

use tracing::{error, info};

use crate::config::Config;
use crate::error::MappingError;

/// Professor display name → permitted course full names.
pub type ProfessorCourseMap = HashMap<String, Vec<String>>;

/// In-memory mapping cache. Construct once with [`MappingCache::load`],
/// then share by reference; all read paths are pure and total.
#[derive(Debug, Default)]
pub struct MappingCache {
    mapping: ProfessorCourseMap,
}

impl MappingCache {
    /// Load the mapping file resolved against the configured content root.
    ///
    /// Never fails: a missing file, unreadable file or malformed JSON is
    /// logged once at error level and yields an empty cache. The caller is
    /// expected to await this during its startup sequence, before serving
    /// traffic.
    pub async fn load(config: &Config) -> Self {
        let path = config.mapping_file_path();
        match Self::read_mapping_file(&path).await {
            Ok(mapping) => {
                info!(
                    "professor/course mapping loaded from {} ({} professors)",
                    path.display(),
                    mapping.len()
                );
                Self { mapping }
            }
            Err(e) => {
                // one error-level entry; the variant message says whether
                // the file was absent, unreadable or unparseable
                error!("{}", e);
                Self::default()
            }
        }
    }

    /// Build a cache from an already-loaded table. Used by callers that
    /// manage the file themselves, and by tests.
    pub fn from_mapping(mapping: ProfessorCourseMap) -> Self {
        Self { mapping }
    }

    /// Courses the named professor may see. Unknown names get an empty
    /// slice, never an error; keys are matched exactly as they appear in
    /// the file.
    pub fn courses_for_professor(&self, professor_name: &str) -> &[String] {
        self.mapping
            .get(professor_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The whole table, for bulk inspection (admin tooling).
    pub fn snapshot(&self) -> &ProfessorCourseMap {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Fallible read, kept separate so the error kinds stay observable.
    async fn read_mapping_file(path: &Path) -> Result<ProfessorCourseMap, MappingError> {
        if !path.exists() {
            return Err(MappingError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MappingError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        serde_json::from_str(&content).map_err(|e| MappingError::ParseFailed {
            path: path.display().to_string(),
            source: e,
        })
    }
}
