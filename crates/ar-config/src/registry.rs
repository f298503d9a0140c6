//! Read-only schema table keyed by assessment type.
//!
//! The registry is built once at startup and handed to consumers by
//! reference. Nothing mutates it after construction; a caller that wants to
//! pick up new schemas builds a fresh registry.

use crate::resolve::{resolve_schema_path, ConfigSource};
use crate::schema::ReportSchema;
use crate::validate::{validate_schema, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

const BUILTIN_SCHEMAS: &str = include_str!("../defaults/schemas.json");

/// Schema table: assessment type → report schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    pub schema_version: String,
    #[serde(default)]
    assessments: BTreeMap<String, ReportSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            assessments: BTreeMap::new(),
        }
    }
}

impl SchemaRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in assessment schemas.
    pub fn builtin() -> Self {
        Self::from_embedded(BUILTIN_SCHEMAS)
    }

    /// Parse an embedded table, falling back to an empty registry with an error event.
    fn from_embedded(json: &str) -> Self {
        match Self::from_str(json) {
            Ok(registry) => registry,
            Err(e) => {
                error!(error = %e, code = e.code(), "Embedded schema table failed to parse");
                Self::default()
            }
        }
    }

    /// Add or replace a schema. Intended for construction before sharing.
    pub fn with_schema(mut self, assessment_type: impl Into<String>, schema: ReportSchema) -> Self {
        self.assessments.insert(assessment_type.into(), schema);
        self
    }

    /// Load a registry from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_str(&content)
    }

    /// Parse a registry from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> ValidationResult<Self> {
        let registry: SchemaRegistry = serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;

        if registry.schema_version != crate::CONFIG_SCHEMA_VERSION {
            return Err(ValidationError::VersionMismatch {
                expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
                actual: registry.schema_version,
            });
        }

        Ok(registry)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up the schema for an assessment type.
    pub fn get(&self, assessment_type: &str) -> Option<&ReportSchema> {
        self.assessments.get(assessment_type)
    }

    /// Whether a schema exists for the assessment type.
    pub fn contains(&self, assessment_type: &str) -> bool {
        self.assessments.contains_key(assessment_type)
    }

    /// Configured assessment types in sorted order.
    pub fn assessment_types(&self) -> impl Iterator<Item = &str> {
        self.assessments.keys().map(String::as_str)
    }

    /// Iterate over `(assessment type, schema)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportSchema)> {
        self.assessments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    /// Validate every schema, stopping at the first failure.
    pub fn validate(&self) -> ValidationResult<()> {
        for (assessment_type, schema) in &self.assessments {
            validate_schema(assessment_type, schema)?;
        }
        Ok(())
    }

    /// First validation problem of each schema, keyed by assessment type.
    pub fn problems(&self) -> Vec<(&str, ValidationError)> {
        self.iter()
            .filter_map(|(assessment_type, schema)| {
                validate_schema(assessment_type, schema)
                    .err()
                    .map(|e| (assessment_type, e))
            })
            .collect()
    }
}

/// A registry together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    pub registry: SchemaRegistry,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

impl LoadedRegistry {
    /// Discover and load the schema table.
    ///
    /// Parse and version errors are fatal. Semantic problems are logged and
    /// the table is still returned; the assembler treats bad fields as absent.
    pub fn load(cli_path: Option<&Path>) -> ValidationResult<Self> {
        let resolved = resolve_schema_path(cli_path);

        let registry = match &resolved.path {
            Some(path) => SchemaRegistry::from_file(path)?,
            None => SchemaRegistry::builtin(),
        };

        for (assessment_type, e) in registry.problems() {
            warn!(assessment_type, error = %e, code = e.code(), "Schema has validation problems");
        }

        debug!(
            source = %resolved.source,
            path = ?resolved.path,
            assessments = registry.len(),
            "Loaded schema table"
        );

        Ok(Self {
            registry,
            path: resolved.path,
            source: resolved.source,
        })
    }
}
