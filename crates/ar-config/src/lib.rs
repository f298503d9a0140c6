//! Assessment report configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for report schemas (sections, fields, classification rules)
//! - The path-expression grammar used by field paths
//! - A read-only schema registry keyed by assessment type
//! - Config resolution (CLI → env → XDG → system → built-in defaults)
//! - Semantic validation

pub mod path;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use path::{CompareOp, PathError, PathExpr, Predicate, Step};
pub use registry::{LoadedRegistry, SchemaRegistry};
pub use resolve::{resolve_schema_path, ConfigSource, SchemaPath};
pub use schema::{ClassificationRule, FieldPath, FieldSpec, FormatterId, ReportSchema, SectionSpec};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for schema table files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
