//! Field resolution, classification and rendering for assessment reports.
//!
//! Given a nested session record and the report schema for its assessment
//! type, the assembler produces an ordered list of sections with resolved,
//! formatted and classified fields. Fields whose value cannot be found are
//! omitted; nothing in the field pipeline returns an error.
//!
//! # Pipeline
//!
//! - [`resolve`]: path expressions evaluated against the record
//! - [`format`]: named formatters for multi-path fields
//! - [`classify`]: half-open range classification of numeric values
//! - [`assemble`]: schema walk producing an [`AssembledReport`]
//! - [`generator`]: [`HtmlRenderer`] behind the [`DocumentRenderer`] trait
//!
//! # Example
//!
//! ```
//! use ar_config::SchemaRegistry;
//! use ar_report::{HtmlRenderer, MemoryRecordStore, ReportService};
//! use serde_json::json;
//!
//! let schemas = SchemaRegistry::builtin();
//! let store = MemoryRecordStore::new().with_record(
//!     "s1",
//!     json!({"assessment_id": "as_hr_02", "bodyCompositionData": {"BMI": 17}}),
//! );
//!
//! let service = ReportService::new(&store, &schemas);
//! let prepared = service.prepare("s1").unwrap();
//! let bmi = prepared.report.field("Body Composition", "BMI").unwrap();
//! assert_eq!(bmi.classification.as_deref(), Some("Underweight"));
//!
//! let (_meta, html) = service.render("s1", &HtmlRenderer::default()).unwrap();
//! assert!(html.contains("Underweight"));
//! ```

pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod resolve;
pub mod service;
pub mod store;
pub mod value;

pub use assemble::{assemble, assemble_field, AssembledReport, AssembledSection, ResolvedField};
pub use classify::{classify, UNKNOWN_STATUS};
pub use config::{RenderConfig, ReportTheme};
pub use error::{ReportError, Result};
pub use format::{formatter, Formatter};
pub use generator::{DocumentRenderer, HtmlRenderer};
pub use resolve::{resolve, resolve_str, Resolution};
pub use service::{PreparedReport, ReportMeta, ReportService, SessionPayload};
pub use store::{JsonRecordStore, MemoryRecordStore, Record, RecordStore};
pub use value::display_value;
