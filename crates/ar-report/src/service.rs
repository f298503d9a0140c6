//! Session-level report preparation.
//!
//! [`ReportService`] ties the record store and schema table together: look up
//! the record, read its assessment type, look up the schema, assemble.

use crate::assemble::{assemble, AssembledReport};
use crate::error::{ReportError, Result};
use crate::generator::DocumentRenderer;
use crate::store::{Record, RecordStore};
use ar_config::{ReportSchema, SchemaRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Record key naming the assessment type.
pub const ASSESSMENT_TYPE_KEY: &str = "assessment_id";

/// Identifying data for one generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub session_id: String,
    pub assessment_type: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    pub fn new(session_id: impl Into<String>, assessment_type: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            assessment_type: assessment_type.into(),
            generated_at: Utc::now(),
        }
    }

    /// Pin the generation time.
    pub fn at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Download name: `report_<session>_<unix millis>.<ext>`.
    pub fn file_name(&self, ext: &str) -> String {
        format!(
            "report_{}_{}.{}",
            self.session_id,
            self.generated_at.timestamp_millis(),
            ext
        )
    }
}

/// Everything needed to render one session.
#[derive(Debug, Clone)]
pub struct PreparedReport<'a> {
    pub meta: ReportMeta,
    pub record: &'a Record,
    pub schema: &'a ReportSchema,
    pub report: AssembledReport,
}

/// Raw record plus its schema, as handed to a client-side renderer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionPayload<'a> {
    #[serde(rename = "sessionData")]
    pub session_data: &'a Record,
    pub config: &'a ReportSchema,
}

/// Report preparation over a record store and a schema table.
pub struct ReportService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    schemas: &'a SchemaRegistry,
}

impl<'a, S: RecordStore + ?Sized> ReportService<'a, S> {
    pub fn new(store: &'a S, schemas: &'a SchemaRegistry) -> Self {
        Self { store, schemas }
    }

    /// Look up record and schema for a session.
    pub fn lookup(&self, session_id: &str) -> Result<(&'a Record, &'a str, &'a ReportSchema)> {
        let store: &'a S = self.store;
        let schemas: &'a SchemaRegistry = self.schemas;

        let record = store
            .lookup(session_id)
            .ok_or_else(|| ReportError::RecordNotFound {
                session_id: session_id.to_string(),
            })?;

        let assessment_type = record
            .get(ASSESSMENT_TYPE_KEY)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ReportError::MissingAssessmentType {
                session_id: session_id.to_string(),
            })?;

        let schema = schemas
            .get(assessment_type)
            .ok_or_else(|| ReportError::SchemaNotFound {
                assessment_type: assessment_type.to_string(),
            })?;

        debug!(session_id, assessment_type, "Resolved session schema");
        Ok((record, assessment_type, schema))
    }

    /// Record and schema for a session, unassembled.
    pub fn session_payload(&self, session_id: &str) -> Result<SessionPayload<'a>> {
        let (record, _, schema) = self.lookup(session_id)?;
        Ok(SessionPayload {
            session_data: record,
            config: schema,
        })
    }

    /// Assemble the report for a session.
    pub fn prepare(&self, session_id: &str) -> Result<PreparedReport<'a>> {
        let (record, assessment_type, schema) = self.lookup(session_id)?;
        Ok(PreparedReport {
            meta: ReportMeta::new(session_id, assessment_type),
            record,
            schema,
            report: assemble(record, schema),
        })
    }

    /// Assemble and render a session with `renderer`.
    pub fn render(
        &self,
        session_id: &str,
        renderer: &dyn DocumentRenderer,
    ) -> Result<(ReportMeta, String)> {
        let prepared = self.prepare(session_id)?;
        let document = renderer.render(&prepared.meta, &prepared.report)?;
        Ok((prepared.meta, document))
    }
}
