//! Schema validation errors and semantic validation.

use crate::path::PathExpr;
use crate::schema::{ClassificationRule, FieldPath, FieldSpec, ReportSchema};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Schema validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate one assessment schema semantically.
pub fn validate_schema(assessment_type: &str, schema: &ReportSchema) -> ValidationResult<()> {
    if schema.sections.is_empty() {
        return Err(ValidationError::SemanticError(format!(
            "{} has no sections",
            assessment_type
        )));
    }

    for (idx, section) in schema.sections.iter().enumerate() {
        if section.name.trim().is_empty() {
            return Err(ValidationError::MissingField(format!(
                "{}.sections[{}].name",
                assessment_type, idx
            )));
        }

        for (field_idx, field) in section.fields.iter().enumerate() {
            let location = format!(
                "{}.sections[{}].fields[{}]",
                assessment_type, idx, field_idx
            );
            validate_field(&location, field)?;
        }
    }

    Ok(())
}

/// Validate a single field.
fn validate_field(location: &str, field: &FieldSpec) -> ValidationResult<()> {
    if field.label.trim().is_empty() {
        return Err(ValidationError::MissingField(format!("{}.label", location)));
    }

    let expressions = field.path.expressions();
    if expressions.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("{}.path", location),
            message: "path list must not be empty".to_string(),
        });
    }

    for expr in &expressions {
        PathExpr::parse(expr).map_err(|e| ValidationError::InvalidValue {
            field: format!("{}.path", location),
            message: format!("'{}': {}", expr, e),
        })?;
    }

    match (&field.path, field.format) {
        (FieldPath::Single(_), Some(format)) => {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.format", location),
                message: format!("formatter '{}' requires a list of paths", format),
            });
        }
        (FieldPath::Multi(paths), Some(format)) => {
            if let Some(arity) = format.arity() {
                if paths.len() != arity {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{}.format", location),
                        message: format!(
                            "formatter '{}' takes {} values, path lists {}",
                            format,
                            arity,
                            paths.len()
                        ),
                    });
                }
            }
        }
        _ => {}
    }

    if field.path.is_multi() && field.unit.is_some() {
        return Err(ValidationError::InvalidValue {
            field: format!("{}.unit", location),
            message: "unit applies only to single-path fields".to_string(),
        });
    }

    if let Some(rules) = &field.classification {
        validate_classification(&format!("{}.classification", location), rules)?;
    }

    Ok(())
}

/// Validate classification rules under the half-open `[min, max)` convention.
fn validate_classification(field: &str, rules: &[ClassificationRule]) -> ValidationResult<()> {
    if rules.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "classification must list at least one range".to_string(),
        });
    }

    for (idx, rule) in rules.iter().enumerate() {
        if !rule.min().is_finite() || !rule.max().is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("{}[{}].range", field, idx),
                message: "bounds must be finite".to_string(),
            });
        }
        if rule.min() >= rule.max() {
            return Err(ValidationError::InvalidValue {
                field: format!("{}[{}].range", field, idx),
                message: format!("min must be below max, got [{}, {}]", rule.min(), rule.max()),
            });
        }
        if rule.status.trim().is_empty() {
            return Err(ValidationError::MissingField(format!(
                "{}[{}].status",
                field, idx
            )));
        }
    }

    let mut sorted: Vec<&ClassificationRule> = rules.iter().collect();
    sorted.sort_by(|a, b| a.min().total_cmp(&b.min()));
    for pair in sorted.windows(2) {
        if pair[0].max() > pair[1].min() {
            return Err(ValidationError::SemanticError(format!(
                "{}: ranges '{}' and '{}' overlap",
                field, pair[0].status, pair[1].status
            )));
        }
    }

    Ok(())
}
