//! Path-expression grammar for field paths.
//!
//! A path is a dot-separated list of segments. Each segment is a mapping key
//! optionally followed by one or more bracket selectors:
//!
//! ```text
//! vitalsMap.vitals.heart_rate
//! exercises[?id==235].setList[0].time
//! ```
//!
//! `[N]` selects the element at position `N` of a sequence and `[?field==K]`
//! selects the first element whose `field` equals the integer `K`. Dots inside
//! brackets never split a segment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a path expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path expression is empty")]
    Empty,

    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },

    #[error("unclosed '[' in segment '{segment}'")]
    UnclosedBracket { segment: String },

    #[error("invalid selector '[{selector}]'")]
    InvalidSelector { selector: String },

    #[error("unsupported operator in predicate '{predicate}' (only '==' is supported)")]
    UnsupportedOperator { predicate: String },

    #[error("predicate literal '{literal}' is not an integer")]
    InvalidLiteral { literal: String },
}

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// Numeric equality.
    Eq,
}

impl CompareOp {
    /// Source token for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
        }
    }
}

/// Typed filter predicate: `field <op> literal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub op: CompareOp,
    pub literal: i64,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}{}{}", self.field, self.op.token(), self.literal)
    }
}

/// A single resolution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Mapping-key lookup.
    Key(String),
    /// Positional sequence lookup.
    Index(usize),
    /// First sequence element matching the predicate.
    Filter(Predicate),
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    source: String,
    steps: Vec<Step>,
}

impl PathExpr {
    /// Parse a path expression.
    pub fn parse(source: &str) -> Result<Self, PathError> {
        if source.is_empty() {
            return Err(PathError::Empty);
        }

        let mut steps = Vec::new();
        for (position, segment) in split_segments(source).into_iter().enumerate() {
            parse_segment(segment, position, &mut steps)?;
        }

        Ok(Self {
            source: source.to_string(),
            steps,
        })
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Resolution steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether the expression contains any filter predicate.
    pub fn has_filter(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::Filter(_)))
    }
}

impl FromStr for PathExpr {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathExpr::parse(s)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split on '.' outside brackets.
fn split_segments(source: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, ch) in source.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(&source[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&source[start..]);
    segments
}

fn parse_segment(segment: &str, position: usize, steps: &mut Vec<Step>) -> Result<(), PathError> {
    let (name, mut rest) = match segment.find('[') {
        Some(idx) => (&segment[..idx], &segment[idx..]),
        None => (segment, ""),
    };

    // Keys are looked up exactly as written, whitespace included.
    if name.is_empty() {
        return Err(PathError::EmptySegment { position });
    }
    steps.push(Step::Key(name.to_string()));

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(PathError::InvalidSelector {
                selector: rest.to_string(),
            });
        }
        let close = rest.find(']').ok_or_else(|| PathError::UnclosedBracket {
            segment: segment.to_string(),
        })?;
        steps.push(parse_selector(&rest[1..close])?);
        rest = &rest[close + 1..];
    }

    Ok(())
}

fn parse_selector(selector: &str) -> Result<Step, PathError> {
    let selector = selector.trim();
    if let Some(predicate) = selector.strip_prefix('?') {
        return parse_predicate(predicate).map(Step::Filter);
    }

    selector
        .parse::<usize>()
        .map(Step::Index)
        .map_err(|_| PathError::InvalidSelector {
            selector: selector.to_string(),
        })
}

fn parse_predicate(predicate: &str) -> Result<Predicate, PathError> {
    let Some((field, literal)) = predicate.split_once("==") else {
        return Err(PathError::UnsupportedOperator {
            predicate: predicate.to_string(),
        });
    };

    let field = field.trim();
    if field.is_empty() || field.contains(['!', '<', '>', '=']) {
        return Err(PathError::UnsupportedOperator {
            predicate: predicate.to_string(),
        });
    }

    let literal = literal.trim();
    let value = literal
        .parse::<i64>()
        .map_err(|_| PathError::InvalidLiteral {
            literal: literal.to_string(),
        })?;

    Ok(Predicate {
        field: field.to_string(),
        op: CompareOp::Eq,
        literal: value,
    })
}
