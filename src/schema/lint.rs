//! Model file linting: JSON Schema structure checks plus model checks

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use rust_embed::Embed;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::core::Model;
use crate::yaml::diagnostics::offset_of;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

pub const MODEL_SCHEMA: &str = "model.schema.json";

/// Failure to load the embedded schema
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("Embedded schema not found: {0}")]
    #[diagnostic(code(modelgen::schema::missing))]
    Missing(String),

    #[error("Embedded schema is invalid: {0}")]
    #[diagnostic(code(modelgen::schema::invalid))]
    Invalid(String),
}

/// Lint failure for one file, with every violation found
#[derive(Debug, Error, Diagnostic)]
#[error("{filename}: {summary}")]
#[diagnostic(code(modelgen::lint))]
pub struct LintError {
    filename: String,
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<LintViolation>,
}

impl LintError {
    pub fn new(filename: &str, source: &str, violations: Vec<LintViolation>) -> Self {
        let summary = match violations.len() {
            1 => "1 problem".to_string(),
            n => format!("{} problems", n),
        };
        Self {
            filename: filename.to_string(),
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[LintViolation] {
        &self.violations
    }
}

/// A single problem in a model file
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct LintViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl LintViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks model documents against the embedded model schema
pub struct Linter {
    schema: JsonValidator,
}

impl Linter {
    /// Compile the embedded model schema
    pub fn new() -> Result<Self, SchemaError> {
        let file = EmbeddedSchemas::get(MODEL_SCHEMA)
            .ok_or_else(|| SchemaError::Missing(MODEL_SCHEMA.to_string()))?;
        let schema_json: JsonValue = serde_json::from_slice(&file.data)
            .map_err(|e| SchemaError::Invalid(e.to_string()))?;
        let schema = validator_for(&schema_json).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        Ok(Self { schema })
    }

    /// Lint a model document
    ///
    /// Structural schema violations are reported first; only a document that
    /// satisfies the schema is loaded and run through [`Model::check`].
    pub fn lint(&self, content: &str, filename: &str) -> Result<(), LintError> {
        let document: JsonValue = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let offset = e
                    .location()
                    .map(|loc| offset_of(content, loc.line(), loc.column()))
                    .unwrap_or(0);
                let violation = LintViolation::new(
                    format!("YAML parse error: {}", e),
                    "invalid YAML".to_string(),
                    line_span(content, offset),
                    Some("Check indentation, colons and quoting".to_string()),
                );
                return Err(LintError::new(filename, content, vec![violation]));
            }
        };

        let violations: Vec<LintViolation> = self
            .schema
            .iter_errors(&document)
            .map(|e| error_to_violation(content, &e))
            .collect();
        if !violations.is_empty() {
            return Err(LintError::new(filename, content, violations));
        }

        let mut model = Model::default();
        let diagnostics = model.from_object(&document);
        if diagnostics.is_ok() {
            return Ok(());
        }
        let violations = diagnostics
            .iter()
            .map(|message| {
                LintViolation::new(
                    message.clone(),
                    "model check".to_string(),
                    locate(content, "/elements"),
                    None,
                )
            })
            .collect();
        Err(LintError::new(filename, content, violations))
    }
}

fn error_to_violation(content: &str, error: &JsonSchemaError) -> LintViolation {
    let pointer = error.instance_path.to_string();
    let at = if pointer.is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", pointer)
    };

    let (message, hint, help) = match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            (
                format!("Missing required field: {} at {}", name, at),
                "required field missing",
                Some(format!("Add `{}:` here", name)),
            )
        }
        ValidationErrorKind::Type { kind } => (
            format!("Wrong type at {}: expected {:?}", at, kind),
            "wrong type",
            None,
        ),
        ValidationErrorKind::Pattern { .. } => (
            format!("Invalid identifier at {}", at),
            "not an identifier",
            Some("Identifiers start with a letter or '_' and contain only letters, digits and '_'".to_string()),
        ),
        ValidationErrorKind::MinItems { .. } => (
            format!("Empty list at {}", at),
            "needs at least one entry",
            Some("A model needs at least one element".to_string()),
        ),
        ValidationErrorKind::MinLength { .. } => {
            (format!("Empty value at {}", at), "empty", None)
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            format!("Unknown field(s) at {}: {}", at, unexpected.join(", ")),
            "unknown field",
            Some(match unexpected.as_slice() {
                [one] => format!("Remove `{}` or check its spelling", one),
                _ => "Remove unknown fields or check their spelling".to_string(),
            }),
        ),
        _ => (
            format!("Validation error at {}: {}", at, error),
            "validation error",
            None,
        ),
    };

    LintViolation::new(message, hint.to_string(), locate(content, &pointer), help)
}

/// Find the source line a JSON pointer refers to in a block-style YAML document
///
/// Keys are matched in order and list indices select the n-th `- ` entry,
/// so `/elements/2/type` lands on the `type:` line of the third element.
/// Anything that cannot be followed stops at the last position found.
fn locate(content: &str, pointer: &str) -> SourceSpan {
    let mut from = 0;
    for part in pointer.split('/').filter(|s| !s.is_empty()) {
        let next = match part.parse::<usize>() {
            Ok(index) => nth_item(content, from, index),
            Err(_) => find_key(content, from, part),
        };
        match next {
            Some(pos) => from = pos,
            None => break,
        }
    }
    line_span(content, from)
}

/// Lines from the one containing `from` onwards, with their byte offsets
fn lines_from(content: &str, from: usize) -> impl Iterator<Item = (usize, &str)> {
    let start = content[..from.min(content.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    content[start..]
        .split_inclusive('\n')
        .scan(start, |offset, line| {
            let at = *offset;
            *offset += line.len();
            Some((at, line.trim_end_matches(['\r', '\n'])))
        })
}

fn find_key(content: &str, from: usize, key: &str) -> Option<usize> {
    let needle = format!("{}:", key);
    lines_from(content, from).find_map(|(offset, line)| {
        let trimmed = line.trim_start();
        let body = trimmed.strip_prefix("- ").unwrap_or(trimmed);
        body.starts_with(&needle)
            .then(|| offset + (line.len() - body.len()))
    })
}

fn nth_item(content: &str, from: usize, index: usize) -> Option<usize> {
    let mut indent = None;
    let mut seen = 0;
    for (offset, line) in lines_from(content, from).skip(1) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let depth = line.len() - trimmed.len();
        match indent {
            None if trimmed.starts_with('-') => indent = Some(depth),
            None => return None,
            Some(d) if depth < d => return None,
            _ => {}
        }
        if Some(depth) == indent && trimmed.starts_with('-') {
            if seen == index {
                return Some(offset + depth);
            }
            seen += 1;
        }
    }
    None
}

fn line_span(content: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(content.len());
    let len = content[offset..]
        .find('\n')
        .unwrap_or(content.len() - offset)
        .max(1);
    (offset, len).into()
}
