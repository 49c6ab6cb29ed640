//! Source-annotated errors for model and data documents

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Syntax error in a YAML or JSON document, pointing at the offending character
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(modelgen::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, locating it in `source`
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let offset = err
            .location()
            .map(|loc| offset_of(source, loc.line(), loc.column()))
            .unwrap_or(0);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help: suggest(&message),
            message,
        }
    }

    /// Build an error at a byte offset with a custom message
    pub fn at_offset(
        message: impl Into<String>,
        source: &str,
        filename: &str,
        offset: usize,
        help: Option<String>,
    ) -> Self {
        let offset = offset.min(source.len());
        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message: message.into(),
        }
    }
}

/// Errors from reading and parsing documents
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("{name}: expected a mapping at the top level")]
    #[diagnostic(
        code(modelgen::yaml::not_a_mapping),
        help("a model document starts with keys such as `id:` and `elements:`")
    )]
    NotAMapping { name: String },

    #[error("Failed to read {name}: {source}")]
    #[diagnostic(code(modelgen::yaml::io))]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Byte offset of a 1-based line and column, clamped to the source
pub(crate) fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let rest = &source[line_start.min(source.len())..];
    let within = rest
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or_else(|| rest.find('\n').unwrap_or(rest.len()));
    (line_start + within).min(source.len())
}

/// Hints for the mistakes people make most often in model files
fn suggest(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("Indent with spaces; YAML does not allow tabs.".to_string());
    }
    if msg.contains("duplicate") {
        return Some("A key may appear only once per mapping.".to_string());
    }
    if msg.contains("mapping values are not allowed") || msg.contains("unexpected ':'") {
        return Some("Quote values containing ':' (e.g. a regex pattern or URL).".to_string());
    }
    if msg.contains("block end") || msg.contains("did not find expected") {
        return Some("Check that every element entry under `elements:` is indented the same.".to_string());
    }
    None
}
