//! Reading model and form-data documents
//!
//! YAML and JSON share one path: text is parsed with serde_yml (JSON is a
//! subset of YAML) into a `serde_json::Value`, which is what the model's
//! ingestion code consumes.

pub mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::core::{Diagnostics, Model};

/// Display name used for documents read from standard input
pub const STDIN_NAME: &str = "<stdin>";

/// A document's text together with the name used in diagnostics
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    /// Read a file, or standard input when no path (or `-`) is given
    pub fn read(path: Option<&Path>) -> Result<Self, YamlError> {
        match path {
            Some(p) if p != Path::new("-") => {
                let name = p.display().to_string();
                let text = std::fs::read_to_string(p).map_err(|source| YamlError::Read {
                    name: name.clone(),
                    source,
                })?;
                Ok(Self { name, text })
            }
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| YamlError::Read {
                        name: STDIN_NAME.to_string(),
                        source,
                    })?;
                Ok(Self {
                    name: STDIN_NAME.to_string(),
                    text,
                })
            }
        }
    }

    /// Parse the text into an untyped document
    pub fn parse(&self) -> Result<Value, YamlError> {
        parse_document(&self.text, &self.name)
    }
}

/// Parse YAML or JSON text into an untyped document
///
/// An empty document parses as `null`.
pub fn parse_document(text: &str, name: &str) -> Result<Value, YamlError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yml::from_str::<Value>(text)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, text, name).into())
}

/// Parse a document that must be a mapping
pub fn parse_mapping(text: &str, name: &str) -> Result<serde_json::Map<String, Value>, YamlError> {
    match parse_document(text, name)? {
        Value::Object(map) => Ok(map),
        _ => Err(YamlError::NotAMapping {
            name: name.to_string(),
        }),
    }
}

/// Build a model from a source, returning it along with its structural diagnostics
pub fn load_model(source: &Source) -> Result<(Model, Diagnostics), YamlError> {
    let document = Value::Object(parse_mapping(&source.text, &source.name)?);
    let mut model = Model::default();
    let diagnostics = model.from_object(&document);
    tracing::info!(
        source = %source.name,
        model = %model.id,
        problems = diagnostics.len(),
        "loaded model"
    );
    Ok((model, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GUESTBOOK: &str = r#"id: guestbook
description: Sign our guest book
attributes:
  method: POST
elements:
  - id: id
    type: text
    is_primary_id: true
    generator: uuid
  - id: name
    type: text
    attributes:
      required: true
  - id: message
    type: textarea
"#;

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = parse_document("id: m\ncount: 3\n", "m.yaml").unwrap();
        let json = parse_document(r#"{"id": "m", "count": 3}"#, "m.json").unwrap();
        assert_eq!(yaml, json);
        assert_eq!(parse_document("  \n", "empty").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_syntax_error() {
        let err = parse_document("id: [unclosed\n", "bad.yaml").unwrap_err();
        assert!(matches!(err, YamlError::Syntax(_)));
    }

    #[test]
    fn test_parse_mapping_rejects_lists() {
        let err = parse_mapping("- a\n- b\n", "list.yaml").unwrap_err();
        assert_eq!(err.to_string(), "list.yaml: expected a mapping at the top level");
    }

    #[test]
    fn test_load_model_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(GUESTBOOK.as_bytes()).unwrap();

        let source = Source::read(Some(file.path())).unwrap();
        let (model, diagnostics) = load_model(&source).unwrap();
        assert!(diagnostics.is_ok(), "{}", diagnostics);
        assert_eq!(model.id, "guestbook");
        assert_eq!(model.attributes["method"], "POST");
        assert_eq!(model.element_ids(), vec!["id", "name", "message"]);
        assert_eq!(model.primary_id(), "id");
        assert_eq!(model.element_by_id("name").unwrap().attributes["required"], "true");
    }

    #[test]
    fn test_load_model_reports_structure() {
        let source = Source {
            name: "m.yaml".to_string(),
            text: "id: m\nelements: none\n".to_string(),
        };
        let (_, diagnostics) = load_model(&source).unwrap();
        assert!(diagnostics.contains("data elements are not an array"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = Source::read(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, YamlError::Read { .. }));
    }
}
