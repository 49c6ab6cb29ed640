//! Template-driven code generation for models

use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::{capitalize, Element, Model, RenderError};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

pub const TYPESCRIPT_TEMPLATE: &str = "typescript.ts.tera";
pub const PYTHON_TEMPLATE: &str = "python.py.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl From<TemplateError> for RenderError {
    fn from(e: TemplateError) -> Self {
        RenderError::Template(e.to_string())
    }
}

/// One model element as seen by the code templates
#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    pub name: String,
    pub ts_type: &'static str,
    pub ts_default: &'static str,
    pub py_type: &'static str,
    pub py_default: &'static str,
}

impl FieldContext {
    pub fn from_element(element: &Element) -> Self {
        let (ts_type, ts_default, py_type, py_default) =
            match element.element_type.to_lowercase().as_str() {
                "number" => ("number", "0.0", "float", "0.0"),
                "range" => ("number[]", "[]", "list", "[]"),
                "checkbox" => ("boolean", "false", "bool", "False"),
                _ => ("string", "\"\"", "str", "\"\""),
            };
        Self {
            name: element.id.clone(),
            ts_type,
            ts_default,
            py_type,
            py_default,
        }
    }
}

/// Code generator using Tera
pub struct CodeTemplates {
    tera: Tera,
}

impl CodeTemplates {
    /// Create a code generator with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a named template against a model
    pub fn render(&self, template: &str, model: &Model) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == template) {
            return Err(TemplateError::NotFound(template.to_string()));
        }
        self.tera
            .render(template, &Self::context(model))
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    fn context(model: &Model) -> tera::Context {
        let class_name = capitalize(&model.id);
        let fields: Vec<FieldContext> = model
            .elements()
            .iter()
            .map(FieldContext::from_element)
            .collect();
        let description_lines: Vec<&str> = model.description.lines().collect();

        let mut context = tera::Context::new();
        context.insert("id", &model.id);
        context.insert("description", &model.description.replace("*/", "* /"));
        context.insert("description_lines", &description_lines);
        context.insert("interface_name", &format!("{}Interface", class_name));
        context.insert("class_name", &class_name);
        context.insert("fields", &fields);
        context
    }
}
