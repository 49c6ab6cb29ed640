//! Built-in renderers
//!
//! Renderers are plain functions of a sink and a model. They are registered
//! on a model by name; [`register_defaults`] installs all of them.

pub mod html;
pub mod python;
pub mod sqlite;
pub mod templates;
pub mod typescript;
pub mod yaml;

pub use html::render_html;
pub use python::render_python;
pub use sqlite::render_sqlite;
pub use templates::{CodeTemplates, TemplateError};
pub use typescript::render_typescript;
pub use yaml::render_yaml;

use crate::core::Model;

/// Options applied to the built-in renderers when they are registered
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// CSS class base for HTML output; the model id when unset
    pub css_prefix: Option<String>,
}

/// Register every built-in renderer with default options
pub fn register_defaults(model: &mut Model) {
    register_with(model, &RenderOptions::default());
}

/// Register every built-in renderer
pub fn register_with(model: &mut Model, options: &RenderOptions) {
    let css_prefix = options.css_prefix.clone();
    model.register("html", move |out, m| render_html(out, m, css_prefix.as_deref()));
    model.register("sqlite", render_sqlite);
    model.register("typescript", render_typescript);
    model.register("python", render_python);
    model.register("yaml", render_yaml);
}
