//! TypeScript interface and class rendering

use std::io::Write;

use crate::core::{Model, RenderError};
use crate::render::templates::{CodeTemplates, TYPESCRIPT_TEMPLATE};

/// Render the model as a TypeScript interface plus a class with defaulted fields
pub fn render_typescript(out: &mut dyn Write, model: &Model) -> Result<(), RenderError> {
    let code = CodeTemplates::new()?.render(TYPESCRIPT_TEMPLATE, model)?;
    out.write_all(code.as_bytes())?;
    out.flush()?;
    Ok(())
}
