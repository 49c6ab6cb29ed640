//! Python class rendering

use std::io::Write;

use crate::core::{Model, RenderError};
use crate::render::templates::{CodeTemplates, PYTHON_TEMPLATE};

/// Render the model as a Python class with annotated, defaulted attributes
pub fn render_python(out: &mut dyn Write, model: &Model) -> Result<(), RenderError> {
    let code = CodeTemplates::new()?.render(PYTHON_TEMPLATE, model)?;
    out.write_all(code.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Element;

    #[test]
    fn test_render_python() {
        let mut model = Model::new("person");
        model.description = "People we know\nand love".to_string();
        model.insert_element(1, Element::of_type("number").with_id("age")).unwrap();

        let mut out = Vec::new();
        render_python(&mut out, &model).unwrap();
        let code = String::from_utf8(out).unwrap();

        assert!(code.contains("# Model: person\n#\n# People we know\n# and love\n#\n"));
        assert!(code.contains("class Person:\n    id: str\n    age: float\n"));
        assert!(code.contains("    def __init__(self):\n        self.id = \"\"\n        self.age = 0.0"));
    }
}
