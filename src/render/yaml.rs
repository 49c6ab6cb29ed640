//! YAML rendering

use std::io::Write;

use crate::core::{Model, RenderError};

/// Write the model definition back out as YAML
pub fn render_yaml(out: &mut dyn Write, model: &Model) -> Result<(), RenderError> {
    let yaml = serde_yml::to_string(model).map_err(|e| RenderError::Serialize(e.to_string()))?;
    out.write_all(yaml.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Element;

    #[test]
    fn test_render_yaml_round_trips() {
        let mut model = Model::new("guestbook");
        model
            .insert_element(1, Element::of_type("textarea").with_id("msg").with_label("Message"))
            .unwrap();

        let mut out = Vec::new();
        render_yaml(&mut out, &model).unwrap();
        let yaml = String::from_utf8(out).unwrap();
        assert!(yaml.contains("type: textarea"));

        let parsed: Model = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.element_ids(), model.element_ids());
        assert_eq!(parsed.element_by_id("msg").unwrap().label, "Message");
        assert_eq!(parsed.primary_id(), "id");
    }
}
