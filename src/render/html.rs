//! HTML form rendering

use std::io::Write;

use crate::core::{css_name, Element, Model, RenderError};

/// Render the model as an unpopulated HTML form
///
/// CSS classes are derived from the model id unless `css_prefix` is given.
/// A submit/cancel pair is appended when the model has no submit element.
pub fn render_html(
    out: &mut dyn Write,
    model: &Model,
    css_prefix: Option<&str>,
) -> Result<(), RenderError> {
    if model.id.is_empty() {
        writeln!(out, "<!-- {} -->", escape(&model.description))?;
        write!(out, "<form")?;
    } else {
        writeln!(out, "<!-- {}: {} -->", escape(&model.id), escape(&model.description))?;
        write!(out, "<form id=\"{}\"", escape(&model.id))?;
    }
    write_attributes(out, model.attributes.iter())?;
    writeln!(out, ">")?;

    let base = css_name(css_prefix.unwrap_or(&model.id));
    for element in model.elements() {
        write_element(out, &base, element)?;
    }

    if !model.has_element_type("submit") {
        let class = format!("{}-submit", base);
        writeln!(
            out,
            "  <div class=\"{c}\"><input class=\"{c}\" type=\"submit\" value=\"submit\"> <input class=\"{c}\" type=\"reset\" value=\"cancel\"></div>",
            c = class
        )?;
    }

    writeln!(out, "</form>")?;
    out.flush()?;
    Ok(())
}

fn write_element(out: &mut dyn Write, base: &str, element: &Element) -> Result<(), RenderError> {
    let class = format!("{}-{}", base, css_name(&element.id));
    let kind = element.element_type.to_lowercase();

    write!(out, "  <div class=\"{}\">", class)?;
    write!(
        out,
        "<label class=\"{}\" for=\"{}\">{}</label> ",
        class,
        escape(element.name()),
        escape(&element.label_or_default())
    )?;

    match kind.as_str() {
        "textarea" => write!(out, "<textarea class=\"{}\"", class)?,
        "button" => write!(out, "<button class=\"{}\"", class)?,
        "select" => write!(out, "<select class=\"{}\"", class)?,
        _ => write!(
            out,
            "<input class=\"{}\" type=\"{}\"",
            class,
            escape(input_type(&element.element_type))
        )?,
    }

    if !element.id.is_empty() {
        write!(out, " id=\"{}\"", escape(&element.id))?;
    }
    write_attributes(out, element.attributes.iter())?;
    if !element.pattern.is_empty() && !element.attributes.contains_key("pattern") {
        write!(out, " pattern=\"{}\"", escape(&element.pattern))?;
    }

    match kind.as_str() {
        "textarea" => write!(out, "></textarea>")?,
        "button" => write!(out, ">{}</button>", escape(&element.label))?,
        "select" => {
            write!(out, ">")?;
            for option in &element.options {
                let value = option.get("value").map(String::as_str).unwrap_or_default();
                let label = option.get("label").map(String::as_str).unwrap_or(value);
                write!(
                    out,
                    "<option value=\"{}\">{}</option>",
                    escape(value),
                    escape(label)
                )?;
            }
            write!(out, "</select>")?;
        }
        _ => write!(out, ">")?,
    }

    writeln!(out, "</div>")?;
    Ok(())
}

fn write_attributes<'a>(
    out: &mut dyn Write,
    attributes: impl Iterator<Item = (&'a String, &'a String)>,
) -> Result<(), RenderError> {
    for (key, value) in attributes {
        match key.as_str() {
            "checked" | "required" => write!(out, " {}", key)?,
            _ => write!(out, " {}=\"{}\"", escape(key), escape(value))?,
        }
    }
    Ok(())
}

// Identifier types are plain text inputs in the browser.
fn input_type(element_type: &str) -> &str {
    match element_type {
        "orcid" | "isni" | "ror" | "uuid" => "text",
        other => other,
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
