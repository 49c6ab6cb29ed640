//! SQLite schema rendering

use std::io::Write;

use crate::core::{is_valid_varname, Element, Model, RenderError};

/// Render a `create table` statement for the model
///
/// The description becomes a leading `--` comment. Columns follow element
/// order; the object identifier is the primary key and timestamp/date
/// generators become column defaults.
pub fn render_sqlite(out: &mut dyn Write, model: &Model) -> Result<(), RenderError> {
    if !is_valid_varname(&model.id) {
        return Err(RenderError::InvalidIdentifier {
            what: "model id",
            id: model.id.clone(),
        });
    }

    if model.elements().is_empty() {
        return Err(RenderError::NoElements {
            id: model.id.clone(),
        });
    }

    let columns = model
        .elements()
        .iter()
        .map(column_definition)
        .collect::<Result<Vec<_>, _>>()?;

    if !model.description.is_empty() {
        writeln!(out, "-- {}", model.description.replace('\n', "\n-- "))?;
    }
    writeln!(out, "create table if not exists {} (", model.id)?;
    writeln!(out, "{}", columns.join(",\n"))?;
    writeln!(out, ");")?;
    out.flush()?;
    Ok(())
}

fn column_definition(element: &Element) -> Result<String, RenderError> {
    if !is_valid_varname(&element.id) {
        return Err(RenderError::InvalidIdentifier {
            what: "element id",
            id: element.id.clone(),
        });
    }

    let generator = element.generator.to_lowercase();
    let autoincrement = generator == "autoincrement";
    let mut column = format!(
        "  {} {}",
        element.id,
        if autoincrement {
            "integer"
        } else {
            column_type(&element.element_type)
        }
    );

    if element.is_object_id {
        column.push_str(" primary key");
        if autoincrement {
            column.push_str(" autoincrement");
        }
    } else if autoincrement {
        tracing::warn!(
            id = %element.id,
            "autoincrement only applies to the primary key column, ignoring"
        );
    }

    match generator.as_str() {
        "date" | "created_date" | "current_date" => {
            column.push_str(" default current_date not null")
        }
        "timestamp" | "created_timestamp" | "current_timestamp" => {
            column.push_str(" default current_timestamp not null")
        }
        _ => {}
    }
    Ok(column)
}

/// SQLite column type for an element type
fn column_type(element_type: &str) -> &'static str {
    match element_type.to_lowercase().as_str() {
        "int" | "integer" => "integer",
        "float" | "real" => "real",
        "numeric" | "number" | "range" => "numeric",
        "checkbox" => "boolean",
        _ => "text",
    }
}
