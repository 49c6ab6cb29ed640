//! Interactive model editor
//!
//! The prompts live in [`ModelWizard`]; every edit they make goes through the
//! plain functions in this module so the editing rules can be tested without
//! a terminal.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indexmap::IndexMap;
use miette::{Diagnostic, IntoDiagnostic, Result};
use thiserror::Error;

use crate::core::{capitalize, is_valid_varname, Element, Model, ModelError};

/// Errors from a single edit
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EditError {
    #[error("{0:?} is not a supported element type")]
    UnsupportedType(String),

    #[error("{0:?} is not a valid attribute name")]
    InvalidAttribute(String),

    #[error("an option value is required")]
    EmptyOption,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type EditResult<T> = std::result::Result<T, EditError>;

/// Append a new element of a registered type
///
/// The element starts from the type's generated element; the id, the
/// `name` attribute and a default label are filled in.
pub fn add_element(model: &mut Model, type_name: &str, element_id: &str) -> EditResult<()> {
    let type_name = type_name.trim().to_lowercase();
    if !is_valid_varname(element_id) {
        return Err(ModelError::InvalidElementId(element_id.to_string()).into());
    }
    let mut element = model
        .gen_element_type(&type_name)
        .ok_or_else(|| EditError::UnsupportedType(type_name.clone()))?;
    element.id = element_id.to_string();
    element
        .attributes
        .insert("name".to_string(), element_id.to_string());
    if element.label.is_empty() {
        element.label = capitalize(element_id);
    }
    element.changed(true);
    model.insert_element(isize::MAX, element)?;
    Ok(())
}

/// Change an element's type, keeping its id, label and attributes
///
/// Type-specific settings from the new type's generated element (pattern,
/// generator, extra attributes) are merged in where the element has none.
pub fn change_type(model: &mut Model, element_id: &str, type_name: &str) -> EditResult<()> {
    let type_name = type_name.trim().to_lowercase();
    let template = model
        .gen_element_type(&type_name)
        .ok_or_else(|| EditError::UnsupportedType(type_name.clone()))?;
    let element = element_mut(model, element_id)?;
    element.element_type = template.element_type;
    if element.pattern.is_empty() {
        element.pattern = template.pattern;
    }
    if element.generator.is_empty() {
        element.generator = template.generator;
    }
    for (k, v) in template.attributes {
        element.attributes.entry(k).or_insert(v);
    }
    model.changed(true);
    Ok(())
}

/// Make `element_id` the only object identifier
pub fn set_object_id(model: &mut Model, element_id: &str) -> EditResult<()> {
    if !model.has_element(element_id) {
        return Err(ModelError::ElementNotFound(element_id.to_string()).into());
    }
    let ids = model.element_ids();
    for id in ids {
        if let Some(element) = model.element_by_id_mut(&id) {
            element.is_object_id = id == element_id;
        }
    }
    model.changed(true);
    Ok(())
}

/// Set an attribute; an empty value removes it
///
/// Returns true when the map changed.
pub fn set_attribute(attributes: &mut IndexMap<String, String>, key: &str, value: &str) -> EditResult<bool> {
    if !is_valid_varname(key) {
        return Err(EditError::InvalidAttribute(key.to_string()));
    }
    if value.is_empty() {
        return Ok(attributes.shift_remove(key).is_some());
    }
    let previous = attributes.insert(key.to_string(), value.to_string());
    Ok(previous.as_deref() != Some(value))
}

/// Parse `value` or `value=label` into an option pair
///
/// The label defaults to the value.
pub fn parse_option(input: &str) -> EditResult<(String, String)> {
    let (value, label) = match input.split_once('=') {
        Some((v, l)) => (v.trim(), l.trim()),
        None => (input.trim(), ""),
    };
    if value.is_empty() {
        return Err(EditError::EmptyOption);
    }
    let label = if label.is_empty() { value } else { label };
    Ok((value.to_string(), label.to_string()))
}

/// One line per element for menus and listings
pub fn element_summary(element: &Element) -> String {
    let mut line = format!("{} ({})", element.id, element.element_type);
    if element.is_object_id {
        line.push_str(" [identifier]");
    }
    if !element.generator.is_empty() {
        line.push_str(&format!(" <{}>", element.generator));
    }
    if element.attributes.get("required").map(String::as_str) == Some("true") {
        line.push_str(" *");
    }
    line
}

fn element_mut<'a>(model: &'a mut Model, element_id: &str) -> EditResult<&'a mut Element> {
    model
        .element_by_id_mut(element_id)
        .ok_or_else(|| ModelError::ElementNotFound(element_id.to_string()).into())
}

const MODEL_ACTIONS: &[&str] = &[
    "Add element",
    "Modify element",
    "Remove element",
    "Move element",
    "Set object identifier",
    "Edit description",
    "Edit title",
    "Edit form attributes",
    "Done",
];

const ELEMENT_ACTIONS: &[&str] = &[
    "Type",
    "Label",
    "Pattern",
    "Generator",
    "Attributes",
    "Options",
    "Done",
];

/// Interactive editor for a model
pub struct ModelWizard {
    theme: ColorfulTheme,
}

impl Default for ModelWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Edit the model until the user picks "Done"
    ///
    /// Returns true when anything was changed.
    pub fn run(&self, model: &mut Model) -> Result<bool> {
        println!();
        println!(
            "{} Editing model {}",
            style("◆").cyan(),
            style(&model.id).cyan().bold()
        );
        println!("{}", style("─".repeat(50)).dim());

        loop {
            self.print_elements(model);
            let choice = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(MODEL_ACTIONS)
                .default(0)
                .interact()
                .into_diagnostic()?;

            match MODEL_ACTIONS[choice] {
                "Add element" => self.add_element(model)?,
                "Modify element" => {
                    if let Some(id) = self.pick_element(model, "Modify which element?")? {
                        self.modify_element(model, &id)?;
                    }
                }
                "Remove element" => {
                    if let Some(id) = self.pick_element(model, "Remove which element?")? {
                        if report(model.remove_element(&id).map_err(EditError::from)) {
                            println!("{} Removed {}.{}", style("✓").green(), model.id, id);
                        }
                    }
                }
                "Move element" => self.move_element(model)?,
                "Set object identifier" => {
                    if let Some(id) = self.pick_element(model, "Identifier element")? {
                        report(set_object_id(model, &id));
                    }
                }
                "Edit description" => {
                    model.description = self.text("Description", &model.description)?;
                    model.changed(true);
                }
                "Edit title" => {
                    let title = self.text("Title", model.title.as_deref().unwrap_or(""))?;
                    model.title = (!title.is_empty()).then_some(title);
                    model.changed(true);
                }
                "Edit form attributes" => {
                    if self.edit_attributes(&mut model.attributes, &model.id)? {
                        model.changed(true);
                    }
                }
                _ => break,
            }
        }

        let diagnostics = model.check();
        if !diagnostics.is_ok() {
            println!("{} Model has problems:", style("!").yellow());
            for message in diagnostics.iter() {
                println!("  {}", style(message).yellow());
            }
        }
        Ok(model.has_changes())
    }

    fn print_elements(&self, model: &Model) {
        println!();
        for (i, element) in model.elements().iter().enumerate() {
            println!("  {} {}", style(format!("{:>2}.", i + 1)).dim(), element_summary(element));
        }
        println!();
    }

    fn add_element(&self, model: &mut Model) -> Result<()> {
        let types = model.element_types();
        let type_index = Select::with_theme(&self.theme)
            .with_prompt("Element type")
            .items(&types)
            .default(types.iter().position(|t| t == "text").unwrap_or(0))
            .interact()
            .into_diagnostic()?;
        let element_id: String = Input::with_theme(&self.theme)
            .with_prompt("Element id")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if is_valid_varname(input) {
                    Ok(())
                } else {
                    Err("use letters, digits and '_', starting with a letter".to_string())
                }
            })
            .interact_text()
            .into_diagnostic()?;

        if !report(add_element(model, &types[type_index], &element_id)) {
            return Ok(());
        }

        let required = Confirm::with_theme(&self.theme)
            .with_prompt("Required?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if required {
            if let Some(element) = model.element_by_id_mut(&element_id) {
                element
                    .attributes
                    .insert("required".to_string(), "true".to_string());
            }
        }
        Ok(())
    }

    fn move_element(&self, model: &mut Model) -> Result<()> {
        let Some(id) = self.pick_element(model, "Move which element?")? else {
            return Ok(());
        };
        let positions: Vec<String> = (1..=model.elements().len()).map(|n| n.to_string()).collect();
        let current = model.element_ids().iter().position(|e| *e == id).unwrap_or(0);
        let pos = Select::with_theme(&self.theme)
            .with_prompt("New position")
            .items(&positions)
            .default(current)
            .interact()
            .into_diagnostic()?;
        report(model.move_element(&id, pos as isize).map_err(EditError::from));
        Ok(())
    }

    fn modify_element(&self, model: &mut Model, element_id: &str) -> Result<()> {
        let full_id = format!("{}.{}", model.id, element_id);
        loop {
            let Some(element) = model.element_by_id(element_id) else {
                return Err(EditError::from(ModelError::ElementNotFound(element_id.to_string())).into());
            };
            println!("  {}", style(element_summary(element)).bold());

            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("Modify {}", full_id))
                .items(ELEMENT_ACTIONS)
                .default(ELEMENT_ACTIONS.len() - 1)
                .interact()
                .into_diagnostic()?;

            match ELEMENT_ACTIONS[choice] {
                "Type" => {
                    let types = model.element_types();
                    let i = Select::with_theme(&self.theme)
                        .with_prompt("Element type")
                        .items(&types)
                        .interact()
                        .into_diagnostic()?;
                    report(change_type(model, element_id, &types[i]));
                }
                "Label" => {
                    let label = self.text("Label", &element.label)?;
                    self.update(model, element_id, |e| e.label = label);
                }
                "Pattern" => {
                    let pattern = self.text("Pattern (empty for none)", &element.pattern)?;
                    self.update(model, element_id, |e| e.pattern = pattern);
                }
                "Generator" => {
                    let generator = self.text(
                        "Generator (uuid, timestamp, created_date, ...)",
                        &element.generator,
                    )?;
                    self.update(model, element_id, |e| e.generator = generator);
                }
                "Attributes" => {
                    let mut attributes = element.attributes.clone();
                    if self.edit_attributes(&mut attributes, &full_id)? {
                        self.update(model, element_id, |e| e.attributes = attributes);
                    }
                }
                "Options" => {
                    let mut options = element.options.clone();
                    if self.edit_options(&mut options, &full_id)? {
                        self.update(model, element_id, |e| e.options = options);
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn update(&self, model: &mut Model, element_id: &str, edit: impl FnOnce(&mut Element)) {
        if let Some(element) = model.element_by_id_mut(element_id) {
            edit(element);
            model.changed(true);
        }
    }

    /// Add, change or remove attributes; returns true when something changed
    fn edit_attributes(&self, attributes: &mut IndexMap<String, String>, owner: &str) -> Result<bool> {
        let mut changed = false;
        loop {
            let mut items: Vec<String> = attributes
                .iter()
                .map(|(k, v)| format!("{} -> {:?}", k, v))
                .collect();
            items.push("Add attribute".to_string());
            items.push("Done".to_string());

            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("Attributes of {} (pick one to change it)", owner))
                .items(&items)
                .default(items.len() - 1)
                .interact()
                .into_diagnostic()?;

            let key = if choice == items.len() - 1 {
                return Ok(changed);
            } else if choice == items.len() - 2 {
                self.text("Attribute name", "")?
            } else {
                attributes
                    .get_index(choice)
                    .map(|(k, _)| k.clone())
                    .unwrap_or_default()
            };
            let current = attributes.get(&key).cloned().unwrap_or_default();
            let value = self.text(&format!("Value of {} (empty removes it)", key), &current)?;
            match set_attribute(attributes, &key, &value) {
                Ok(c) => changed |= c,
                Err(e) => eprintln!("{} {}", style("✗").red(), e),
            }
        }
    }

    /// Add or remove select options; returns true when something changed
    fn edit_options(&self, options: &mut Vec<IndexMap<String, String>>, owner: &str) -> Result<bool> {
        let mut changed = false;
        loop {
            let mut items: Vec<String> = options
                .iter()
                .map(|o| {
                    format!(
                        "{} = {}",
                        o.get("value").map(String::as_str).unwrap_or(""),
                        o.get("label").map(String::as_str).unwrap_or("")
                    )
                })
                .collect();
            items.push("Add option".to_string());
            items.push("Done".to_string());

            let choice = Select::with_theme(&self.theme)
                .with_prompt(format!("Options of {} (pick one to remove it)", owner))
                .items(&items)
                .default(items.len() - 1)
                .interact()
                .into_diagnostic()?;

            if choice == items.len() - 1 {
                return Ok(changed);
            }
            if choice < options.len() {
                options.remove(choice);
                changed = true;
                continue;
            }
            let input = self.text("Option as value or value=label", "")?;
            match parse_option(&input) {
                Ok((value, label)) => {
                    options.push(IndexMap::from([
                        ("value".to_string(), value),
                        ("label".to_string(), label),
                    ]));
                    changed = true;
                }
                Err(e) => eprintln!("{} {}", style("✗").red(), e),
            }
        }
    }

    fn pick_element(&self, model: &Model, prompt: &str) -> Result<Option<String>> {
        let ids = model.element_ids();
        if ids.is_empty() {
            return Ok(None);
        }
        let items: Vec<String> = model.elements().iter().map(element_summary).collect();
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;
        Ok(choice.map(|i| ids[i].clone()))
    }

    fn text(&self, prompt: &str, current: &str) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !current.is_empty() {
            input = input.with_initial_text(current);
        }
        input.interact_text().into_diagnostic()
    }
}

/// Print a failed edit and carry on; true when the edit succeeded
fn report<T>(result: EditResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            false
        }
    }
}
