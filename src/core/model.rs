//! Model - an ordered collection of elements plus metadata and extension registries

use indexmap::IndexMap;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

use crate::core::diagnostics::Diagnostics;
use crate::core::element::{string_map, Element};
use crate::core::generator::{generate_value, is_creation_tag};
use crate::core::identity::is_valid_varname;
use crate::core::registry::{GenElementFn, Registry, RenderError, RenderFn, ValidateFn};
use crate::core::value::normalize;

/// Errors from structural mutations of a model's element collection
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ModelError {
    #[error("Element id is not valid: {0}")]
    InvalidElementId(String),

    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),

    #[error("Element id {0} not found")]
    ElementNotFound(String),
}

/// A form/data model: ordered elements, metadata and the registries used to
/// render it and validate submitted data.
///
/// Element order is document order for every renderer. Element ids are
/// unique, and exactly one element should be flagged as the object
/// identifier for [`Model::check`] to pass.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Schema identifier, also used for HTML ids and table names
    pub id: String,

    /// Human readable description
    pub description: String,

    /// Attributes placed on the rendered form (method, action, class, ...)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Optional default title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    elements: Vec<Element>,

    #[serde(skip)]
    is_changed: bool,

    #[serde(skip)]
    renderer: Registry<RenderFn>,

    #[serde(skip)]
    gen_elements: Registry<GenElementFn>,

    #[serde(skip)]
    validators: Registry<ValidateFn>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("attributes", &self.attributes)
            .field("title", &self.title)
            .field("elements", &self.elements)
            .field("is_changed", &self.is_changed)
            .field("renderer", &self.renderer.names())
            .field("gen_elements", &self.gen_elements.names())
            .field("validators", &self.validators.names())
            .finish()
    }
}

impl Model {
    /// Create a model seeded with a required `id` element as its object identifier
    pub fn new(model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let mut model = Self {
            description: format!("... description of {} goes here ...", model_id),
            id: model_id,
            ..Self::default()
        };

        let mut element = Element::new("id");
        element.is_object_id = true;
        element.element_type = "text".to_string();
        element.attributes = IndexMap::from([("required".to_string(), "true".to_string())]);

        if let Err(e) = model.insert_element(0, element) {
            tracing::warn!(model = %model.id, "failed to seed identifier element: {}", e);
        }
        let diagnostics = model.check();
        if !diagnostics.is_ok() {
            tracing::warn!(model = %model.id, "new model failed check: {}", diagnostics);
        }
        model
    }

    /// The elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    // ------------------------------------------------------------------
    // Structural validation
    // ------------------------------------------------------------------

    /// Check the model's structure
    ///
    /// Reports an invalid model id, no elements (which stops further checks),
    /// invalid elements, duplicate element ids, and anything other than exactly
    /// one object identifier element. All other findings accumulate.
    pub fn check(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if !is_valid_varname(&self.id) {
            diagnostics.push(format!("Invalid model id, {}", self.id));
        }
        if self.elements.is_empty() {
            diagnostics.push("Missing model elements.");
            return diagnostics;
        }

        let mut has_model_id = false;
        for (i, e) in self.elements.iter().enumerate() {
            let element_diagnostics = e.check();
            if !element_diagnostics.is_ok() {
                diagnostics.extend(element_diagnostics);
                diagnostics.push(format!("Error for {}.{}", self.id, e.id));
            }
            if !e.id.is_empty() && self.elements[..i].iter().any(|prev| prev.id == e.id) {
                diagnostics.push(format!("Duplicate element id: {}", e.id));
            }
            if e.is_object_id {
                if has_model_id {
                    diagnostics.push(format!(
                        "Duplicate model identifier element ({}) {}.{}",
                        i, self.id, e.id
                    ));
                }
                has_model_id = true;
            }
        }
        if !has_model_id {
            diagnostics.push(format!(
                "Missing required object identifier for model {}",
                self.id
            ));
        }
        diagnostics
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert an element at `pos`
    ///
    /// Negative positions clamp to the front, positions at or past the end
    /// append. Marks the model and all of its elements as changed.
    pub fn insert_element(&mut self, pos: isize, element: Element) -> Result<(), ModelError> {
        if !is_valid_varname(&element.id) {
            return Err(ModelError::InvalidElementId(element.id));
        }
        if self.has_element(&element.id) {
            return Err(ModelError::DuplicateElementId(element.id));
        }
        let pos = pos.max(0) as usize;
        if pos >= self.elements.len() {
            self.elements.push(element);
        } else {
            self.elements.insert(pos, element);
        }
        self.changed(true);
        Ok(())
    }

    /// Replace the element with `element_id`, keeping its position
    pub fn update_element(&mut self, element_id: &str, element: Element) -> Result<(), ModelError> {
        let index = self
            .position(element_id)
            .ok_or_else(|| ModelError::ElementNotFound(element_id.to_string()))?;
        self.elements[index] = element;
        self.changed(true);
        Ok(())
    }

    /// Remove the element with `element_id`, returning it
    pub fn remove_element(&mut self, element_id: &str) -> Result<Element, ModelError> {
        let index = self
            .position(element_id)
            .ok_or_else(|| ModelError::ElementNotFound(element_id.to_string()))?;
        let removed = self.elements.remove(index);
        self.changed(true);
        Ok(removed)
    }

    /// Move the element with `element_id` to `pos`, with the same clamping as insert
    pub fn move_element(&mut self, element_id: &str, pos: isize) -> Result<(), ModelError> {
        let index = self
            .position(element_id)
            .ok_or_else(|| ModelError::ElementNotFound(element_id.to_string()))?;
        let element = self.elements.remove(index);
        let pos = (pos.max(0) as usize).min(self.elements.len());
        self.elements.insert(pos, element);
        self.changed(true);
        Ok(())
    }

    /// Mutable access to an element by id
    ///
    /// Direct edits do not mark anything as changed; call
    /// [`Model::changed`] when the edit should be tracked.
    pub fn element_by_id_mut(&mut self, element_id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == element_id)
    }

    fn position(&self, element_id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == element_id)
    }

    // ------------------------------------------------------------------
    // Change tracking
    // ------------------------------------------------------------------

    /// Set the change state on the model and every element
    pub fn changed(&mut self, state: bool) {
        self.is_changed = state;
        for element in &mut self.elements {
            element.changed(state);
        }
    }

    /// True if the model or any of its elements is marked as changed
    pub fn has_changes(&self) -> bool {
        self.is_changed || self.elements.iter().any(Element::has_changed)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Whether an element with the given id exists
    pub fn has_element(&self, element_id: &str) -> bool {
        self.elements.iter().any(|e| e.id == element_id)
    }

    /// Whether any element has the given type (case-insensitive)
    pub fn has_element_type(&self, element_type: &str) -> bool {
        self.elements
            .iter()
            .any(|e| e.element_type.eq_ignore_ascii_case(element_type))
    }

    /// The element flagged as the object identifier
    pub fn model_identifier(&self) -> Option<&Element> {
        self.elements.iter().find(|e| e.is_object_id)
    }

    /// Keys of the model's attributes
    pub fn attribute_ids(&self) -> Vec<String> {
        self.attributes
            .keys()
            .filter(|k| !k.is_empty())
            .cloned()
            .collect()
    }

    /// Ids of all elements that have one, in document order
    pub fn element_ids(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| !e.id.is_empty())
            .map(|e| e.id.clone())
            .collect()
    }

    /// Id of the object identifier element, or an empty string
    pub fn primary_id(&self) -> String {
        self.model_identifier()
            .map(|e| e.id.clone())
            .unwrap_or_default()
    }

    /// Element id -> generator tag for every element with a generator
    pub fn generated_types(&self) -> IndexMap<String, String> {
        self.elements
            .iter()
            .filter(|e| !e.generator.is_empty())
            .map(|e| (e.id.clone(), e.generator.clone()))
            .collect()
    }

    /// Look up an element by id
    pub fn element_by_id(&self, element_id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    // ------------------------------------------------------------------
    // Type definitions
    // ------------------------------------------------------------------

    /// Attach an element generator and a validator to a type name
    pub fn define<G, V>(&mut self, type_name: &str, generator: G, validator: V)
    where
        G: Fn() -> Element + Send + Sync + 'static,
        V: Fn(&Element, &str) -> bool + Send + Sync + 'static,
    {
        self.gen_elements.insert(type_name, Arc::new(generator) as GenElementFn);
        self.validators.insert(type_name, Arc::new(validator) as ValidateFn);
    }

    /// Whether a generator is registered for the type
    pub fn is_supported_element_type(&self, type_name: &str) -> bool {
        self.gen_elements.contains(type_name)
    }

    /// Build a fresh element for a registered type
    pub fn gen_element_type(&self, type_name: &str) -> Option<Element> {
        self.gen_elements.get(type_name).map(|generate| generate())
    }

    /// Registered type names in sorted order
    pub fn element_types(&self) -> Vec<String> {
        self.gen_elements.names()
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Register a render function under a name
    pub fn register<F>(&mut self, name: &str, render_fn: F)
    where
        F: Fn(&mut dyn Write, &Model) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        self.renderer.insert(name, Arc::new(render_fn) as RenderFn);
    }

    /// Registered renderer names in sorted order
    pub fn renderer_names(&self) -> Vec<String> {
        self.renderer.names()
    }

    /// Render with the named render function
    ///
    /// An unregistered name is an error for the caller to propagate; use
    /// [`Model::render_element`] to get a report instead.
    pub fn render(&self, out: &mut dyn Write, name: &str) -> Result<(), RenderError> {
        let render_fn = self.renderer.get(name).ok_or_else(|| RenderError::NotRegistered {
            name: name.to_string(),
        })?;
        tracing::info!(model = %self.id, renderer = name, "rendering model");
        render_fn(out, self)
    }

    /// Render with the named render function, reporting failures as diagnostics
    pub fn render_element(&self, name: &str, out: &mut dyn Write) -> Diagnostics {
        match self.render(out, name) {
            Ok(()) => Diagnostics::new(),
            Err(e) => Diagnostics::single(e.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Form data validation
    // ------------------------------------------------------------------

    /// Validate submitted form data (field id -> value)
    ///
    /// The number of submitted fields must equal the number of element ids.
    /// Each field must name an element and pass the validator registered for
    /// that element's type; types without a validator pass. Stops at the
    /// first failure.
    pub fn validate<I, K, V>(&self, form_data: I) -> Diagnostics
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = form_data.into_iter();
        let expected = self.element_ids().len();
        if expected != fields.len() {
            return Diagnostics::single("Form data does not match model element ids.");
        }
        for (k, v) in fields {
            let (k, v) = (k.as_ref(), v.as_ref());
            let Some(elem) = self.element_by_id(k) else {
                return Diagnostics::single(format!("Element with id {} not found in model.", k));
            };
            if !self.run_validator(elem, v) {
                return Diagnostics::single(format!(
                    "Failed to validate elem.Id {}, elem.Type {}, value {}",
                    elem.id, elem.element_type, v
                ));
            }
        }
        Diagnostics::new()
    }

    /// Validate untyped data, normalizing each value to a string first
    ///
    /// Same rules as [`Model::validate`].
    pub fn validate_map_interface<'a, I, K>(&self, data: I) -> Diagnostics
    where
        I: IntoIterator<Item = (K, &'a Value)>,
        I::IntoIter: ExactSizeIterator,
        K: AsRef<str>,
    {
        let fields = data.into_iter();
        let expected = self.element_ids().len();
        if expected != fields.len() {
            return Diagnostics::single(format!(
                "Expected len(ids) {}, got len(data) {}",
                expected,
                fields.len()
            ));
        }
        for (k, v) in fields {
            let k = k.as_ref();
            let val = normalize(v);
            let Some(elem) = self.element_by_id(k) else {
                return Diagnostics::single(format!("Element with id {} not found in model.", k));
            };
            if !self.run_validator(elem, &val) {
                return Diagnostics::single(format!(
                    "Failed to validate elem.Id {}, value {}",
                    elem.id, val
                ));
            }
        }
        Diagnostics::new()
    }

    fn run_validator(&self, elem: &Element, value: &str) -> bool {
        match self.validators.get(&elem.element_type) {
            Some(validate) => {
                let ok = validate(elem, value);
                if !ok {
                    tracing::debug!(
                        id = %elem.id,
                        element_type = %elem.element_type,
                        value,
                        "validator rejected value"
                    );
                }
                ok
            }
            None => true,
        }
    }

    /// Fill in values for generated elements
    ///
    /// Missing entries are always generated. With `refresh`, existing values
    /// of non-creation generators (e.g. `current_timestamp`) are regenerated.
    /// Returns the ids that were written.
    pub fn populate_generated(&self, data: &mut IndexMap<String, String>, refresh: bool) -> Vec<String> {
        let mut written = Vec::new();
        for (id, tag) in self.generated_types() {
            let present = data.get(&id).is_some_and(|v| !v.is_empty());
            if present && !(refresh && !is_creation_tag(&tag)) {
                continue;
            }
            if let Some(value) = generate_value(&tag) {
                data.insert(id.clone(), value);
                written.push(id);
            }
        }
        written
    }

    // ------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------

    /// Populate the model from an untyped key/value structure
    ///
    /// `id`, `attributes`, `description` and `title` are taken when present
    /// and correctly typed. `elements` must be a sequence; it replaces the
    /// whole collection, after which the model is checked.
    pub fn from_object(&mut self, data: &Value) -> Diagnostics {
        let Some(obj) = data.as_object() else {
            return Diagnostics::single("data is not an object");
        };

        if let Some(id) = obj.get("id").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            self.id = id.to_string();
        }
        if let Some(attrs) = obj.get("attributes").and_then(Value::as_object) {
            self.attributes = string_map(attrs);
        }
        if let Some(description) = obj
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            self.description = description.to_string();
        }
        if let Some(title) = obj.get("title").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            self.title = Some(title.to_string());
        }

        let Some(entries) = obj.get("elements").and_then(Value::as_array) else {
            return Diagnostics::single("data elements are not an array");
        };

        let elements: Vec<Element> = entries
            .iter()
            .filter_map(|entry| {
                if !entry.is_object() {
                    tracing::warn!(model = %self.id, "skipping element entry that is not a mapping");
                    return None;
                }
                let mut element = Element::default();
                element.from_object(entry);
                Some(element)
            })
            .collect();

        tracing::info!(model = %self.id, count = elements.len(), "loaded model elements");
        self.replace_elements(elements)
    }

    /// Replace the element collection with already-built elements and check the result
    pub fn replace_elements<I>(&mut self, elements: I) -> Diagnostics
    where
        I: IntoIterator<Item = Element>,
    {
        self.elements = elements.into_iter().collect();
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn test_model_data() -> Value {
        json!({
            "id": "test_model",
            "attributes": { "method": "GET", "action": "./" },
            "elements": [
                { "id": "id", "type": "text", "attributes": { "required": true, "name": "id" }, "is_object_id": true },
                { "id": "name", "type": "text", "attributes": { "name": "name", "required": "true" } },
                { "id": "msg", "type": "textarea", "attributes": { "name": "msg" } },
                { "id": "updated", "type": "text", "attributes": { "name": "updated" }, "generator": "current_timestamp" },
                { "id": "created", "type": "text", "attributes": { "name": "created" }, "generator": "created_timestamp" }
            ]
        })
    }

    #[test]
    fn test_empty_model() {
        let model = Model::default();
        assert!(!model.has_changes());
        assert!(!model.has_element("id"));
        assert!(model.model_identifier().is_none());
        assert!(model.attribute_ids().is_empty());
        assert!(model.element_ids().is_empty());
        assert!(model.element_by_id("name").is_none());
        assert!(model.generated_types().is_empty());
        assert_eq!(model.primary_id(), "");
    }

    #[test]
    fn test_new_model_is_valid() {
        let mut model = Model::new("test_model");
        assert!(model.check().is_ok(), "{}", model.check());
        assert_eq!(model.primary_id(), "id");
        assert!(model.has_changes());
        model.changed(false);
        assert!(!model.has_changes());
    }

    #[test]
    fn test_from_object() {
        let mut model = Model::new("test_model");
        let diagnostics = model.from_object(&test_model_data());
        assert!(diagnostics.is_ok(), "{}", diagnostics);

        assert_eq!(model.attribute_ids(), vec!["method".to_string(), "action".to_string()]);
        assert_eq!(model.element_ids(), vec!["id", "name", "msg", "updated", "created"]);
        assert_eq!(model.primary_id(), "id");

        let generated = model.generated_types();
        assert_eq!(generated.len(), 2);
        assert_eq!(generated["updated"], "current_timestamp");
        assert_eq!(generated["created"], "created_timestamp");
    }

    #[test]
    fn test_from_object_requires_elements_array() {
        let mut model = Model::new("keep");
        let diagnostics = model.from_object(&json!({ "id": "other", "elements": "nope" }));
        assert!(diagnostics.contains("data elements are not an array"));
        assert_eq!(model.id, "other");
        assert_eq!(model.element_ids(), vec!["id"]);
    }

    #[test]
    fn test_check_is_idempotent() {
        let mut model = Model::default();
        model.from_object(&json!({ "id": "bad id", "elements": [{ "id": "a b", "type": "text" }] }));
        let first = model.check();
        let second = model.check();
        assert_eq!(first, second);
        assert!(first.contains("Invalid model id, bad id"));
        assert!(first.contains("Error for bad id.a b"));
        assert!(first.contains("Missing required object identifier for model bad id"));
    }

    #[test]
    fn test_check_empty_elements_short_circuits() {
        let mut model = Model::default();
        model.id = "empty".to_string();
        let diagnostics = model.check();
        assert_eq!(diagnostics.messages(), &["Missing model elements.".to_string()]);
    }

    #[test]
    fn test_check_duplicate_identifier() {
        let mut model = Model::default();
        model.id = "dup".to_string();
        let diagnostics = model.replace_elements([
            Element::new("a").with_object_id(true),
            Element::new("b").with_object_id(true),
        ]);
        assert_eq!(
            diagnostics.messages(),
            &["Duplicate model identifier element (1) dup.b".to_string()]
        );
    }

    #[test]
    fn test_check_duplicate_element_ids() {
        let mut model = Model::default();
        model.id = "dup".to_string();
        let diagnostics = model.replace_elements([
            Element::new("a").with_object_id(true),
            Element::new("a"),
        ]);
        assert!(diagnostics.contains("Duplicate element id: a"));
    }

    #[test]
    fn test_insert_element_positions() {
        let mut model = Model::default();
        model.insert_element(0, Element::new("b")).unwrap();
        model.insert_element(-5, Element::new("a")).unwrap();
        model.insert_element(99, Element::new("d")).unwrap();
        model.insert_element(2, Element::new("c")).unwrap();
        assert_eq!(model.element_ids(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_duplicate_element() {
        let mut model = Model::default();
        assert!(model.insert_element(0, Element::new("title")).is_ok());
        let err = model.insert_element(0, Element::new("title")).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate element id: title");
        assert_eq!(model.elements().len(), 1);
    }

    #[test]
    fn test_insert_invalid_element_id() {
        let mut model = Model::default();
        let err = model.insert_element(0, Element::new("no good")).unwrap_err();
        assert_eq!(err, ModelError::InvalidElementId("no good".to_string()));
        assert!(model.elements().is_empty());
    }

    #[test]
    fn test_insert_marks_everything_changed() {
        let mut model = Model::new("m");
        model.changed(false);
        model.insert_element(1, Element::of_type("text").with_id("x")).unwrap();
        assert!(model.has_changes());
        assert!(model.elements().iter().all(Element::has_changed));
    }

    #[test]
    fn test_update_element() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::new("name")).unwrap();
        model.insert_element(2, Element::new("email")).unwrap();
        model.changed(false);

        let replacement = Element::of_type("textarea").with_id("bio");
        model.update_element("name", replacement).unwrap();
        assert_eq!(model.element_ids(), vec!["id", "bio", "email"]);
        assert!(model.has_changes());

        let err = model.update_element("missing", Element::new("x")).unwrap_err();
        assert_eq!(err.to_string(), "Element id missing not found");
    }

    #[test]
    fn test_remove_element() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::new("name")).unwrap();
        let removed = model.remove_element("name").unwrap();
        assert_eq!(removed.id, "name");
        assert_eq!(model.elements().len(), 1);

        assert!(model.remove_element("name").is_err());
        assert_eq!(model.elements().len(), 1);
    }

    #[test]
    fn test_move_element() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::new("a")).unwrap();
        model.insert_element(2, Element::new("b")).unwrap();
        model.move_element("b", 0).unwrap();
        assert_eq!(model.element_ids(), vec!["b", "id", "a"]);
        model.move_element("b", 10).unwrap();
        assert_eq!(model.element_ids(), vec!["id", "a", "b"]);
    }

    #[test]
    fn test_has_changes_is_live_scan() {
        let mut model = Model::new("m");
        model.changed(false);
        model.element_by_id_mut("id").unwrap().changed(true);
        assert!(model.has_changes());
    }

    #[test]
    fn test_has_element_type_case_insensitive() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::of_type("Submit").with_id("go")).unwrap();
        assert!(model.has_element_type("submit"));
        assert!(!model.has_element_type("textarea"));
    }

    #[test]
    fn test_define_and_generate() {
        let mut model = Model::default();
        assert!(!model.is_supported_element_type("date"));
        assert!(model.gen_element_type("date").is_none());

        model.define("date", || Element::of_type("date"), |_, v| !v.is_empty());
        assert!(model.is_supported_element_type("date"));
        assert_eq!(model.gen_element_type("date").unwrap().element_type, "date");

        model.define("date", || Element::of_type("date").with_label("Override"), |_, _| true);
        assert_eq!(model.gen_element_type("date").unwrap().label, "Override");
    }

    #[test]
    fn test_render_unregistered_is_error() {
        let model = Model::new("m");
        let mut out = Vec::new();
        let err = model.render(&mut out, "pdf").unwrap_err();
        assert!(matches!(err, RenderError::NotRegistered { .. }));
        assert_eq!(err.to_string(), "pdf is not a registered rendering function");
    }

    #[test]
    fn test_render_element_reports() {
        let mut model = Model::new("m");
        let mut out = Vec::new();
        let diagnostics = model.render_element("pdf", &mut out);
        assert_eq!(
            diagnostics.messages(),
            &["pdf is not a registered rendering function".to_string()]
        );

        model.register("ids", |out, m| {
            for id in m.element_ids() {
                writeln!(out, "{}", id)?;
            }
            Ok(())
        });
        let diagnostics = model.render_element("ids", &mut out);
        assert!(diagnostics.is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "id\n");
    }

    #[test]
    fn test_validate_cardinality() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::new("name")).unwrap();
        model.define("text", || Element::of_type("text"), |_, _| {
            panic!("validator must not run when cardinality differs")
        });

        let form = HashMap::from([("id".to_string(), "1".to_string())]);
        let diagnostics = model.validate(&form);
        assert_eq!(
            diagnostics.messages(),
            &["Form data does not match model element ids.".to_string()]
        );
    }

    #[test]
    fn test_validate_unknown_field() {
        let model = Model::new("m");
        let form = HashMap::from([("nope".to_string(), "1".to_string())]);
        let diagnostics = model.validate(&form);
        assert!(diagnostics.contains("Element with id nope not found in model."));
    }

    #[test]
    fn test_validate_uses_type_validator() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::of_type("number").with_id("age")).unwrap();
        model.define("number", || Element::of_type("number"), |_, v| v.parse::<f64>().is_ok());

        let ok = HashMap::from([("id", "x1"), ("age", "42")]);
        assert!(model.validate(&ok).is_ok());

        let bad = HashMap::from([("id", "x1"), ("age", "old")]);
        let diagnostics = model.validate(&bad);
        assert_eq!(
            diagnostics.messages(),
            &["Failed to validate elem.Id age, elem.Type number, value old".to_string()]
        );
    }

    #[test]
    fn test_validate_map_interface_normalizes() {
        let mut model = Model::new("m");
        model.insert_element(1, Element::of_type("number").with_id("age")).unwrap();
        model.insert_element(2, Element::of_type("checkbox").with_id("ok")).unwrap();
        model.define("number", || Element::of_type("number"), |_, v| v == "42");
        model.define("checkbox", || Element::of_type("checkbox"), |_, v| v == "true");

        let data = json!({ "id": "abc", "age": 42, "ok": true });
        let map = data.as_object().unwrap();
        assert!(model.validate_map_interface(map).is_ok());

        let data = json!({ "id": "abc", "age": 41, "ok": true });
        let diagnostics = model.validate_map_interface(data.as_object().unwrap());
        assert_eq!(diagnostics.messages(), &["Failed to validate elem.Id age, value 41".to_string()]);

        let data = json!({ "id": "abc" });
        let diagnostics = model.validate_map_interface(data.as_object().unwrap());
        assert_eq!(diagnostics.messages(), &["Expected len(ids) 3, got len(data) 1".to_string()]);
    }

    #[test]
    fn test_populate_generated() {
        let mut model = Model::new("m");
        model
            .insert_element(1, Element::new("created").with_generator("created_timestamp"))
            .unwrap();
        model
            .insert_element(2, Element::new("updated").with_generator("current_timestamp"))
            .unwrap();
        model
            .insert_element(3, Element::new("seq").with_generator("autoincrement"))
            .unwrap();

        let mut data = IndexMap::new();
        data.insert("created".to_string(), "2024-01-01T00:00:00Z".to_string());
        data.insert("updated".to_string(), "2024-01-01T00:00:00Z".to_string());

        let written = model.populate_generated(&mut data, false);
        assert!(written.is_empty());

        let written = model.populate_generated(&mut data, true);
        assert_eq!(written, vec!["updated".to_string()]);
        assert_eq!(data["created"], "2024-01-01T00:00:00Z");
        assert!(!data.contains_key("seq"));
    }

    #[test]
    fn test_yaml_roundtrip_skips_registries() {
        let mut model = Model::new("guestbook");
        model.define("text", || Element::of_type("text"), |_, _| true);
        let yaml = serde_yml::to_string(&model).unwrap();
        assert!(yaml.contains("id: guestbook"));
        assert!(!yaml.contains("validators"));

        let parsed: Model = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.element_ids(), vec!["id"]);
        assert!(parsed.check().is_ok());
        assert!(!parsed.is_supported_element_type("text"));
    }
}
