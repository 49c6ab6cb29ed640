//! Element - a single field definition within a model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::diagnostics::Diagnostics;
use crate::core::identity::{capitalize, is_valid_varname};
use crate::core::value::normalize_scalar;

/// A single field of a model: its identity, input kind and the metadata
/// renderers and validators need.
///
/// The `type` is an open set (text, textarea, checkbox, select, markdown, ...);
/// what a type means is decided by the validators and generators registered
/// on the owning [`Model`](crate::core::Model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    /// Input kind, e.g. `text`, `textarea`, `date`
    #[serde(rename = "type")]
    pub element_type: String,

    /// Identifier, unique within the owning model
    pub id: String,

    /// Rendering and validation hints (`name`, `required`, `checked`, ...)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Validation regex applied to submitted values
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,

    /// Label/value pairs for enumerated choice types
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<IndexMap<String, String>>,

    /// Marks the element as the model's object identifier
    #[serde(alias = "is_primary_id", skip_serializing_if = "std::ops::Not::not")]
    pub is_object_id: bool,

    /// Auto-population strategy (uuid, timestamp, ...); empty means none
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generator: String,

    /// Display label; derived from the id when empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(skip)]
    is_changed: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            element_type: "text".to_string(),
            id: String::new(),
            attributes: IndexMap::new(),
            pattern: String::new(),
            options: Vec::new(),
            is_object_id: false,
            generator: String::new(),
            label: String::new(),
            is_changed: false,
        }
    }
}

impl Element {
    /// Create a basic text input element
    ///
    /// The element gets `name` set to the id, a capitalized default label and
    /// is marked as changed. The id is checked right away; an invalid id is
    /// logged and can be inspected with [`Element::check`].
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut attributes = IndexMap::new();
        attributes.insert("name".to_string(), id.clone());

        let mut element = Self {
            element_type: "text".to_string(),
            label: capitalize(&id),
            id,
            attributes,
            ..Self::default()
        };
        element.changed(true);

        let diagnostics = element.check();
        if !diagnostics.is_ok() {
            tracing::warn!(id = %element.id, "new element failed check: {}", diagnostics);
        }
        element
    }

    /// Create an empty element of the given type
    pub fn of_type(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            ..Self::default()
        }
    }

    /// Builder: set the id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder: set the type
    pub fn with_type(mut self, element_type: impl Into<String>) -> Self {
        self.element_type = element_type.into();
        self
    }

    /// Builder: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: set the validation pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Builder: set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder: set the generator tag
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Builder: mark as the object identifier
    pub fn with_object_id(mut self, is_object_id: bool) -> Self {
        self.is_object_id = is_object_id;
        self
    }

    /// Builder: append an option entry
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        let mut option = IndexMap::new();
        option.insert("value".to_string(), value.into());
        option.insert("label".to_string(), label.into());
        self.options.push(option);
        self
    }

    /// Whether the element has been modified since the flag was last cleared
    pub fn has_changed(&self) -> bool {
        self.is_changed
    }

    /// Set the change state
    pub fn changed(&mut self, state: bool) {
        self.is_changed = state;
    }

    /// The label to display: the explicit label, or the id capitalized
    pub fn label_or_default(&self) -> String {
        if self.label.is_empty() {
            capitalize(&self.id)
        } else {
            self.label.clone()
        }
    }

    /// The form field name: the `name` attribute, or the id
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .map(String::as_str)
            .unwrap_or(&self.id)
    }

    /// Check that the element is structurally valid
    ///
    /// Valid means a non-empty id with identifier syntax and a non-empty type.
    pub fn check(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if self.id.is_empty() {
            diagnostics.push("element missing id");
        }
        if !is_valid_varname(&self.id) {
            diagnostics.push(format!("Invalid element id, {}", self.id));
        }
        if self.element_type.is_empty() {
            diagnostics.push(format!("element, {}, missing type", self.id));
        }
        diagnostics
    }

    /// Merge fields from an untyped key/value structure
    ///
    /// Only keys with the expected type are taken; anything else is ignored.
    /// `is_primary_id` and `is_object_id` are synonyms.
    pub fn from_object(&mut self, data: &Value) {
        let Some(obj) = data.as_object() else {
            return;
        };

        if let Some(id) = non_empty_str(obj.get("id")) {
            self.id = id.to_string();
        }
        if let Some(element_type) = non_empty_str(obj.get("type")) {
            self.element_type = element_type.to_string();
        }
        if let Some(attrs) = obj.get("attributes").and_then(Value::as_object) {
            self.attributes = string_map(attrs);
        }
        if let Some(pattern) = non_empty_str(obj.get("pattern")) {
            self.pattern = pattern.to_string();
        }
        if let Some(options) = obj.get("options").and_then(Value::as_array) {
            self.options = options
                .iter()
                .filter_map(Value::as_object)
                .map(string_map)
                .collect();
        }
        if let Some(generator) = non_empty_str(obj.get("generator")) {
            self.generator = generator.to_string();
        }
        if let Some(label) = non_empty_str(obj.get("label")) {
            self.label = label.to_string();
        }

        let primary = obj.get("is_primary_id");
        let object = obj.get("is_object_id");
        if primary.is_some() || object.is_some() {
            self.is_object_id = truthy(primary) || truthy(object);
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.to_lowercase().as_str(), "true" | "yes"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Keep scalar entries of an object as strings, in document order
pub(crate) fn string_map(obj: &serde_json::Map<String, Value>) -> IndexMap<String, String> {
    obj.iter()
        .filter_map(|(k, v)| normalize_scalar(v).map(|s| (k.clone(), s)))
        .collect()
}
