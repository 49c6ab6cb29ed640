//! Extension points attached to a model
//!
//! A model carries three name-keyed tables: renderers (name -> render
//! function), element generators (type -> factory) and validators
//! (type -> predicate). None of them has a fixed set of entries; the
//! built-in ones live in [`crate::render`] and [`crate::types`].

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use miette::Diagnostic;
use thiserror::Error;

use crate::core::element::Element;
use crate::core::model::Model;

/// Serializes a model into a sink
pub type RenderFn = Arc<dyn Fn(&mut dyn Write, &Model) -> Result<(), RenderError> + Send + Sync>;

/// Checks a submitted string value against an element's constraints
pub type ValidateFn = Arc<dyn Fn(&Element, &str) -> bool + Send + Sync>;

/// Builds a fresh element of a given type
pub type GenElementFn = Arc<dyn Fn() -> Element + Send + Sync>;

/// Errors that can occur while rendering a model
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    #[error("{name} is not a registered rendering function")]
    #[diagnostic(code(modelgen::render::not_registered))]
    NotRegistered { name: String },

    #[error("{what} can't be used as an identifier, {id:?}")]
    #[diagnostic(code(modelgen::render::identifier))]
    InvalidIdentifier { what: &'static str, id: String },

    #[error("model {id} has no elements to render")]
    #[diagnostic(code(modelgen::render::empty))]
    NoElements { id: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A name-keyed table of functions
///
/// Later registrations under the same name replace earlier ones.
#[derive(Clone)]
pub struct Registry<F> {
    entries: BTreeMap<String, F>,
}

impl<F> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, f: F) {
        self.entries.insert(name.into(), f);
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}
