//! Modelgen: declarative form and data models
//!
//! A model is an ordered list of elements described in YAML or JSON. The
//! same model renders as an HTML form, a SQLite table, TypeScript or Python
//! classes, and validates submitted form data.

pub mod cli;
pub mod core;
pub mod render;
pub mod schema;
pub mod types;
pub mod yaml;
