//! CLI command implementations

pub mod check;
pub mod completions;
pub mod config;
pub mod inspect;
pub mod model;
pub mod render;
pub mod types;
pub mod validate;
