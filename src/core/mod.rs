//! Core module - models, elements and the pieces they are built from

pub mod config;
pub mod diagnostics;
pub mod element;
pub mod generator;
pub mod identity;
pub mod model;
pub mod registry;
pub mod value;

pub use config::Config;
pub use diagnostics::Diagnostics;
pub use element::Element;
pub use generator::generate_value;
pub use identity::{capitalize, css_name, is_valid_varname};
pub use model::{Model, ModelError};
pub use registry::{GenElementFn, Registry, RenderError, RenderFn, ValidateFn};
pub use value::normalize;
