//! Model file tooling - schema linting and interactive editing

pub mod lint;
pub mod wizard;

pub use lint::{LintError, LintViolation, Linter, SchemaError};
pub use wizard::{EditError, ModelWizard};
