//! Identifier rules shared by models and elements

use regex::Regex;
use std::sync::LazyLock;

// Letters or underscore first, then letters, digits and underscores.
static VARNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("VARNAME_REGEX: invalid regex pattern")
});

/// Check that a string can be used as a model or element identifier
///
/// Identifiers end up as HTML ids, SQL table/column names and class
/// attribute names, so they follow the common variable-name syntax.
pub fn is_valid_varname(name: &str) -> bool {
    VARNAME_REGEX.is_match(name)
}

/// Upper-case the first character of an identifier, leaving the rest alone
///
/// Used for default labels (`testElement` -> `TestElement`) and class names.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Derive a CSS class fragment from an identifier
///
/// Lower-cases and replaces spaces with underscores.
pub fn css_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
