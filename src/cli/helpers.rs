//! Shared helper functions for CLI commands

use console::style;
use miette::Result;
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::{Config, Diagnostics, Model};
use crate::render::{register_with, RenderOptions};
use crate::types::{define_defaults, define_extended};
use crate::yaml::{load_model, Source};

/// Attach the built-in types and renderers to a model
///
/// `css_prefix` overrides the configured prefix for HTML output.
pub fn equip(model: &mut Model, config: &Config, css_prefix: Option<&str>) {
    define_defaults(model);
    if config.extended_types() {
        define_extended(model);
    }
    let options = RenderOptions {
        css_prefix: css_prefix
            .map(str::to_string)
            .or_else(|| config.css_prefix.clone()),
    };
    register_with(model, &options);
}

/// Read a model file (or stdin) and equip it with types and renderers
///
/// Structural problems are returned, not raised; callers decide whether a
/// model that fails its check is usable.
pub fn open_model(path: Option<&Path>, config: &Config) -> Result<(Model, Diagnostics)> {
    let source = Source::read(path)?;
    let (mut model, diagnostics) = load_model(&source)?;
    equip(&mut model, config, None);
    Ok((model, diagnostics))
}

/// Print diagnostics to stderr, one per line
pub fn print_diagnostics(diagnostics: &Diagnostics, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    for message in diagnostics.iter() {
        eprintln!("  {} {}", style("•").red(), message);
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
