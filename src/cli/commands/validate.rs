//! `modelgen validate` command - Validate form data against a model

use console::style;
use indexmap::IndexMap;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{open_model, print_diagnostics};
use crate::cli::GlobalOpts;
use crate::core::{normalize, Config, Diagnostics, Model};
use crate::yaml::{parse_mapping, Source};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Model file (YAML or JSON)
    pub model: PathBuf,

    /// Form-data document (YAML or JSON mapping of element id to value); `-` for stdin
    pub data: PathBuf,

    /// Generate values for generated elements that are missing
    #[arg(long)]
    pub fill_generated: bool,

    /// Also regenerate values that are already present (except created_* tags)
    #[arg(long, requires = "fill_generated")]
    pub refresh: bool,

    /// Print the data as YAML after filling in generated values
    #[arg(long, requires = "fill_generated")]
    pub print: bool,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let (model, structure) = open_model(Some(args.model.as_path()), &config)?;
    if !structure.is_ok() {
        if !global.quiet {
            eprintln!("{} {} has problems:", style("✗").red(), args.model.display());
        }
        print_diagnostics(&structure, global);
        return Err(miette::miette!(
            "{} failed its check; run `modelgen check` for details",
            args.model.display()
        ));
    }

    let source = Source::read(Some(args.data.as_path()))?;
    let data = parse_mapping(&source.text, &source.name)?;

    let diagnostics = if args.fill_generated {
        let mut fields: IndexMap<String, String> = data
            .iter()
            .map(|(k, v)| (k.clone(), normalize(v)))
            .collect();
        let filled = model.populate_generated(&mut fields, args.refresh);
        tracing::debug!(fields = ?filled, "populated generated values");
        let diagnostics = model.validate(fields.iter());
        if args.print && diagnostics.is_ok() {
            print!("{}", serde_yml::to_string(&fields).into_diagnostic()?);
        }
        diagnostics
    } else {
        model.validate_map_interface(data.iter())
    };

    report(&model, &source.name, &diagnostics, global)
}

fn report(model: &Model, name: &str, diagnostics: &Diagnostics, global: &GlobalOpts) -> Result<()> {
    if diagnostics.is_ok() {
        if !global.quiet {
            eprintln!(
                "{} {} is valid for model {}",
                style("✓").green(),
                name,
                style(&model.id).cyan()
            );
        }
        return Ok(());
    }
    if !global.quiet {
        eprintln!("{} {} is not valid for model {}", style("✗").red(), name, model.id);
    }
    print_diagnostics(diagnostics, global);
    Err(miette::miette!("Validation failed for {}", name))
}
