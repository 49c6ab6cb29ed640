//! `modelgen inspect` command - Summarize a model's elements

use console::style;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{open_model, print_diagnostics, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::{Config, Model};

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Model file (YAML or JSON); reads stdin when omitted or `-`
    pub model: Option<PathBuf>,

    /// Render the table as markdown
    #[arg(long)]
    pub markdown: bool,
}

pub fn run(args: InspectArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let (model, diagnostics) = open_model(args.model.as_deref(), &config)?;

    println!("{} {}", style("Model").bold(), style(&model.id).cyan().bold());
    if let Some(title) = &model.title {
        println!("  {}", title);
    }
    if !model.description.is_empty() && !global.quiet {
        println!("  {}", style(&model.description).dim());
    }
    println!();

    let mut table = element_table(&model);
    if args.markdown {
        println!("{}", table.with(Style::markdown()));
    } else {
        println!("{}", table.with(Style::rounded()));
    }

    println!();
    println!("  Primary id:  {}", style(model.primary_id()).cyan());
    let generated = model.generated_types();
    if !generated.is_empty() {
        let fields: Vec<String> = generated
            .iter()
            .map(|(id, tag)| format!("{} ({})", id, tag))
            .collect();
        println!("  Generated:   {}", fields.join(", "));
    }
    if !model.attributes.is_empty() {
        let attributes: Vec<String> = model
            .attributes
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        println!("  Attributes:  {}", attributes.join(" "));
    }

    if !diagnostics.is_ok() {
        println!();
        println!("{} {} problem(s):", style("!").yellow(), diagnostics.len());
        print_diagnostics(&diagnostics, global);
    }
    Ok(())
}

/// One row per element in document order
fn element_table(model: &Model) -> tabled::Table {
    let mut builder = Builder::default();
    builder.push_record(["#", "ID", "TYPE", "LABEL", "REQUIRED", "GENERATOR", "PATTERN"]);
    for (i, element) in model.elements().iter().enumerate() {
        let id = if element.is_object_id {
            format!("{} *", element.id)
        } else {
            element.id.clone()
        };
        let required = element
            .attributes
            .get("required")
            .is_some_and(|v| v == "true" || v == "required");
        let pattern = if element.pattern.is_empty() {
            element.attributes.get("pattern").cloned().unwrap_or_default()
        } else {
            element.pattern.clone()
        };
        builder.push_record([
            (i + 1).to_string(),
            id,
            element.element_type.clone(),
            element.label_or_default(),
            if required { "yes" } else { "" }.to_string(),
            element.generator.clone(),
            truncate_str(&pattern, 30),
        ]);
    }
    builder.build()
}
