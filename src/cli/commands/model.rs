//! `modelgen model` command - Create or edit a model interactively

use chrono::Local;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::helpers::{equip, open_model, print_diagnostics};
use crate::cli::GlobalOpts;
use crate::core::{is_valid_varname, Config, Model};
use crate::render::render_yaml;
use crate::schema::ModelWizard;

#[derive(clap::Args, Debug)]
pub struct ModelArgs {
    /// Model file to create or edit
    pub file: PathBuf,

    /// Model id for a new file (default: the file stem)
    #[arg(long)]
    pub id: Option<String>,

    /// Write the file without starting the editor
    #[arg(long)]
    pub no_edit: bool,
}

pub fn run(args: ModelArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let is_new = !args.file.exists();

    let mut model = if is_new {
        let id = match &args.id {
            Some(id) => id.clone(),
            None => default_model_id(&args.file),
        };
        if !is_valid_varname(&id) {
            return Err(miette::miette!(
                help = "pass --id with letters, digits and '_', starting with a letter",
                "{:?} can't be used as a model id",
                id
            ));
        }
        let mut model = Model::new(id);
        equip(&mut model, &config, None);
        model
    } else {
        let (model, diagnostics) = open_model(Some(args.file.as_path()), &config)?;
        if !diagnostics.is_ok() && !global.quiet {
            eprintln!("{} {} has problems:", style("!").yellow(), args.file.display());
            print_diagnostics(&diagnostics, global);
        }
        model
    };

    let changed = if args.no_edit {
        is_new
    } else {
        ModelWizard::new().run(&mut model)?
    };

    if !changed {
        if !global.quiet {
            println!("{} No changes to {}", style("→").blue(), args.file.display());
        }
        return Ok(());
    }

    save(&args.file, &model, is_new.then(|| config.author()).as_deref())?;
    if !global.quiet {
        println!(
            "{} Saved {} to {}",
            style("✓").green(),
            style(&model.id).cyan(),
            args.file.display()
        );
    }
    Ok(())
}

/// Model id derived from a file name: the stem with anything that is not
/// an identifier character replaced by `_`
fn default_model_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut id: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// Write the model as YAML; new files get a header naming the author
fn save(path: &Path, model: &Model, author: Option<&str>) -> Result<()> {
    let mut out = Vec::new();
    if let Some(author) = author {
        out.extend_from_slice(
            format!("# Created by {} on {}\n", author, Local::now().format("%Y-%m-%d")).as_bytes(),
        );
    }
    render_yaml(&mut out, model)?;
    fs::write(path, out).into_diagnostic()
}
