//! `modelgen render` command - Render a model with a registered renderer

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::cli::helpers::{equip, print_diagnostics};
use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::yaml::{load_model, Source};

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Model file (YAML or JSON); reads stdin when omitted or `-`
    pub model: Option<PathBuf>,

    /// Renderer name (html, sqlite, typescript, python, yaml)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// CSS class prefix for HTML output
    #[arg(long)]
    pub css_prefix: Option<String>,

    /// Render even if the model fails its structural check
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: RenderArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let source = Source::read(args.model.as_deref())?;
    let (mut model, diagnostics) = load_model(&source)?;
    equip(&mut model, &config, args.css_prefix.as_deref());

    if !diagnostics.is_ok() {
        if !args.force {
            if !global.quiet {
                eprintln!("{} {} has problems:", style("✗").red(), source.name);
            }
            print_diagnostics(&diagnostics, global);
            return Err(miette::miette!(
                help = "fix the model or pass --force to render it anyway",
                "{} failed its check",
                source.name
            ));
        }
        tracing::warn!(model = %model.id, "rendering a model that failed its check: {}", diagnostics);
    }

    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.default_renderer().to_string());
    tracing::info!(model = %model.id, renderer = %format, "rendering");

    match &args.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut out = BufWriter::new(file);
            model.render(&mut out, &format)?;
            out.flush().into_diagnostic()?;
            if !global.quiet {
                eprintln!(
                    "{} Rendered {} as {} to {}",
                    style("✓").green(),
                    style(&model.id).cyan(),
                    format,
                    path.display()
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            model.render(&mut out, &format)?;
        }
    }
    Ok(())
}
