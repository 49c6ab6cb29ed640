//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, config::ConfigCommands,
    inspect::InspectArgs, model::ModelArgs, render::RenderArgs, types::TypesArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(author, version, about = "Declarative form and data model toolkit")]
#[command(long_about = "Describe a form or data model once in YAML, then render it as HTML, SQL, \
TypeScript or Python and validate submitted data against it.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a model with one of the registered renderers
    Render(RenderArgs),

    /// Check model files for structural problems
    Check(CheckArgs),

    /// Show a model's elements as a table
    Inspect(InspectArgs),

    /// Validate a form-data document against a model
    Validate(ValidateArgs),

    /// Create or edit a model interactively
    Model(ModelArgs),

    /// List the available element types
    Types(TypesArgs),

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
