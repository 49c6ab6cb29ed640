//! `modelgen config` command - Configuration management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::config::PROJECT_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., default_renderer, css_prefix)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of ./.modelgen.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of ./.modelgen.yaml
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("default_renderer", "Renderer used by `modelgen render` without --format"),
    ("extended_types", "Also enable week, search, button, reset, submit, image"),
    ("css_prefix", "CSS class prefix for HTML output (default: model id)"),
    ("author", "Author recorded in models created by `modelgen model`"),
];

pub fn run(cmd: ConfigCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Unset(args) => run_unset(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(&config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Environment variables (MODELGEN_RENDERER, MODELGEN_EXTENDED_TYPES, MODELGEN_AUTHOR)");
    println!("  2. Nearest {} from the working directory up", PROJECT_CONFIG_FILE);
    println!("  3. Global config (~/.config/modelgen/config.yaml)");
    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    check_key(&args.key)?;
    if args.key == "extended_types" && args.value.parse::<bool>().is_err() {
        return Err(miette::miette!("extended_types must be true or false"));
    }

    let path = config_path(args.global)?;
    let mut map = read_mapping(&path)?;
    let value = match args.value.parse::<bool>() {
        Ok(b) if args.key == "extended_types" => serde_yml::Value::Bool(b),
        _ => serde_yml::Value::String(args.value.clone()),
    };
    map.insert(serde_yml::Value::String(args.key.clone()), value);
    write_mapping(&path, map)?;

    println!(
        "{} Set {} {} {} in {}",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        path.display()
    );
    Ok(())
}

fn run_unset(args: UnsetArgs) -> Result<()> {
    check_key(&args.key)?;
    let path = config_path(args.global)?;
    if !path.exists() {
        return Err(miette::miette!("Config file does not exist: {}", path.display()));
    }

    let mut map = read_mapping(&path)?;
    if map
        .remove(&serde_yml::Value::String(args.key.clone()))
        .is_none()
    {
        return Err(miette::miette!("Key '{}' not found in {}", args.key, path.display()));
    }
    write_mapping(&path, map)?;

    println!(
        "{} Removed {} from {}",
        style("✓").green(),
        style(&args.key).cyan(),
        path.display()
    );
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", style("Configuration file paths:").bold());
    println!();

    match Config::global_config_path() {
        Some(path) => print_path("Global:", &path),
        None => println!("  {} {}", style("Global:").cyan(), style("(unavailable)").dim()),
    }
    match Config::project_config_path() {
        Some(path) => print_path("Project:", &path),
        None => println!(
            "  {} {}",
            style("Project:").cyan(),
            style(format!("(no {} found)", PROJECT_CONFIG_FILE)).dim()
        ),
    }
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();
    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }
    println!();
    println!(
        "{}",
        style("Use 'modelgen config set <key> <value>' to set a value.").dim()
    );
    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    println!("  {} {}", style(label).cyan(), path.display());
    if path.exists() {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }
}

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "run `modelgen config keys` to list them",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

fn config_path(global: bool) -> Result<PathBuf> {
    if global {
        Config::global_config_path()
            .ok_or_else(|| miette::miette!("Could not determine global config directory"))
    } else {
        Ok(Config::project_config_path().unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE)))
    }
}

fn read_mapping(path: &std::path::Path) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content).into_diagnostic()? {
        serde_yml::Value::Mapping(map) => Ok(map),
        serde_yml::Value::Null => Ok(serde_yml::Mapping::new()),
        _ => Err(miette::miette!("{} is not a mapping", path.display())),
    }
}

fn write_mapping(path: &std::path::Path, map: serde_yml::Mapping) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&serde_yml::Value::Mapping(map)).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "default_renderer" => config.default_renderer.clone(),
        "extended_types" => config.extended_types.map(|b| b.to_string()),
        "css_prefix" => config.css_prefix.clone(),
        "author" => config.author.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}
