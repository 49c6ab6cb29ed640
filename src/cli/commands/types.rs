//! `modelgen types` command - List element types

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, Model};
use crate::types::catalog;

#[derive(clap::Args, Debug)]
pub struct TypesArgs {
    /// Include the extended types even when they are disabled in config
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: TypesArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let show_extended = args.all || config.extended_types();

    if !global.quiet {
        println!("{:<16} {:<10} {}", "TYPE", "SET", "DEFAULT ATTRIBUTES");
        println!("{}", "-".repeat(70));
    }

    let mut model = Model::default();
    crate::types::define_defaults(&mut model);
    crate::types::define_extended(&mut model);

    for (name, extended) in catalog() {
        if extended && !show_extended {
            continue;
        }
        if global.quiet {
            println!("{}", name);
            continue;
        }
        let attributes = model
            .gen_element_type(name)
            .map(|e| {
                e.attributes
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let set = if extended { "extended" } else { "default" };
        println!("{:<16} {:<10} {}", name, style(set).dim(), attributes);
    }

    if !global.quiet && !show_extended {
        println!("\nUse 'modelgen types --all' to include the extended types");
    }
    Ok(())
}
