//! `modelgen check` command - Lint model files

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::GlobalOpts;
use crate::schema::Linter;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: current directory)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Continue after the first failing file
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

#[derive(Default)]
struct CheckStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let linter = Linter::new()?;
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let files = expand_paths(&paths);
    let verbose = !args.summary && !global.quiet;

    if !global.quiet {
        println!("{} Checking {} file(s)...\n", style("→").blue(), files.len());
    }

    let mut stats = CheckStats::default();
    for path in &files {
        stats.files_checked += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                if verbose {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
                stats.files_failed += 1;
                stats.total_errors += 1;
                if !args.keep_going {
                    break;
                }
                continue;
            }
        };

        match linter.lint(&content, &path.display().to_string()) {
            Ok(()) => {
                stats.files_passed += 1;
                if verbose {
                    println!("{} {}", style("✓").green(), path.display());
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += e.violation_count();
                if verbose {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        path.display(),
                        e.violation_count()
                    );
                    println!("{:?}", miette::Report::new(e));
                }
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    if !global.quiet {
        println!();
        println!("{}", style("─".repeat(60)).dim());
        println!("{}", style("Check Summary").bold());
        println!("{}", style("─".repeat(60)).dim());
        println!("  Files checked:  {}", style(stats.files_checked).cyan());
        println!("  Files passed:   {}", style(stats.files_passed).green());
        println!("  Files failed:   {}", style(stats.files_failed).red());
        println!("  Total errors:   {}", style(stats.total_errors).red());
        println!();
    }

    match stats.files_failed {
        0 => {
            if !global.quiet {
                println!("{} All models passed!", style("✓").green().bold());
            }
            Ok(())
        }
        1 => Err(miette::miette!("Check failed: 1 file has errors")),
        n => Err(miette::miette!("Check failed: {} files have errors", n)),
    }
}

fn is_model_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Expand directories into the model files below them, skipping hidden entries
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| {
                    let name = e.file_name().to_string_lossy();
                    !name.starts_with('.') || e.depth() == 0
                })
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if is_model_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            // named files are checked whatever their extension, so typos surface as read errors
            files.push(path.clone());
        }
    }

    files.sort();
    files
}
