use clap::Parser;
use miette::Result;
use modelgen::cli::{commands, Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(&global);

    match cli.command {
        Commands::Render(args) => commands::render::run(args, &global),
        Commands::Check(args) => commands::check::run(args, &global),
        Commands::Inspect(args) => commands::inspect::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args, &global),
        Commands::Model(args) => commands::model::run(args, &global),
        Commands::Types(args) => commands::types::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Log to stderr; `--verbose` wins over MODELGEN_LOG, which wins over RUST_LOG
fn init_tracing(global: &GlobalOpts) {
    let filter = if global.verbose {
        EnvFilter::new("modelgen=debug")
    } else {
        EnvFilter::try_from_env("MODELGEN_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
