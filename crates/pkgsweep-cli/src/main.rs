//! pkgsweep CLI - delete old package versions from GitHub Packages

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;
mod display;
mod error;
mod exit_codes;

use args::SweepArgs;
use error::{CliError, Result};

#[derive(Parser)]
#[command(name = "pkgsweep")]
#[command(author = "pkgsweep Contributors")]
#[command(version)]
#[command(about = "Delete old package versions from GitHub Packages, keeping released ones", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Select package versions by retention policy and delete them
    Delete(SweepArgs),

    /// Show which versions would be deleted, without deleting
    Plan(SweepArgs),
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "debug"
    } else {
        "warn,pkgsweep_core=info,pkgsweep_registry=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(e.to_string()))?;

    runtime.block_on(async {
        match cli.command {
            Commands::Delete(args) => commands::delete::run(args).await,
            Commands::Plan(args) => commands::plan::run(args).await,
        }
    })
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
