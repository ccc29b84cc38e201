#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use commands::ConfigArgs;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pnpm-resolve")]
#[command(author, version, about = "Resolve bare imports across workspace, hoisted, and store node_modules", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve one or more bare specifiers to entry files
    Resolve {
        /// Specifiers to resolve (e.g. "react", "@scope/pkg")
        #[arg(required = true)]
        specifiers: Vec<String>,

        /// File the imports come from (diagnostics only; omit for entry points)
        #[arg(long, value_name = "PATH")]
        importer: Option<String>,

        /// Include the step-by-step resolution trace
        #[arg(long)]
        trace: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show the effective search paths and how each is searched
    Paths {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Version => commands::version::run(),
        Commands::Paths { config } => {
            logging::init(cli.verbose, cli.json);
            commands::paths::run(&cwd, &config, cli.json)
        }
        Commands::Resolve {
            specifiers,
            importer,
            trace,
            config,
        } => {
            logging::init(cli.verbose, cli.json);
            let action = commands::resolve::ResolveAction {
                specifiers,
                importer,
                trace,
            };
            commands::resolve::run(&cwd, &config, action, cli.json)
        }
    }
}
