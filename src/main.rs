use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dtsbundle::cli::{Output, commands};
use dtsbundle::pipeline::{RunOptions, Stage};

#[derive(Parser)]
#[command(name = "dtsbundle")]
#[command(
    version,
    about = "Bundle TypeScript declaration trees and generate API documentation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file used instead of ./dtsbundle.toml
    #[arg(long, short, global = true, env = "DTSBUNDLE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run bundle, fetch and docs stages in order
    Run {
        #[arg(long, help = "Skip bundling the type declarations")]
        skip_types: bool,
        #[arg(long, help = "Skip fetching library modules")]
        skip_modules: bool,
        #[arg(long, help = "Skip generating documentation")]
        skip_docs: bool,
    },

    /// Flatten the declaration tree into one file
    Bundle,

    /// Fetch library sources from the latest release tag
    Fetch,

    /// Generate Markdown, help pages and index from the bundle
    Docs,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json, yaml"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdtsbundle encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let out = Output::quiet(cli.quiet);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            skip_types,
            skip_modules,
            skip_docs,
        } => {
            let options = RunOptions {
                skip_types,
                skip_modules,
                skip_docs,
            };
            commands::run::run(config, options, &out)?;
        }
        Commands::Bundle => commands::run::stage(config, Stage::Bundle, &out)?,
        Commands::Fetch => commands::run::stage(config, Stage::Fetch, &out)?,
        Commands::Docs => commands::run::stage(config, Stage::Docs, &out)?,
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                commands::config::show(config, global, &format)?;
            }
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force, &out)?;
            }
        },
    }

    Ok(())
}
