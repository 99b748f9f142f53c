//! Postdrop CLI - Run and configure the ingest handler from a terminal.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use postdrop_handler::{init_logging, LogFormat};

/// Postdrop - fetch a JSON resource and drop it into object storage
#[derive(Parser)]
#[command(name = "postdrop")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Fetch a JSON resource and drop it into object storage", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default config file
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Run the handler once, as the function runtime would
    Invoke {
        /// Store into an in-memory bucket instead of S3
        #[arg(long)]
        memory: bool,

        /// Trigger event as JSON (ignored by the handler)
        #[arg(short, long)]
        event: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., storage.bucket)
        key: String,

        /// Value to set
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(LogFormat::Terminal, cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(),
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value),
        },
        Commands::Invoke { memory, event } => commands::invoke::run(memory, event),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
