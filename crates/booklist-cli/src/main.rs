use std::path::PathBuf;

use booklist_core::error::Result;
use booklist_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "booklist", version, about = "Booklist CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reading list once and exit
    Show {
        /// Seed file (.toml or .json) to import before rendering
        #[arg(long)]
        seed: Option<PathBuf>,
        /// Print books and stats as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive session reading commands from stdin
    Session {
        /// Seed file (.toml or .json) to import at startup
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Show { seed, json } => {
            let list = commands::initial_booklist(seed.as_deref(), &config)?;
            commands::show::print_booklist(&list, &config, json)
        }
        Commands::Session { seed } => {
            let list = commands::initial_booklist(seed.as_deref(), &config)?;
            let stdin = std::io::stdin();
            let mut session =
                commands::session::Session::new(list, config.display.clone(), std::io::stdout().lock());
            session.run(stdin.lock())?;
            tracing::info!(books = session.booklist().total_count(), "session ended");
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    if let Err(e) = run(cli, config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
