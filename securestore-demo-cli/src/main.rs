//! securestore demo CLI
//!
//! Command-line interface for poking at a credential vault through the
//! secret store facade.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "securestore-demo")]
#[command(about = "securestore demo CLI - store and read secrets in the OS credential vault", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Vault scope the secrets live under (overrides the config file)
    #[arg(long, global = true, env = "SECURESTORE_RESOURCE")]
    resource: Option<String>,

    /// Store configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a throwaway in-memory vault instead of the OS vault
    #[arg(long, global = true)]
    memory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the secret stored under a key
    Get {
        /// Secret key
        key: String,

        /// Print this instead of failing when the key is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Store a secret, replacing any existing value
    Set {
        /// Secret key
        key: String,

        /// Secret value (prompted for without echo when omitted)
        value: Option<String>,
    },

    /// Delete the secret stored under a key
    Delete {
        /// Secret key
        key: String,
    },

    /// Check whether a secret is stored under a key
    Has {
        /// Secret key
        key: String,
    },

    /// List the keys stored in the scope
    List,

    /// Delete every secret in the scope
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the vault backend and store configuration
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `get` output stays pipeable
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("securestore_demo_cli=debug,securestore_lib=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("securestore_demo_cli=info,securestore_lib=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = commands::load_config(cli.config.as_deref(), cli.resource.as_deref())?;
    let store = commands::open_store(config, cli.memory)?;
    tracing::debug!(
        backend = store.vault().backend_name(),
        resource = store.resource(),
        "opened secret store"
    );

    match cli.command {
        Commands::Get { key, default } => {
            commands::secret::get(&store, &key, default.as_deref())?;
        }
        Commands::Set { key, value } => {
            commands::secret::set(&store, &key, value)?;
        }
        Commands::Delete { key } => {
            commands::secret::delete(&store, &key)?;
        }
        Commands::Has { key } => {
            commands::secret::has(&store, &key)?;
        }
        Commands::List => {
            commands::secret::list(&store)?;
        }
        Commands::Clear { yes } => {
            commands::secret::clear(&store, yes)?;
        }
        Commands::Info => {
            commands::info::run(&store, cli.memory, cli.verbose)?;
        }
    }

    Ok(())
}
