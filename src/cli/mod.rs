pub mod commands;
pub mod error;
pub mod output;
pub mod ux;

use clap::{Parser, Subcommand};

use std::path::PathBuf;


#[derive(Parser)]
#[command(name = "pgmigrate", version, about = "Apply versioned SQL migrations to PostgreSQL, one file at a time.")]
pub struct Cli {
    #[arg(
        long = "db",
        help = "Database connection URL. The scheme selects the driver, e.g.:
    postgres://<username>:<password>@<host>:<port>/<database>\n",
        env = "DB_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub db_connection_string: String,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test connection to the database and create the version table if missing.")]
    Peck {},

    #[command(about = "Print the latest applied migration version (0 if none).")]
    Version {},

    #[command(about = "Apply a single migration file named like '<VERSION>_<NAME>.<up|down>.sql'.
A file whose first line is '-- migrate: no-transaction' runs outside a transaction.")]
    Apply {
        #[arg(help = "Path to the migration file.")]
        file: PathBuf,
    },
}

impl std::fmt::Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Commands::Peck { .. } => "peck",
            Commands::Version { .. } => "version",
            Commands::Apply { .. } => "apply",
        };
        write!(f, "{name}")
    }
}
