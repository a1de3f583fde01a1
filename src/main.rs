mod cli;

use clap::Parser;
use cli::{commands, output, ux};
use pgmigrate::Registry;


/// Entry point for the pgmigrate CLI.
///
/// - `peck`: verify connectivity and create the version table.
/// - `version`: print the latest applied version.
/// - `apply <FILE>`: run one migration file up or down.
///
/// `--db` (or `DB_CONNECTION_STRING`) selects the driver by URL scheme.
#[tokio::main]
async fn main() {
    let args: cli::Cli = cli::Cli::parse();

    if let Err(e) = ux::setup_logging(args.verbose, args.quiet, args.json) {
        eprintln!("{}", cli::error::CliError::from(e));
        std::process::exit(1);
    }

    let registry = Registry::with_defaults();
    let command_name = args.command.to_string();
    let result = commands::run(&registry, &args.db_connection_string, args.command).await;
    let failed = result.is_err();

    if args.json {
        let output = output::CliOutput::from_result(command_name, result);
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize output: {e}");
                std::process::exit(1);
            }
        }
    } else {
        ux::render_human_output(&command_name, &result);
    }

    if failed {
        std::process::exit(1);
    }
}
