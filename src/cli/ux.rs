use crate::cli::error::CliError;
use pgmigrate::Event;

use tracing::subscriber::SetGlobalDefaultError;


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), SetGlobalDefaultError> {
    if json {
        // Mute all logging if JSON output is enabled
        return tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// One line per progress event, as shown to a human.
pub fn describe_event(event: &Event) -> String {
    match event {
        Event::File(file) => format!(
            "{} {} '{}'",
            file.direction.noun(),
            file.version,
            file.file_name(),
        ),
        Event::Error(error) => format!("{}", error.kind),
    }
}

pub fn render_human_output(command: &str, result: &Result<serde_json::Value, CliError>) {
    match result {
        Ok(data) => {
            println!("{command}: {data}");
            tracing::info!("Done 🐘");
        }
        Err(e) => eprintln!("{command} failed: {}", e.kind),
    }
}
