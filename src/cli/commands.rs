use crate::cli::error::{CliError, CliErrorKind};
use crate::cli::{ux, Commands};
use pgmigrate::{db, Driver, Event, MigrationFile, Registry};

use serde_json::json;
use std::path::Path;


pub async fn run(
    registry: &Registry,
    db_connection_string: &str,
    command: Commands
) -> Result<serde_json::Value, CliError> {
    match command {
        Commands::Peck {} => peck(registry, db_connection_string).await,
        Commands::Version {} => version(registry, db_connection_string).await,
        Commands::Apply { file } => apply(registry, db_connection_string, &file).await,
    }
}

/// Picks the driver for the URL's scheme and initializes it.
async fn connect(registry: &Registry, url: &str) -> Result<Box<dyn Driver>, CliError> {
    let mut driver = registry.driver_for_url(url)?;
    driver.initialize(url).await?;
    Ok(driver)
}

/// Ensures the database is reachable and the version table exists.
pub async fn peck(registry: &Registry, url: &str) -> Result<serde_json::Value, CliError> {
    tracing::info!("Pecking database...");
    let mut driver = connect(registry, url).await?;
    driver.close().await?;
    tracing::info!("Pecking successful");

    Ok(json!({ "connected": true }))
}

pub async fn version(registry: &Registry, url: &str) -> Result<serde_json::Value, CliError> {
    let mut driver = connect(registry, url).await?;
    let version = driver.version().await;
    driver.close().await?;

    let version = version?;
    tracing::info!("Current version: {version}");
    Ok(json!({ "version": version }))
}

/// Applies one migration file and fails if the driver reported any error.
pub async fn apply(registry: &Registry, url: &str, path: &Path) -> Result<serde_json::Value, CliError> {
    let file = MigrationFile::from_path(path)?;

    let mut driver = registry.driver_for_url(url)?;
    let expected = driver.filename_extension();
    if path.extension().and_then(|e| e.to_str()) != Some(expected) {
        return Err(CliError { kind: CliErrorKind::WrongExtension { path: path.to_path_buf(), expected } });
    }
    driver.initialize(url).await?;

    let version = file.version;
    let direction = file.direction;
    let events = db::apply(driver.as_mut(), file).await;

    let mut errors = Vec::new();
    for event in events {
        match event {
            Event::File(_) => tracing::info!("{}", ux::describe_event(&event)),
            Event::Error(error) => errors.push(error),
        }
    }

    driver.close().await?;

    if !errors.is_empty() {
        return Err(CliError { kind: CliErrorKind::MigrationFailed { version, errors } });
    }

    tracing::info!("{} {version} applied", direction.noun());
    Ok(json!({ "version": version, "direction": direction }))
}
