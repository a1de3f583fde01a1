use crate::db::executor::{Executor, Transaction, Transactional};
use crate::db::progress::Progress;
use crate::db::sql_common::{DELETE_VERSION, INSERT_VERSION, NO_TRANSACTION_MARKER};
use crate::db::{DriverError, DriverErrorKind, TransactionStage};
use crate::migration::{MigrationDirection, MigrationFile};

use async_trait::async_trait;


/// Read access to the version table.
#[async_trait]
pub trait VersionStore: Send {
    async fn latest_version(&mut self) -> Result<Option<i64>, sqlx::Error>;
}

/// Current schema version; an empty table is version 0.
pub async fn current_version<S: VersionStore + ?Sized>(store: &mut S) -> Result<u64, DriverError> {
    let version = store
        .latest_version()
        .await
        .map_err(|e| DriverError::new(DriverErrorKind::Query(e)))?;

    match version {
        None => Ok(0),
        Some(v) => u64::try_from(v)
            .map_err(|_| DriverError::new(DriverErrorKind::InvalidVersion(v.to_string()))),
    }
}

pub fn can_use_transaction(sql: &str) -> bool {
    !sql.starts_with(NO_TRANSACTION_MARKER)
}

/// Apply one migration file against `conn`, reporting on `progress`.
///
/// The file is announced first, followed by any errors. `progress` is
/// consumed, so the channel closes when this returns.
pub async fn migrate<C: Transactional>(conn: &mut C, mut file: MigrationFile, progress: Progress) {
    progress.announce(&file).await;

    let sql = match file.read_sql() {
        Ok(sql) => sql.to_string(),
        Err(e) => {
            progress.fail(e.into()).await;
            return;
        }
    };

    tracing::info!("{} to version {} ('{}')...", file.direction.verb(), file.version, file.file_name());

    if !can_use_transaction(&sql) {
        tracing::warn!("Running '{}' outside a transaction; a failure needs manual cleanup", file.file_name());
        if let Err(e) = execute(conn, &file, &sql).await {
            progress.fail(e).await;
        }
        return;
    }

    let mut tx = match conn.begin().await {
        Ok(tx) => tx,
        Err(source) => {
            progress.fail(transaction_error(TransactionStage::Begin, source)).await;
            return;
        }
    };

    if let Err(e) = execute(&mut tx, &file, &sql).await {
        progress.fail(e).await;

        tracing::info!("Rolling back transaction...");
        if let Err(source) = tx.rollback().await {
            progress.fail(transaction_error(TransactionStage::Rollback, source)).await;
        }
        return;
    }

    match tx.commit().await {
        Ok(()) => tracing::info!("{} {} committed", file.direction.noun(), file.version),
        Err(source) => progress.fail(transaction_error(TransactionStage::Commit, source)).await,
    }
}

/// Run the migration SQL, then record the version change on the same executor.
async fn execute<E: Executor + ?Sized>(
    executor: &mut E,
    file: &MigrationFile,
    sql: &str
) -> Result<(), DriverError> {
    let version = i64::try_from(file.version)
        .map_err(|_| DriverError::new(DriverErrorKind::InvalidVersion(file.version.to_string())))?;

    executor
        .execute_batch(sql)
        .await
        .map_err(|e| e.into_driver_error(sql.as_bytes()))?;

    // If this fails outside a transaction the script has already run;
    // stop here so no later migration is applied on top of it.
    let statement = match file.direction {
        MigrationDirection::Up => INSERT_VERSION,
        MigrationDirection::Down => DELETE_VERSION,
    };
    let rows = executor
        .execute_with_version(statement, version)
        .await
        .map_err(|source| DriverError::new(DriverErrorKind::VersionRecord { version: file.version, source }))?;

    tracing::debug!("Version table updated for {} ({rows} row(s))", file.version);
    Ok(())
}

fn transaction_error(stage: TransactionStage, source: sqlx::Error) -> DriverError {
    DriverError::new(DriverErrorKind::Transaction { stage, source })
}
