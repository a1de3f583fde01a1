use crate::db::executor::{Executor, Transaction, Transactional};
use crate::db::progress::Progress;
use crate::db::protocol::{self, VersionStore};
use crate::db::sql_common::{CREATE_VERSION_TABLE, QUERY_LATEST_VERSION, TABLE_NAME};
use crate::db::{Driver, DriverError, DriverErrorKind, StatementError};
use crate::migration::MigrationFile;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool, Postgres};


/// Migration driver for PostgreSQL.
///
/// Holds a single-connection pool between `initialize` and `close`, so
/// migrations run outside a transaction share one session.
#[derive(Default)]
pub struct PostgresDriver {
    pool: Option<PgPool>,
}

impl PostgresDriver {
    pub fn new() -> Self {
        PostgresDriver { pool: None }
    }

    fn pool(&mut self) -> Result<&mut PgPool, DriverError> {
        self.pool
            .as_mut()
            .ok_or_else(|| DriverError::new(DriverErrorKind::NotInitialized))
    }
}


#[async_trait]
impl Driver for PostgresDriver {
    async fn initialize(&mut self, url: &str) -> Result<(), DriverError> {
        let connection_error = |e: sqlx::Error| DriverError::new(DriverErrorKind::Connection(e));

        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(connection_error)?;

        pool.acquire()
            .await
            .map_err(connection_error)?
            .ping()
            .await
            .map_err(connection_error)?;

        let pool = self.pool.insert(pool);

        tracing::info!("Ensuring table '{TABLE_NAME}' exists...");
        sqlx::query(CREATE_VERSION_TABLE)
            .execute(&*pool)
            .await
            .map_err(|e| DriverError::new(DriverErrorKind::SchemaSetup(e)))?;

        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let pool = self.pool
            .take()
            .ok_or_else(|| DriverError::new(DriverErrorKind::NotInitialized))?;

        pool.close().await;
        tracing::debug!("Connection closed");
        Ok(())
    }

    fn filename_extension(&self) -> &'static str {
        "sql"
    }

    async fn version(&mut self) -> Result<u64, DriverError> {
        protocol::current_version(self.pool()?).await
    }

    async fn migrate(&mut self, file: MigrationFile, progress: Progress) {
        match self.pool() {
            Ok(pool) => protocol::migrate(pool, file, progress).await,
            Err(e) => {
                progress.announce(&file).await;
                progress.fail(e).await;
            }
        }
    }
}


#[async_trait]
impl Executor for PgPool {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), StatementError> {
        // A bare string with no arguments goes over the simple-query
        // protocol, so a file may hold several statements.
        sqlx::Executor::execute(&*self, sql)
            .await
            .map_err(|e| StatementError::from_sqlx(e, sql))?;

        Ok(())
    }

    async fn execute_with_version(&mut self, statement: &'static str, version: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(statement)
            .bind(version)
            .execute(&*self)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Transactional for PgPool {
    type Transaction = sqlx::Transaction<'static, Postgres>;

    async fn begin(&mut self) -> Result<Self::Transaction, sqlx::Error> {
        tracing::info!("Beginning transaction...");
        PgPool::begin(self).await
    }
}

#[async_trait]
impl VersionStore for PgPool {
    async fn latest_version(&mut self) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(QUERY_LATEST_VERSION)
            .fetch_optional(&*self)
            .await
    }
}

#[async_trait]
impl Executor for sqlx::Transaction<'static, Postgres> {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), StatementError> {
        sqlx::Executor::execute(&mut **self, sql)
            .await
            .map_err(|e| StatementError::from_sqlx(e, sql))?;

        Ok(())
    }

    async fn execute_with_version(&mut self, statement: &'static str, version: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(statement)
            .bind(version)
            .execute(&mut **self)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Transaction for sqlx::Transaction<'static, Postgres> {
    async fn commit(self) -> Result<(), sqlx::Error> {
        sqlx::Transaction::commit(self).await
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        sqlx::Transaction::rollback(self).await
    }
}
