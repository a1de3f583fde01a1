use crate::db::StatementError;

use async_trait::async_trait;


/// Anything migration SQL can run against: a plain connection or an open
/// transaction.
#[async_trait]
pub trait Executor: Send {
    /// Run `sql` as one multi-statement batch.
    async fn execute_batch(&mut self, sql: &str) -> Result<(), StatementError>;

    /// Run a statement whose single `$1` parameter is a version number.
    /// Returns the number of rows affected.
    async fn execute_with_version(&mut self, statement: &'static str, version: i64) -> Result<u64, sqlx::Error>;
}

/// An open transaction; consumed by either outcome.
#[async_trait]
pub trait Transaction: Executor + Sized {
    async fn commit(self) -> Result<(), sqlx::Error>;
    async fn rollback(self) -> Result<(), sqlx::Error>;
}

/// A connection that can also open transactions.
#[async_trait]
pub trait Transactional: Executor {
    type Transaction: Transaction;

    async fn begin(&mut self) -> Result<Self::Transaction, sqlx::Error>;
}
