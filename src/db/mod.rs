mod error;
mod executor;
mod fault;
mod postgres;
pub mod progress;
pub mod protocol;
mod registry;
pub mod sql_common;

pub use error::{DriverError, DriverErrorKind, TransactionStage};
pub use executor::{Executor, Transaction, Transactional};
pub use fault::{DatabaseFault, StatementError};
pub use postgres::PostgresDriver;
pub use progress::{Event, Progress, ProgressReceiver};
pub use registry::{DriverFactory, Registry};

use crate::migration::MigrationFile;

use async_trait::async_trait;


/// A database backend able to apply migration files and track their versions.
#[async_trait]
pub trait Driver: Send {
    /// Connect to `url` and make sure the version table exists.
    async fn initialize(&mut self, url: &str) -> Result<(), DriverError>;
    async fn close(&mut self) -> Result<(), DriverError>;
    /// Extension of the migration files this driver runs, without the dot.
    fn filename_extension(&self) -> &'static str;
    /// Highest applied version, or 0 when nothing was applied.
    async fn version(&mut self) -> Result<u64, DriverError>;
    /// Apply `file`, reporting on `progress`: the file first, then any
    /// errors. The channel is closed once this returns.
    async fn migrate(&mut self, file: MigrationFile, progress: Progress);
}

/// Run one migration while draining its progress channel.
/// Returns every event in the order it was reported.
pub async fn apply<D: Driver + ?Sized>(driver: &mut D, file: MigrationFile) -> Vec<Event> {
    let (progress, rx) = progress::channel();
    let ((), events) = tokio::join!(driver.migrate(file, progress), progress::collect(rx));
    events
}
