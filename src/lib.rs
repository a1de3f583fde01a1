pub mod db;
pub mod migration;

pub use db::{apply, Driver, DriverError, DriverErrorKind, Event, PostgresDriver, Registry};
pub use migration::{MigrationDirection, MigrationFile};
