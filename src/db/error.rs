use crate::migration::FileError;

use std::error::Error;
use std::fmt;


#[derive(Debug)]
#[non_exhaustive]
pub struct DriverError {
    pub kind: DriverErrorKind
}

impl DriverError {
    pub fn new(kind: DriverErrorKind) -> Self {
        DriverError { kind }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DriverError: {}", self.kind)
    }
}

impl Error for DriverError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionStage {
    Begin,
    Commit,
    Rollback,
}

impl fmt::Display for TransactionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Begin => "begin",
            Self::Commit => "commit",
            Self::Rollback => "roll back",
        };
        write!(f, "{stage}")
    }
}

#[derive(Debug)]
pub enum DriverErrorKind {
    Connection(sqlx::Error),
    /// Database-reported failure of the migration SQL, already rendered
    /// with its position and surrounding lines when available.
    Execution(String),
    InvalidVersion(String),
    NotInitialized,
    Query(sqlx::Error),
    Read(FileError),
    SchemaSetup(sqlx::Error),
    /// Migration SQL failed without a structured database error.
    Statement(sqlx::Error),
    Transaction { stage: TransactionStage, source: sqlx::Error },
    UnsupportedScheme(String),
    VersionRecord { version: u64, source: sqlx::Error },
}

impl fmt::Display for DriverErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "Connection failed: {e}"),
            Self::Execution(message) => write!(f, "{message}"),
            Self::InvalidVersion(version) => write!(f, "Invalid version: '{version}'"),
            Self::NotInitialized => write!(f, "Driver has no open connection"),
            Self::Query(e) => write!(f, "Failed to query current version: {e}"),
            Self::Read(e) => write!(f, "{}", e.kind),
            Self::SchemaSetup(e) => write!(f, "Failed to create version table: {e}"),
            Self::Statement(e) => write!(f, "Migration failed: {e}"),
            Self::Transaction { stage, source } => write!(f, "Failed to {stage} transaction: {source}"),
            Self::UnsupportedScheme(scheme) => write!(f, "No driver registered for scheme: '{scheme}'"),
            Self::VersionRecord { version, source } => write!(f, "Failed to record version {version}: {source}"),
        }
    }
}

impl Error for DriverErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Connection(source) => Some(source),
			Self::Query(source) => Some(source),
			Self::Read(source) => Some(source),
			Self::SchemaSetup(source) => Some(source),
			Self::Statement(source) => Some(source),
			Self::Transaction { source, .. } => Some(source),
			Self::VersionRecord { source, .. } => Some(source),
			_ => None,
		}
	}
}

impl From<FileError> for DriverError {
    fn from(error: FileError) -> Self {
        DriverError { kind: DriverErrorKind::Read(error) }
    }
}
