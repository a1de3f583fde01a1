use pgmigrate::DriverError;
use pgmigrate::migration::FileError;

use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use tracing::subscriber::SetGlobalDefaultError;


#[derive(Debug)]
pub struct CliError {
    pub kind: CliErrorKind
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CliError: {}", self.kind)
    }
}

impl Error for CliError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum CliErrorKind {
    Driver(DriverError),
    File(FileError),
    /// The migration ran but reported errors on its progress channel.
    MigrationFailed { version: u64, errors: Vec<DriverError> },
    SetGlobalDefault(SetGlobalDefaultError),
    WrongExtension { path: PathBuf, expected: &'static str },
}

impl fmt::Display for CliErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(error) => write!(f, "{}", error.kind),
            Self::File(error) => write!(f, "{}", error.kind),
            Self::MigrationFailed { version, errors } => {
                write!(f, "Migration {version} failed")?;
                for error in errors {
                    write!(f, "\n{}", error.kind)?;
                }
                Ok(())
            }
            Self::SetGlobalDefault(error) => write!(f, "Failed to set global default subscriber: {}", error),
            Self::WrongExtension { path, expected } => write!(f, "Expected a '.{expected}' file: '{path:?}'"),
        }
    }
}

impl Error for CliErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Driver(source) => Some(source),
			Self::File(source) => Some(source),
			Self::MigrationFailed { errors, .. } => errors.first().map(|e| e as &(dyn Error + 'static)),
			Self::SetGlobalDefault(source) => Some(source),
			_ => None,
		}
	}
}

impl From<DriverError> for CliError {
    fn from(error: DriverError) -> Self {
        CliError { kind: CliErrorKind::Driver(error) }
    }
}

impl From<FileError> for CliError {
    fn from(error: FileError) -> Self {
        CliError { kind: CliErrorKind::File(error) }
    }
}

impl From<SetGlobalDefaultError> for CliError {
    fn from(error: SetGlobalDefaultError) -> Self {
        CliError { kind: CliErrorKind::SetGlobalDefault(error) }
    }
}
