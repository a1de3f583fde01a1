use crate::cli::error::{CliError, CliErrorKind};
use serde::Serialize;


#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CliErrorJson {
    Driver { message: String },
    File { message: String },
    MigrationFailed { version: u64, errors: Vec<String> },
    Logging { message: String },
    WrongExtension { message: String },
}

impl From<&CliError> for CliErrorJson {
    fn from(e: &CliError) -> Self {
        let message = e.kind.to_string();

        match &e.kind {
            CliErrorKind::Driver(_) => Self::Driver { message },
            CliErrorKind::File(_) => Self::File { message },
            CliErrorKind::MigrationFailed { version, errors } => Self::MigrationFailed {
                version: *version,
                errors: errors.iter().map(|e| e.kind.to_string()).collect(),
            },
            CliErrorKind::SetGlobalDefault(_) => Self::Logging { message },
            CliErrorKind::WrongExtension { .. } => Self::WrongExtension { message },
        }
    }
}


#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CliStatus {
    Success,
    Error,
}

#[derive(Serialize)]
pub struct CliOutput<T: Serialize> {
    pub command: String,
    pub status: CliStatus,
    pub data: Option<T>,
    pub error: Option<CliErrorJson>,
}

impl<T: Serialize> CliOutput<T> {
    pub fn from_result(command: String, result: Result<T, CliError>) -> Self {
        match result {
            Ok(data) => CliOutput {
                command,
                status: CliStatus::Success,
                data: Some(data),
                error: None,
            },
            Err(e) => CliOutput {
                command,
                status: CliStatus::Error,
                data: None,
                error: Some(CliErrorJson::from(&e)),
            },
        }
    }
}
