use crate::db::{DriverError, DriverErrorKind};
use crate::migration::position::{line_column_from_offset, lines_before_and_after};

use sqlx::postgres::{PgDatabaseError, PgErrorPosition, PgSeverity};

/// Lines of SQL shown on each side of a failing line.
const CONTEXT_LINES: usize = 5;


/// The structured parts of an error reported by the database server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseFault {
    pub severity: String,
    pub code: String,
    pub message: String,
    /// 0-based byte offset into the executed SQL text.
    pub offset: Option<usize>,
}

impl DatabaseFault {
    /// Extract the fault from a Postgres error raised while running `sql`.
    pub fn from_pg(error: &PgDatabaseError, sql: &str) -> Self {
        Self::from_parts(error.severity(), error.code(), error.message(), error.position(), sql)
    }

    fn from_parts(
        severity: PgSeverity,
        code: &str,
        message: &str,
        position: Option<PgErrorPosition<'_>>,
        sql: &str
    ) -> Self {
        let offset = match position {
            Some(PgErrorPosition::Original(position)) => char_position_to_offset(sql, position),
            // Points into a query generated by the server, not into `sql`.
            Some(PgErrorPosition::Internal { .. }) | None => None,
        };

        DatabaseFault {
            severity: severity_name(severity).to_string(),
            code: code.to_string(),
            message: message.to_string(),
            offset,
        }
    }

    /// Render the fault, citing line, column and surrounding lines of `sql`
    /// when the offset is known.
    pub fn describe(&self, sql: &[u8]) -> String {
        let DatabaseFault { severity, code, message, offset } = self;

        match offset {
            Some(offset) => {
                let (line, column) = line_column_from_offset(sql, *offset);
                let context = lines_before_and_after(sql, line, CONTEXT_LINES, CONTEXT_LINES);
                format!("{severity} {code}: {message} in line {line}, column {column}:\n\n{context}")
            }
            None => format!("{severity} {code}: {message}"),
        }
    }
}

/// The severity as Postgres spells it on the wire.
fn severity_name(severity: PgSeverity) -> &'static str {
    match severity {
        PgSeverity::Panic => "PANIC",
        PgSeverity::Fatal => "FATAL",
        PgSeverity::Error => "ERROR",
        PgSeverity::Warning => "WARNING",
        PgSeverity::Notice => "NOTICE",
        PgSeverity::Debug => "DEBUG",
        PgSeverity::Info => "INFO",
        PgSeverity::Log => "LOG",
    }
}

/// Postgres reports 1-based character positions; 0 means "no position".
fn char_position_to_offset(sql: &str, position: usize) -> Option<usize> {
    let index = position.checked_sub(1)?;
    sql.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(sql.len()))
        .nth(index)
}


/// Failure of a migration's SQL batch.
#[derive(Debug)]
pub enum StatementError {
    Database(DatabaseFault),
    Other(sqlx::Error),
}

impl StatementError {
    pub fn from_sqlx(error: sqlx::Error, sql: &str) -> Self {
        let fault = error
            .as_database_error()
            .and_then(|e| e.try_downcast_ref::<PgDatabaseError>())
            .map(|pg| DatabaseFault::from_pg(pg, sql));

        match fault {
            Some(fault) => Self::Database(fault),
            None => Self::Other(error),
        }
    }

    pub fn into_driver_error(self, sql: &[u8]) -> DriverError {
        match self {
            Self::Database(fault) => DriverError::new(DriverErrorKind::Execution(fault.describe(sql))),
            Self::Other(error) => DriverError::new(DriverErrorKind::Statement(error)),
        }
    }
}
