mod direction;
mod error;
pub mod position;

pub use direction::MigrationDirection;
pub use error::{FileError, FileErrorKind};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};


/// A single migration script for one version and one direction.
///
/// The SQL text is not read until [`MigrationFile::read_content`] is called.
#[derive(Clone, Debug, Serialize)]
pub struct MigrationFile {
    pub version: u64,
    pub name: String,
    pub direction: MigrationDirection,
    pub path: PathBuf,
    #[serde(skip)]
    content: Option<Vec<u8>>,
}

impl MigrationFile {
    pub fn new(version: u64, name: &str, direction: MigrationDirection, path: PathBuf) -> Self {
        MigrationFile { version, name: name.to_string(), direction, path, content: None }
    }

    /// Build a file whose content is already in memory.
    pub fn with_content(
        version: u64,
        name: &str,
        direction: MigrationDirection,
        content: impl Into<Vec<u8>>
    ) -> Self {
        let file_name = format!("{version}_{name}.{}.sql", direction.suffix());
        MigrationFile {
            version,
            name: name.to_string(),
            direction,
            path: PathBuf::from(file_name),
            content: Some(content.into()),
        }
    }

    /// Parse a path named like `0003_add_users.up.sql`.
    ///
    /// The `_<name>` part is optional; the extension is not checked here.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        let invalid = || FileError { kind: FileErrorKind::InvalidFileName(path.to_path_buf()) };

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?;

        let mut parts = file_name.rsplitn(3, '.');
        let (Some(_extension), Some(suffix), Some(stem)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let direction = MigrationDirection::from_suffix(suffix).ok_or_else(|| FileError {
            kind: FileErrorKind::MissingDirection(path.to_path_buf()),
        })?;

        let (version, name) = stem.split_once('_').unwrap_or((stem, ""));
        let version = version.parse::<u64>().map_err(|_| FileError {
            kind: FileErrorKind::InvalidVersionNumber(version.to_string()),
        })?;

        Ok(MigrationFile::new(version, name, direction, path.to_path_buf()))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Load the SQL text from disk, unless it is already loaded.
    pub fn read_content(&mut self) -> Result<&[u8], FileError> {
        if self.content.is_none() {
            let bytes = fs::read(&self.path).map_err(|source| FileError {
                kind: FileErrorKind::Io { path: self.path.clone(), source },
            })?;
            tracing::debug!("Read {} bytes from '{}'", bytes.len(), self.path.display());
            self.content = Some(bytes);
        }

        Ok(self.content.as_deref().unwrap_or_default())
    }

    /// Load the content and check that it is valid UTF-8 SQL text.
    pub fn read_sql(&mut self) -> Result<&str, FileError> {
        self.read_content()?;
        let bytes = self.content.as_deref().unwrap_or_default();

        std::str::from_utf8(bytes).map_err(|source| FileError {
            kind: FileErrorKind::Utf8 { path: self.path.clone(), source },
        })
    }
}
