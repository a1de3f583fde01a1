use std::error::Error;
use std::fmt;
use std::path::PathBuf;


#[derive(Debug)]
pub struct FileError {
    pub kind: FileErrorKind
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileError: {}", self.kind)
    }
}

impl Error for FileError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum FileErrorKind {
    InvalidFileName(PathBuf),
    InvalidVersionNumber(String),
    MissingDirection(PathBuf),
    Io { path: PathBuf, source: std::io::Error },
    Utf8 { path: PathBuf, source: std::str::Utf8Error },
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileName(path) => write!(f, "Invalid migration file name: '{path:?}'"),
            Self::InvalidVersionNumber(version) => write!(f, "Invalid version number: '{version}'"),
            Self::MissingDirection(path) => write!(f, "Migration file name has no 'up' or 'down' segment: '{path:?}'"),
            Self::Io { path, .. } => write!(f, "Failed to read file: '{path:?}'"),
            Self::Utf8 { path, .. } => write!(f, "File is not valid UTF-8: '{path:?}'"),
        }
    }
}

impl Error for FileErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			Self::Utf8 { source, .. } => Some(source),
			_ => None,
		}
	}
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn file_error_display_formats_correctly() {
        let path = PathBuf::from("/tmp/0001_init.sql");
        let cases: Vec<(FileErrorKind, &str)> = vec![
            (FileErrorKind::InvalidFileName(path.clone()), "Invalid migration file name"),
            (FileErrorKind::InvalidVersionNumber("abc".into()), "Invalid version number: 'abc'"),
            (FileErrorKind::MissingDirection(path.clone()), "no 'up' or 'down'"),
            (
                FileErrorKind::Io { path, source: io::Error::new(io::ErrorKind::NotFound, "gone") },
                "Failed to read file",
            ),
        ];

        for (kind, expect) in cases {
            let text = kind.to_string();
            assert!(text.contains(expect), "Expected `{}` in `{}`", expect, text);
        }
    }

    #[test]
    fn io_source_is_accessible() {
        let kind = FileErrorKind::Io {
            path: PathBuf::from("/tmp/x.up.sql"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(kind.source().unwrap().to_string().contains("permission denied"));
    }
}
