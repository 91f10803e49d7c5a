//! # I/O Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  IoError (this module) ← Adds the path that failed                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in llano-app) ← Serialized for the caller                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// File and CSV errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory could not be created or written.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid CSV.
    ///
    /// ## When This Occurs
    /// - Invalid UTF-8 in a cell
    /// - Unterminated quoted field
    #[error("Failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// Record could not be encoded.
    #[error("Failed to encode {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },
}

impl IoError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }

    /// Maps a csv error, keeping underlying I/O failures as I/O failures.
    pub(crate) fn from_csv_read(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if err.is_io_error() {
            if let csv::ErrorKind::Io(source) = err.into_kind() {
                return IoError::Read { path, source };
            }
            return IoError::CsvParse {
                path,
                message: "I/O error".to_string(),
            };
        }
        IoError::CsvParse {
            path,
            message: err.to_string(),
        }
    }

    pub(crate) fn from_csv_write(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        IoError::CsvWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type for file operations.
pub type IoResult<T> = Result<T, IoError>;
