use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for row counting operations.
#[derive(Error, Debug)]
pub enum RowCountError {
    /// The input file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file was opened but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input has no lines, so not even a header.
    #[error("empty file: no header line to read")]
    EmptyData,

    /// The requested column is not in the header.
    #[error("column not found in header: {0:?}")]
    ColumnNotFound(String),

    /// CSV error while writing extracted values.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for row counting operations.
pub type Result<T> = std::result::Result<T, RowCountError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_mentions_path() {
        let err = RowCountError::Open {
            path: PathBuf::from("missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("missing.csv"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = RowCountError::Read {
            path: PathBuf::from("some/dir"),
            source: io::Error::other("is a directory"),
        };
        assert_eq!(err.to_string(), "cannot read some/dir: is a directory");
    }

    #[test]
    fn test_column_not_found_message() {
        let err = RowCountError::ColumnNotFound("price".to_string());
        assert_eq!(err.to_string(), "column not found in header: \"price\"");
    }
}
