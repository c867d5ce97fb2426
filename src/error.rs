use std::path::PathBuf;
use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

/// The three failure kinds reported by the export command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input file does not exist
    FileNotFound,
    /// Input file is not valid JSON
    Decode,
    /// Anything else (wrong shape, I/O, workbook errors)
    Unclassified,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Unexpected JSON structure: {0}")]
    Shape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel write error: {0}")]
    Write(String),

    #[error("Excel read error: {0}")]
    Read(String),
}

impl ExportError {
    /// Classify the error into one of the reported failure kinds
    pub fn kind(&self) -> FailureKind {
        match self {
            ExportError::NotFound(_) => FailureKind::FileNotFound,
            ExportError::Decode(_) => FailureKind::Decode,
            _ => FailureKind::Unclassified,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    /// Syntax errors are decode failures, type mismatches are shape failures
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            ExportError::Shape(err.to_string())
        } else if err.is_io() {
            ExportError::Io(err.into())
        } else {
            ExportError::Decode(err)
        }
    }
}
