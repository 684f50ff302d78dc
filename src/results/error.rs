//! Error types for reading B-RISK results and evaluating tenability

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, parsing or evaluating B-RISK results
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("{} is not a directory or a zip file", .0.display())]
    NotAResultSource(PathBuf),

    #[error("no file found for suffix \"{suffix}\"")]
    FileNotFound { suffix: String },

    #[error("more than 1 file found for suffix \"{suffix}\": {candidates:?}")]
    AmbiguousFile {
        suffix: String,
        candidates: Vec<String>,
    },

    #[error("invalid input file: {0}")]
    Input(String),

    #[error("results workbook has no \"{0}\" sheet")]
    MissingSheet(String),

    #[error("results sheet \"{sheet}\" has no matching room in the input file")]
    UnknownRoom { sheet: String },

    #[error("no room named \"{0}\"")]
    UnknownRoomName(String),

    #[error("column \"{column}\" missing from {table}")]
    MissingColumn { table: String, column: String },

    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error("invalid combination of rooms ({rooms}) and transition times ({transitions})")]
    InvalidEgressPath { rooms: usize, transitions: usize },

    #[error("transition times must be finite and ascending, got {0:?}")]
    UnorderedTransitions(Vec<f64>),
}

pub type Result<T> = std::result::Result<T, Error>;
