//! Error types for document construction and saving

use thiserror::Error;

/// Errors raised while building or writing a spreadsheet document.
///
/// Domain errors (bad indices, unknown tables, malformed cell positions) are
/// raised synchronously to the caller. I/O and container errors surface at the
/// save boundary; a failed save may leave a partially written file behind, so
/// callers needing atomicity should write to a temporary path and rename.
#[derive(Debug, Error)]
pub enum OdsError {
    #[error("row index {0} exceeds the row limit ({1})")]
    RowIndexOutOfRange(usize, usize),

    #[error("column index {0} exceeds the column limit ({1})")]
    ColumnIndexOutOfRange(usize, usize),

    #[error("invalid cell position '{0}'")]
    BadPosition(String),

    #[error("no table named '{0}'")]
    UnknownTable(String),

    #[error("table number {0} out of range")]
    BadTableIndex(usize),

    #[error("table limit ({0}) reached")]
    TableLimit(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}
