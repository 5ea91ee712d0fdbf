use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while
/// spreadsheets are decoded, converted to JSON, or turned into generated code.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when the input directory cannot be traversed.
    #[error("directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Raised when rendering generated source text fails.
    #[error("code rendering error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Raised when a workbook does not expose the expected sheets.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a sheet lacks the type, field-name and comment header rows.
    #[error("sheet {sheet} has {rows} rows, at least 3 header rows are required")]
    TooFewRows { sheet: String, rows: usize },

    /// Raised by the strict coercion policy when numeric text is malformed.
    #[error("invalid literal value '{value}' in column {column}")]
    InvalidLiteral { column: String, value: String },

    /// Raised when a sheet has no `Id` column to index generated lookups by.
    #[error("sheet {0} has no Id field")]
    MissingIdField(String),

    /// Raised when the `Id` column is declared with a non-numeric type.
    #[error("sheet {sheet} declares Id as {declared}, expected int or float")]
    InvalidIdField { sheet: String, declared: String },

    /// Raised when two sheets map onto the same generated entity name.
    #[error("entity {0} is already defined by another sheet")]
    DuplicateEntity(String),

    /// Raised when two header fields map onto the same generated identifier.
    #[error("entity {entity} has more than one field named {ident}")]
    DuplicateField { entity: String, ident: String },

    /// Raised when clearing the JSON directory would also clear another
    /// directory the run depends on.
    #[error("refusing to clear {dir}: it contains {other}")]
    UnsafeOutputDir { dir: PathBuf, other: PathBuf },

    /// Raised when the user provides a path that does not exist.
    #[error("input directory not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
