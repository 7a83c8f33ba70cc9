use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GdcError {
    #[error("invalid project id: {0}")]
    InvalidProjectId(String),

    #[error("invalid file id: {0}")]
    InvalidFileId(String),

    #[error("GDC request failed: {0}")]
    GdcHttp(String),

    #[error("GDC returned status {status}: {message}")]
    GdcStatus { status: u16, message: String },

    #[error("unexpected GDC response shape: {0}")]
    UnexpectedResponse(String),

    #[error("file {0} has no associated case/sample data")]
    MissingSampleData(String),

    #[error("malformed manifest line {line}: {message}")]
    ManifestParse { line: usize, message: String },

    #[error("failed to encode filter expression: {0}")]
    FilterEncode(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
