//! Error taxonomy for the report catalog and its execution layer.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown report: {0}")]
    ReportNotFound(String),

    #[error("unknown table: {0}")]
    TableNotFound(String),

    /// The engine rejected or failed to execute a statement. Carries the
    /// engine's message verbatim so the free-text path can surface it.
    #[error("query execution failed: {0}")]
    Execution(String),

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Execution(e.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<postgres::Error> for Error {
    fn from(e: postgres::Error) -> Self {
        Error::Execution(e.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Connection(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
