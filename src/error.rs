use serde::Serialize;

pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse CSV data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    FetchFailure,
    ParseFailure,
}

/// Terminal failures of a single load attempt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source could not be retrieved; carries the underlying message.
    #[error("{0}")]
    Fetch(String),

    /// The payload is not tabular text at all.
    #[error("Failed to parse CSV data")]
    Parse {
        #[source]
        detail: ParseDetail,
    },
}

/// Why a payload was rejected; kept out of the user-facing message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseDetail(pub String);

impl LoadError {
    pub fn parse(detail: impl Into<String>) -> Self {
        LoadError::Parse {
            detail: ParseDetail(detail.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Fetch(_) => ErrorKind::FetchFailure,
            LoadError::Parse { .. } => ErrorKind::ParseFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
