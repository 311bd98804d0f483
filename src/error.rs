use thiserror::Error;

/// The one failure the analysis pipeline reports to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No URLs found. Paste links or upload a CSV with links.")]
    NoUrls,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Analysis(AnalysisError::NoUrls) => 2,
            Error::Io(_) | Error::Json(_) | Error::Csv(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
