use thiserror::Error;

#[derive(Debug, Error)]
pub enum DietError {
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Selection references food #{index}, but the catalog only has {len} foods")]
    InvalidSelection { index: usize, len: usize },

    #[error("No combination of foods satisfies the goals within tolerance")]
    NoFeasibleSolution,

    #[error("Search aborted after visiting {steps} states")]
    SearchLimitExceeded { steps: u64 },

    #[error("Memo cache was built for a different catalog or policy")]
    CacheMismatch,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DietError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        DietError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DietError>;
