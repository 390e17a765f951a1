use dogcheck_core::Architecture;
use thiserror::Error;

use crate::classifier::ClassifierError;

/// Errors emitted by the evaluation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Core(#[from] dogcheck_core::Error),
    #[error("classifier failed on '{image}' with {model}: {source}")]
    ClassifierFailure {
        image: String,
        model: Architecture,
        #[source]
        source: ClassifierError,
    },
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
