//! Error types for the engine.

use thiserror::Error;

use crate::types::responses::EvaluationResult;

/// Standard result type of the crate.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engine and its collaborators.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty expression not allowed")]
    EmptyExpression,

    #[error("compile error: {0}")]
    Compile(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("unknown result type")]
    UnknownResultType(String),

    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Creates a generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Creates a generic configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Human-readable elaboration used for the result record's message field.
    pub fn detail(&self) -> String {
        match self {
            EngineError::EmptyExpression => {
                "an expression is required but none was supplied".to_string()
            }
            EngineError::Compile(msg) => format!("type-check error: {msg}"),
            EngineError::Evaluation(msg) => format!("program evaluation error: {msg}"),
            EngineError::UnknownResultType(found) => {
                format!("expected a boolean result, got {found}")
            }
            other => other.to_string(),
        }
    }
}

/// A failed single evaluation.
///
/// Carries the populated failure record alongside the typed error, so callers
/// can both respond with the record and branch on the error kind.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct EvaluationFailure {
    /// Result record with `error`/`message` populated.
    pub result: EvaluationResult,

    /// The underlying error.
    pub error: EngineError,
}

/// A batch evaluation in which at least one request failed.
///
/// The full per-item record sequence is still present, in input order, so
/// callers can tell exactly which items failed.
#[derive(Error, Debug)]
#[error("batch evaluation failed for request(s) {}", join_indices(.failed))]
pub struct BatchFailure {
    /// One record per input request, in input order.
    pub results: Vec<EvaluationResult>,

    /// Zero-based indices of the failed requests.
    pub failed: Vec<usize>,
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
