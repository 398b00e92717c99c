//! Evaluation result types.

use serde::{Deserialize, Serialize};

use crate::types::errors::EngineError;

/// Outcome of a single expression evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Correlation id echoed from the request.
    #[serde(default)]
    pub id: String,

    /// Boolean outcome. Only meaningful when `error` is empty.
    pub result: bool,

    /// Diagnostic string; empty on success.
    #[serde(default)]
    pub error: String,

    /// Human-readable elaboration of the outcome.
    #[serde(default)]
    pub message: String,

    /// When the evaluation finished.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl EvaluationResult {
    /// Creates a success record for a boolean outcome.
    pub fn success(id: impl Into<String>, value: bool) -> Self {
        Self {
            id: id.into(),
            result: value,
            error: String::new(),
            message: format!("result ok: {value}"),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Creates a failure record from a typed error.
    pub fn failure(id: impl Into<String>, error: &EngineError) -> Self {
        Self {
            id: id.into(),
            result: false,
            error: error.to_string(),
            message: error.detail(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Returns `true` when the record carries a diagnostic.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
