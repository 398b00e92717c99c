//! Evaluation request types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::value::ContextValue;

/// A single expression evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Correlation id, echoed back on the result record. Pass-through only.
    #[serde(default)]
    pub id: String,

    /// Caller-chosen cache key. Empty disables caching for this call.
    #[serde(default)]
    pub identifier: String,

    /// CEL expression source text. Must not be empty.
    pub expression: String,

    /// Data the expression is evaluated against, one variable per top-level key.
    #[serde(default)]
    pub context: HashMap<String, ContextValue>,
}

impl EvaluationRequest {
    /// Creates a new request with a generated correlation id and no context.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            identifier: String::new(),
            expression: expression.into(),
            context: HashMap::new(),
        }
    }

    /// Sets the correlation id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the cache identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Replaces the whole context mapping.
    pub fn with_context(mut self, context: HashMap<String, ContextValue>) -> Self {
        self.context = context;
        self
    }

    /// Adds a single context variable.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
