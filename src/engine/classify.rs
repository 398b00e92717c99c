//! Classification of evaluator output.
//!
//! The service contract is strictly boolean-returning expressions: a boolean
//! becomes the result record, anything else is an unknown-result-type error.

use cel_interpreter::objects::Value;

use crate::types::errors::EngineError;
use crate::types::responses::EvaluationResult;

/// Maps the evaluator's output value into a result record.
pub fn classify(id: &str, value: Value) -> Result<EvaluationResult, EngineError> {
    match value {
        Value::Bool(b) => Ok(EvaluationResult::success(id, b)),
        other => Err(EngineError::UnknownResultType(
            value_type(&other).to_string(),
        )),
    }
}

/// CEL type name of a value, for diagnostics.
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::UInt(_) => "uint",
        Value::Float(_) => "double",
        Value::String(_) => "string",
        Value::Bytes(_) => "bytes",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        Value::Null => "null",
        _ => "unknown",
    }
}
