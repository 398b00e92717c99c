//! Variable-binding inference.
//!
//! Expressions run against an environment derived from the shape of the
//! incoming context: one dynamically typed variable per top-level key. Nested
//! structure is not declared separately; CEL's member access reaches into the
//! dynamic top-level values. The environment depends on the context's key set,
//! not on the expression text, so it is rebuilt from the request on every call
//! and never cached.

use std::collections::HashMap;

use cel_interpreter::objects::Value;
use cel_interpreter::Context;

use crate::types::value::ContextValue;

/// Builds an evaluation context binding each top-level key of `values`.
pub fn inferred_context(values: &HashMap<String, ContextValue>) -> Context<'static> {
    let mut context = Context::default();
    for (name, value) in values {
        context.add_variable_from_value(name.clone(), Value::from(value.clone()));
    }
    context
}
