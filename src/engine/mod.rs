//! Evaluation engine.
//!
//! - [`pipeline`] - request orchestration (validate, cache, compile, evaluate)
//! - [`environment`] - variable-binding inference from the context shape
//! - [`classify`] - evaluator-output classification

pub mod classify;
pub mod environment;
pub mod pipeline;

pub use pipeline::CelEngine;
