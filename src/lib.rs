//! # cel-engine
//!
//! Evaluates boolean CEL expressions against caller-supplied data contexts,
//! caching compiled programs in a capacity-bounded LRU cache so repeated
//! evaluations of the same expression skip the parse/compile step. Reusing an
//! identifier with a different expression body is detected and triggers a
//! rebuild.
//!
//! ## Modules
//!
//! - [`engine`] - the evaluation pipeline
//! - [`cache`] - LRU store and compiled-program cache
//! - [`types`] - requests, results, context values, errors, configuration
//! - [`cli`] - command line interface
//!
//! ## Example
//!
//! ```
//! use cel_engine::{CelEngine, EvaluationRequest};
//!
//! let engine = CelEngine::with_capacity(100);
//! let request = EvaluationRequest::new("number == 1")
//!     .with_identifier("example")
//!     .with_value("number", 1i64);
//!
//! let result = engine.evaluate(&request).unwrap();
//! assert!(result.result);
//! ```

pub mod cache;
pub mod cli;
pub mod engine;
pub mod types;

pub use engine::CelEngine;
pub use types::config::Config;
pub use types::errors::{BatchFailure, EngineError, EngineResult, EvaluationFailure};
pub use types::requests::EvaluationRequest;
pub use types::responses::EvaluationResult;
pub use types::value::ContextValue;
