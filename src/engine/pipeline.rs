//! The evaluation pipeline.
//!
//! Orchestrates a single request: validate, look up the compiled program in
//! the cache, compile on miss, bind the inferred environment, evaluate and
//! classify. The cache is an owned field constructed with the configured
//! capacity; there is no process-wide singleton.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cel_interpreter::Program;

use crate::cache::{CacheStats, ProgramCache};
use crate::types::config::CacheConfig;
use crate::types::errors::{BatchFailure, EngineError, EvaluationFailure};
use crate::types::requests::EvaluationRequest;
use crate::types::responses::EvaluationResult;

use super::classify::classify;
use super::environment::inferred_context;

/// CEL evaluation engine with a compiled-program cache.
///
/// All methods take `&self`; share the engine across threads with an `Arc`.
pub struct CelEngine {
    cache: ProgramCache,
    builds: AtomicU64,
}

impl CelEngine {
    /// Creates an engine with the configured cache capacity.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Creates an engine with an explicit cache capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: ProgramCache::new(capacity),
            builds: AtomicU64::new(0),
        }
    }

    /// Evaluates a single request.
    ///
    /// On failure the returned [`EvaluationFailure`] still carries the
    /// populated result record, so transports can answer with it directly.
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationFailure> {
        match self.run(request) {
            Ok(result) => Ok(result),
            Err(error) => Err(EvaluationFailure {
                result: EvaluationResult::failure(&request.id, &error),
                error,
            }),
        }
    }

    /// Evaluates a batch of requests independently, in input order.
    ///
    /// Returns one record per input. If any item fails, the whole call fails
    /// with a [`BatchFailure`] that names the failing indices while still
    /// carrying every record.
    pub fn evaluate_many(
        &self,
        requests: &[EvaluationRequest],
    ) -> Result<Vec<EvaluationResult>, BatchFailure> {
        let mut results = Vec::with_capacity(requests.len());
        let mut failed = Vec::new();
        for (pos, request) in requests.iter().enumerate() {
            match self.evaluate(request) {
                Ok(result) => results.push(result),
                Err(failure) => {
                    failed.push(pos);
                    results.push(failure.result);
                }
            }
        }
        if failed.is_empty() {
            Ok(results)
        } else {
            Err(BatchFailure { results, failed })
        }
    }

    /// Administrative reset: drops all cached programs.
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("program cache cleared");
    }

    /// Number of programs currently cached.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Cache hit/miss statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Total number of compilations performed.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    fn run(&self, request: &EvaluationRequest) -> Result<EvaluationResult, EngineError> {
        if request.expression.is_empty() {
            return Err(EngineError::EmptyExpression);
        }

        let cached = if request.identifier.is_empty() {
            None
        } else {
            self.cache.lookup(&request.identifier, &request.expression)
        };

        let program = match cached {
            Some(program) => {
                tracing::debug!(identifier = %request.identifier, "cache hit");
                program
            }
            // Compiling runs outside the store lock. Two concurrent misses on
            // the same identifier may both compile; the later insert wins,
            // which is harmless because both programs are equivalent.
            None => {
                let program = self.compile(&request.expression)?;
                if !request.identifier.is_empty() {
                    self.cache
                        .insert(&request.identifier, &request.expression, Arc::clone(&program));
                }
                program
            }
        };

        let context = inferred_context(&request.context);
        let value = program.execute(&context).map_err(|err| {
            tracing::error!(id = %request.id, "program evaluation error: {err}");
            EngineError::Evaluation(err.to_string())
        })?;

        classify(&request.id, value)
    }

    fn compile(&self, expression: &str) -> Result<Arc<Program>, EngineError> {
        self.builds.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("compiling expression");
        let program = Program::compile(expression).map_err(|err| {
            tracing::error!("type-check error: {err}");
            EngineError::Compile(err.to_string())
        })?;
        Ok(Arc::new(program))
    }
}
