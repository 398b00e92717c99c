//! CLI command implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::config::Config;
use crate::types::requests::EvaluationRequest;
use crate::types::value::ContextValue;
use crate::{CelEngine, EngineError, EngineResult};

/// Evaluates a single expression and prints the result record as JSON.
pub fn eval(
    expression: String,
    context: String,
    identifier: Option<String>,
    config: &Config,
) -> EngineResult<()> {
    let context: HashMap<String, ContextValue> = serde_json::from_str(&context)?;

    let mut request = EvaluationRequest::new(expression).with_context(context);
    if let Some(identifier) = identifier {
        request = request.with_identifier(identifier);
    }

    let engine = CelEngine::new(&config.cache);
    match engine.evaluate(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure.result)?);
            Err(failure.error)
        }
    }
}

/// Evaluates a batch of requests read from a JSON file.
///
/// Prints one record per request. Fails if any request failed, after printing
/// the complete record sequence.
pub fn batch(file: PathBuf, config: &Config) -> EngineResult<()> {
    let content = std::fs::read_to_string(&file)?;
    let requests: Vec<EvaluationRequest> = serde_json::from_str(&content)?;

    tracing::info!("evaluating {} request(s) from {}", requests.len(), file.display());

    let engine = CelEngine::new(&config.cache);
    match engine.evaluate_many(&requests) {
        Ok(results) => {
            println!("{}", serde_json::to_string_pretty(&results)?);
            let stats = engine.cache_stats();
            tracing::info!(
                "done: {} result(s), {} compilation(s), cache hit rate {:.2}",
                results.len(),
                engine.builds(),
                stats.hit_rate()
            );
            Ok(())
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure.results)?);
            Err(EngineError::other(failure.to_string()))
        }
    }
}

/// Writes a default configuration file to the target directory.
pub fn init(path: Option<PathBuf>) -> EngineResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("cel-engine.toml");
    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default().save(&config_path)?;
    println!("Configuration created at: {}", config_path.display());
    Ok(())
}

/// Shows version information.
pub fn version() {
    println!("cel-engine {}", env!("CARGO_PKG_VERSION"));
}

/// Loads configuration from `path`, falling back to defaults.
pub fn load_config(path: &Path) -> Config {
    if path.exists() {
        Config::load(path).unwrap_or_default()
    } else {
        Config::default()
    }
}
