//! Integration tests for the evaluation engine and its program cache.

use std::collections::HashMap;
use std::sync::Arc;

use cel_engine::{CelEngine, ContextValue, EngineError, EvaluationRequest};
use serde::Deserialize;

/// One table-driven test case: a request and its expected boolean outcome.
#[derive(Debug, Deserialize)]
struct TestCase {
    request: EvaluationRequest,
    result: bool,
}

fn read_cases() -> Vec<TestCase> {
    serde_json::from_str(include_str!("data/cases.json")).unwrap()
}

#[test]
fn test_table_driven_cases() {
    let engine = CelEngine::with_capacity(100);

    for case in read_cases() {
        let result = engine
            .evaluate(&case.request)
            .unwrap_or_else(|failure| panic!("{}: {failure}", case.request.expression));
        assert_eq!(
            result.result, case.result,
            "expression: {}",
            case.request.expression
        );
    }
}

#[test]
fn test_nested_member_access() {
    let engine = CelEngine::with_capacity(10);
    let request = EvaluationRequest::new("data.value == 1").with_value(
        "data",
        ContextValue::from(serde_json::json!({ "value": 1 })),
    );

    let result = engine.evaluate(&request).unwrap();

    assert!(result.result);
    assert_eq!(result.error, "");
}

#[test]
fn test_empty_expression_is_an_error() {
    let engine = CelEngine::with_capacity(10);
    let request = EvaluationRequest::new("").with_value("value", "test");

    let failure = engine.evaluate(&request).unwrap_err();

    assert!(!failure.result.result);
    assert!(!failure.result.error.is_empty());
}

#[test]
fn test_cache_update_on_expression_change() {
    // Same identifier reused with a different expression body must recompile
    // and answer for the new expression, not the stale cached one.
    let engine = CelEngine::with_capacity(10);

    let first = EvaluationRequest::new("number == 1 && user == \"willie\"")
        .with_identifier("willie")
        .with_value("user", "willie")
        .with_value("number", 1i64);
    assert!(engine.evaluate(&first).unwrap().result);

    let second = EvaluationRequest::new("number == 1 && user2 == \"wutz\"")
        .with_identifier("willie")
        .with_value("user", "willie")
        .with_value("number", 1i64)
        .with_value("user2", "wutz");
    assert!(engine.evaluate(&second).unwrap().result);

    assert_eq!(engine.builds(), 2);
    assert_eq!(engine.cache_size(), 1);
}

#[test]
fn test_undeclared_field_fails() {
    let engine = CelEngine::with_capacity(10);

    let good = EvaluationRequest::new("number == 1 && user == \"willie\"")
        .with_identifier("willie")
        .with_value("user", "willie")
        .with_value("number", 1i64);
    assert!(engine.evaluate(&good).unwrap().result);

    let bad = EvaluationRequest::new("hurtz == \"wutz\"")
        .with_identifier("willie")
        .with_value("user", "willie")
        .with_value("number", 1i64);
    let failure = engine.evaluate(&bad).unwrap_err();

    assert!(!failure.result.result);
    assert!(matches!(failure.error, EngineError::Evaluation(_)));
}

#[test]
fn test_idempotent_hits_with_different_contexts() {
    let engine = CelEngine::with_capacity(10);
    let base = EvaluationRequest::new("number == 1").with_identifier("n");

    let one = base.clone().with_value("number", 1i64);
    let two = base.clone().with_value("number", 2i64);

    assert!(engine.evaluate(&one).unwrap().result);
    assert!(!engine.evaluate(&two).unwrap().result);
    assert!(engine.evaluate(&one).unwrap().result);

    // One compile, two cache hits: no cross-contamination between contexts.
    assert_eq!(engine.builds(), 1);
    assert_eq!(engine.cache_stats().hits, 2);
}

#[test]
fn test_identifier_less_calls_leave_cache_empty() {
    let engine = CelEngine::with_capacity(10);
    let request = EvaluationRequest::new("a == 1").with_value("a", 1i64);

    for _ in 0..10 {
        engine.evaluate(&request).unwrap();
    }

    assert_eq!(engine.cache_size(), 0);
}

#[test]
fn test_numeric_fidelity_from_json() {
    // A JSON integer must stay an integer: `number == 1` is false in CEL when
    // the bound value arrives as the double 1.0.
    let engine = CelEngine::with_capacity(10);
    let context: HashMap<String, ContextValue> =
        serde_json::from_str(r#"{ "number": 1 }"#).unwrap();

    let request = EvaluationRequest::new("number == 1").with_context(context);

    assert!(engine.evaluate(&request).unwrap().result);
}

#[test]
fn test_batch_partial_failure() {
    let engine = CelEngine::with_capacity(10);
    let ok = EvaluationRequest::new("a == 1").with_value("a", 1i64);
    let empty = EvaluationRequest::new("");

    let requests = vec![ok.clone(), ok.clone(), empty, ok.clone(), ok];
    let failure = engine.evaluate_many(&requests).unwrap_err();

    assert_eq!(failure.results.len(), 5);
    assert_eq!(failure.failed, vec![2]);
    for (pos, result) in failure.results.iter().enumerate() {
        if pos == 2 {
            assert!(result.is_error());
        } else {
            assert!(result.result);
            assert!(!result.is_error());
        }
    }
    assert!(failure.to_string().contains('2'));
}

#[test]
fn test_correlation_id_pass_through() {
    let engine = CelEngine::with_capacity(10);
    let request = EvaluationRequest::new("a == 1")
        .with_id("corr-42")
        .with_value("a", 1i64);

    assert_eq!(engine.evaluate(&request).unwrap().id, "corr-42");

    let failure = engine
        .evaluate(&EvaluationRequest::new("").with_id("corr-43"))
        .unwrap_err();
    assert_eq!(failure.result.id, "corr-43");
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Arc::new(CelEngine::with_capacity(64));
    let mut handles = Vec::new();

    for t in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(std::thread::spawn(move || {
            for i in 0..50 {
                let request = EvaluationRequest::new("n == 1")
                    .with_identifier(format!("id-{}", (t + i) % 16))
                    .with_value("n", 1i64);
                assert!(engine.evaluate(&request).unwrap().result);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(engine.cache_size() <= 16);
    // At most one redundant compile per concurrent first miss; well below one
    // compile per call once the cache warms up.
    assert!(engine.builds() < 400);
}

#[test]
fn test_clear_cache_resets_state() {
    let engine = CelEngine::with_capacity(10);
    let request = EvaluationRequest::new("a == 1")
        .with_identifier("a")
        .with_value("a", 1i64);

    engine.evaluate(&request).unwrap();
    assert_eq!(engine.cache_size(), 1);

    engine.clear_cache();

    assert_eq!(engine.cache_size(), 0);
    assert!(engine.evaluate(&request).unwrap().result);
}
