//! Integration tests for pqbench
//!
//! These tests drive the bundled provider through the engine and exporters.

use pqbench::{
    AlgorithmDescriptor, BenchError, BenchmarkConfig, BenchmarkEngine, ErrorKind, Family,
    FipsProvider, KemOperations, KemSizes, Operation, PrimitiveError, Provider, ProviderRegistry,
    RunPhase, Session, SessionState, generate_csv_report, generate_json_report,
    per_algorithm_path, write_csv, write_json,
};
use std::cell::Cell;
use std::rc::Rc;

fn quick_config() -> BenchmarkConfig {
    BenchmarkConfig {
        iterations: 20,
        warmup_iterations: 2,
        ..Default::default()
    }
}

/// Provider with a single toy KEM whose decapsulation starts failing after
/// a fixed number of calls
struct FlakyProvider {
    decaps_budget: usize,
    decaps_calls: Rc<Cell<usize>>,
}

impl Provider for FlakyProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    fn version(&self) -> &str {
        "0.0.1"
    }

    fn initialize(&self) -> Result<SessionState, BenchError> {
        Ok(Box::new(()))
    }

    fn create_algorithm(
        &self,
        _state: &SessionState,
        name: &str,
    ) -> Result<AlgorithmDescriptor, BenchError> {
        if name != "toykem" {
            return Err(BenchError::AlgorithmNotFound(name.to_string()));
        }
        let calls = Rc::clone(&self.decaps_calls);
        let budget = self.decaps_budget;
        Ok(AlgorithmDescriptor::key_encapsulation(
            "toykem",
            "1",
            KemSizes {
                public_key: 16,
                secret_key: 16,
                ciphertext: 16,
                shared_secret: 16,
            },
            KemOperations::new(
                |pk: &mut [u8], sk: &mut [u8]| {
                    pk.fill(1);
                    sk.fill(2);
                    Ok(())
                },
                |_pk: &[u8], ct: &mut [u8], ss: &mut [u8]| {
                    ct.fill(3);
                    ss.fill(4);
                    Ok(())
                },
                move |_ct: &[u8], _sk: &[u8], ss: &mut [u8]| {
                    calls.set(calls.get() + 1);
                    if calls.get() > budget {
                        return Err(PrimitiveError::new("decapsulation failure"));
                    }
                    ss.fill(4);
                    Ok(())
                },
            ),
        ))
    }

    fn list_algorithms(&self, _state: &SessionState) -> Vec<String> {
        vec!["toykem".to_string()]
    }
}

/// Every ML-KEM parameter set runs keygen, encaps and decaps in order
#[test]
fn test_mlkem_full_run() {
    let provider = FipsProvider::new();
    let session = Session::open(&provider).unwrap();
    let mut engine = BenchmarkEngine::new();

    for name in ["mlkem512", "mlkem768", "mlkem1024"] {
        let handle = session.create_algorithm(name).unwrap();
        let set = engine.run_algorithm(&handle, &quick_config()).unwrap();

        assert_eq!(set.algorithm(), name);
        assert_eq!(
            set.operations(),
            vec![Operation::Keygen, Operation::Encapsulate, Operation::Decapsulate]
        );
        for result in set.results() {
            assert_eq!(result.samples().len(), 20);
            let s = result.summary();
            assert!(s.min as f64 <= s.median && s.median <= s.max as f64);
            assert!(s.p95 <= s.p99);
        }
        assert_eq!(engine.phase(), RunPhase::Complete);
    }
}

/// Signing with the configured message verifies under the real primitive
#[test]
fn test_mldsa_full_run() {
    let provider = FipsProvider::new();
    let session = Session::open(&provider).unwrap();
    let handle = session.create_algorithm("ML-DSA-44").unwrap();
    assert_eq!(handle.family(), Family::Signature);

    let config = BenchmarkConfig {
        iterations: 5,
        warmup_iterations: 1,
        message: "integration message".to_string(),
        ..Default::default()
    };
    let set = BenchmarkEngine::new().run_algorithm(&handle, &config).unwrap();
    assert_eq!(
        set.operations(),
        vec![Operation::Keygen, Operation::Sign, Operation::Verify]
    );
    assert_eq!(set.display_name(), "ML-DSA-44");
}

/// A single operation can be benchmarked by name
#[test]
fn test_single_operation_by_name() {
    let provider = FipsProvider::new();
    let session = Session::open(&provider).unwrap();
    let handle = session.create_algorithm("mlkem512").unwrap();
    let mut engine = BenchmarkEngine::new();

    let result = engine
        .run_operation_named(&handle, "encaps", &quick_config())
        .unwrap();
    assert_eq!(result.operation(), Operation::Encapsulate);
    assert_eq!(result.algorithm(), "mlkem512");

    let err = engine
        .run_operation_named(&handle, "sign", &quick_config())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSupported);
    assert_eq!(engine.phase(), RunPhase::Failed);
}

/// Results written to disk match the in-memory reports
#[test]
fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FipsProvider::new();
    let session = Session::open(&provider).unwrap();
    let handle = session.create_algorithm("mlkem768").unwrap();
    let set = BenchmarkEngine::new()
        .with_architecture("test-arch")
        .run_algorithm(&handle, &quick_config())
        .unwrap();

    let json_path = per_algorithm_path(&dir.path().join("results.json"), set.algorithm());
    let csv_path = per_algorithm_path(&dir.path().join("results.csv"), set.algorithm());
    write_json(&set, &json_path).unwrap();
    write_csv(&set, &csv_path).unwrap();

    assert!(json_path.ends_with("mlkem768_results.json"));
    let json = std::fs::read_to_string(&json_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["algorithm"], "mlkem768");
    assert_eq!(value["architecture"], "test-arch");
    assert_eq!(value["results"].as_array().unwrap().len(), 3);
    assert_eq!(value["results"][2]["operation"], "decaps");
    assert_eq!(value["results"][0]["num_samples"], 20);
    assert_eq!(json.trim_end(), generate_json_report(&set).unwrap().trim_end());

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, generate_csv_report(&set).unwrap());
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().nth(1).unwrap().starts_with("mlkem768,test-arch,keygen,20,"));
}

/// A primitive failure mid-measurement aborts the run without results
#[test]
fn test_failure_aborts_run() {
    let calls = Rc::new(Cell::new(0));
    let provider = FlakyProvider {
        decaps_budget: 10,
        decaps_calls: Rc::clone(&calls),
    };
    let session = Session::open(&provider).unwrap();
    let handle = session.create_algorithm("toykem").unwrap();
    let mut engine = BenchmarkEngine::new();

    let err = engine.run_algorithm(&handle, &quick_config()).unwrap_err();
    match err {
        BenchError::OperationFailed {
            operation,
            phase,
            iteration,
            ..
        } => {
            assert_eq!(operation, Operation::Decapsulate);
            assert_eq!(phase, RunPhase::Measuring);
            // 2 warmup calls, then 8 timed calls succeed
            assert_eq!(iteration, Some(9));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.get(), 11);
    assert_eq!(engine.phase(), RunPhase::Failed);
}

/// The registry resolves providers by name and keeps the first of duplicates
#[test]
fn test_registry_lookup() {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(FipsProvider::new())).unwrap();
    registry
        .register(Box::new(FlakyProvider {
            decaps_budget: 0,
            decaps_calls: Rc::new(Cell::new(0)),
        }))
        .unwrap();

    registry.register(Box::new(FipsProvider::new())).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.names(), vec!["fips", "flaky"]);

    let flaky = registry.find("flaky").unwrap();
    let session = Session::open(flaky).unwrap();
    assert_eq!(session.list_algorithms(), vec!["toykem"]);
    assert!(session.supports("toykem"));
    assert!(!session.supports("mlkem512"));
}

/// Unknown names surface as AlgorithmNotFound with a stable error code
#[test]
fn test_unknown_algorithm() {
    let provider = FipsProvider::new();
    let session = Session::open(&provider).unwrap();
    let err = session.create_algorithm("kyber768").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlgorithmNotFound);
    assert_eq!(err.kind().code(), -4);
}

/// Invalid configuration fails before any primitive runs
#[test]
fn test_invalid_configuration() {
    let calls = Rc::new(Cell::new(0));
    let provider = FlakyProvider {
        decaps_budget: usize::MAX,
        decaps_calls: Rc::clone(&calls),
    };
    let session = Session::open(&provider).unwrap();
    let handle = session.create_algorithm("toykem").unwrap();

    let config = BenchmarkConfig {
        iterations: 0,
        ..Default::default()
    };
    let err = BenchmarkEngine::new()
        .run_algorithm(&handle, &config)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_eq!(calls.get(), 0);
}
