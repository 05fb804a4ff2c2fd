//! Runtime bridge lifecycle tests
//!
//! Exercises initialization sharing, failure handling and the call guard
//! with in-process interpreters, so no Python install is needed.

use async_trait::async_trait;
use pygallery::bridge::{
    Bridge, BridgeError, Interpreter, RuntimeLoader, RuntimeStatus, ScriptArg,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Returns the program it was given, counting executions.
struct RecordingInterpreter {
    executions: Arc<AtomicUsize>,
}

#[async_trait]
impl Interpreter for RecordingInterpreter {
    fn describe(&self) -> String {
        "Recording".to_string()
    }

    async fn execute(&self, program: &str) -> Result<String, BridgeError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(program.to_string())
    }
}

struct SlowLoader {
    loads: AtomicUsize,
    executions: Arc<AtomicUsize>,
    fail: bool,
}

impl SlowLoader {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            loads: AtomicUsize::new(0),
            executions: Arc::new(AtomicUsize::new(0)),
            fail,
        })
    }
}

#[async_trait]
impl RuntimeLoader for SlowLoader {
    async fn load(&self) -> Result<Arc<dyn Interpreter>, BridgeError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        if self.fail {
            Err(BridgeError::Initialization("interpreter missing".to_string()))
        } else {
            Ok(Arc::new(RecordingInterpreter {
                executions: Arc::clone(&self.executions),
            }))
        }
    }
}

#[tokio::test]
async fn test_concurrent_initialize_loads_once() {
    let loader = SlowLoader::new(false);
    let bridge = Arc::new(Bridge::new(loader.clone()));
    let loading_seen = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let bridge = Arc::clone(&bridge);
        let loading_seen = Arc::clone(&loading_seen);
        handles.push(tokio::spawn(async move {
            let observer = move |status: RuntimeStatus| {
                if status == RuntimeStatus::Loading {
                    loading_seen.fetch_add(1, Ordering::SeqCst);
                }
            };
            bridge.initialize(&observer).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), Ok(()));
    }
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    assert_eq!(loading_seen.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.status(), RuntimeStatus::Ready);
    assert_eq!(bridge.describe().as_deref(), Some("Recording"));
}

#[tokio::test]
async fn test_failed_initialize_is_shared_and_final() {
    let loader = SlowLoader::new(true);
    let bridge = Arc::new(Bridge::new(loader.clone()));

    let first = {
        let bridge = Arc::clone(&bridge);
        tokio::spawn(async move { bridge.initialize(&|_: RuntimeStatus| {}).await })
    };
    let second = bridge.initialize(&|_: RuntimeStatus| {}).await;
    let first = first.await.unwrap();

    let expected = Err(BridgeError::Initialization("interpreter missing".to_string()));
    assert_eq!(first, expected);
    assert_eq!(second, expected);
    assert_eq!(bridge.status(), RuntimeStatus::Error);

    // Not retried
    assert_eq!(bridge.initialize(&|_: RuntimeStatus| {}).await, expected);
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);

    assert_eq!(
        bridge.call("def run(): return 1", &[]).await,
        Err(BridgeError::NotInitialized)
    );
}

#[tokio::test]
async fn test_observer_never_sees_error() {
    let loader = SlowLoader::new(true);
    let bridge = Bridge::new(loader);
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let observer = move |status: RuntimeStatus| sink.lock().unwrap().push(status);
    assert!(bridge.initialize(&observer).await.is_err());

    assert_eq!(*seen.lock().unwrap(), vec![RuntimeStatus::Loading]);
}

#[tokio::test]
async fn test_call_before_initialize_never_executes() {
    let loader = SlowLoader::new(false);
    let bridge = Bridge::new(loader.clone());

    let result = bridge.call("def run(a): return a", &[ScriptArg::Int(1)]).await;
    assert_eq!(result, Err(BridgeError::NotInitialized));
    assert_eq!(loader.loads.load(Ordering::SeqCst), 0);
    assert_eq!(loader.executions.load(Ordering::SeqCst), 0);
    assert_eq!(bridge.status(), RuntimeStatus::Idle);
}

#[tokio::test]
async fn test_call_appends_marshaled_invocation() {
    let loader = SlowLoader::new(false);
    let bridge = Bridge::new(loader.clone());
    bridge.initialize(&|_: RuntimeStatus| {}).await.unwrap();

    let program = bridge
        .call(
            "def run(a, b):\n    return a + b",
            &[ScriptArg::Float(12.0), ScriptArg::from("x\"y")],
        )
        .await
        .unwrap();

    assert!(program.starts_with("def run(a, b):"));
    assert!(program.contains("run(12, \"x\\\"y\")"));
    assert_eq!(loader.executions.load(Ordering::SeqCst), 1);
}
