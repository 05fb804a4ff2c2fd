//! # Runtime Service
//!
//! [`Bridge`] owns the lifecycle of the interpreter: a single asynchronous
//! load shared by every caller, status reporting, and the `run(...)` call
//! primitive. The interpreter itself sits behind two traits so the service
//! can be driven by the real `python3` runtime or by an in-process fake.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──initialize──▶ Loading ──ok──▶ Ready
//!                          │
//!                          └──err──▶ Error
//! ```
//!
//! `Ready` and `Error` are terminal for the life of the service.

use super::error::BridgeError;
use super::marshal::{build_program, ScriptArg};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Observable state of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

impl RuntimeStatus {
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

/// Receives `Loading` and `Ready` transitions during initialization.
///
/// Failure is reported through the `Err` returned by
/// [`Bridge::initialize`], never through the observer.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, status: RuntimeStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(RuntimeStatus) + Send + Sync,
{
    fn on_status(&self, status: RuntimeStatus) {
        self(status);
    }
}

/// Brings an interpreter up. Invoked at most once per [`Bridge`].
#[async_trait]
pub trait RuntimeLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Interpreter>, BridgeError>;
}

/// A loaded interpreter able to evaluate a complete program.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Short human-readable description, e.g. `Python 3.12.1`.
    fn describe(&self) -> String;

    /// Evaluate `program` and return whatever it wrote to stdout.
    async fn execute(&self, program: &str) -> Result<String, BridgeError>;
}

type LoadOutcome = Result<Arc<dyn Interpreter>, BridgeError>;

/// Lazily-initialized interpreter service.
pub struct Bridge {
    loader: Arc<dyn RuntimeLoader>,
    runtime: OnceCell<LoadOutcome>,
    status: Mutex<RuntimeStatus>,
}

impl Bridge {
    pub fn new(loader: Arc<dyn RuntimeLoader>) -> Self {
        Self {
            loader,
            runtime: OnceCell::new(),
            status: Mutex::new(RuntimeStatus::Idle),
        }
    }

    pub fn status(&self) -> RuntimeStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_status(&self, status: RuntimeStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    /// Initialize the interpreter exactly once.
    ///
    /// Concurrent callers await the same in-flight load; later callers get
    /// the stored outcome immediately. A failed load is never retried.
    pub async fn initialize(&self, observer: &dyn StatusObserver) -> Result<(), BridgeError> {
        let outcome = self
            .runtime
            .get_or_init(|| async {
                self.set_status(RuntimeStatus::Loading);
                observer.on_status(RuntimeStatus::Loading);

                match self.loader.load().await {
                    Ok(interpreter) => {
                        tracing::info!("runtime ready: {}", interpreter.describe());
                        self.set_status(RuntimeStatus::Ready);
                        observer.on_status(RuntimeStatus::Ready);
                        Ok(interpreter)
                    }
                    Err(e) => {
                        tracing::error!("runtime failed to load: {}", e);
                        self.set_status(RuntimeStatus::Error);
                        Err(e)
                    }
                }
            })
            .await;

        outcome.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    /// Description of the loaded interpreter, if initialization succeeded.
    pub fn describe(&self) -> Option<String> {
        match self.runtime.get() {
            Some(Ok(interpreter)) => Some(interpreter.describe()),
            _ => None,
        }
    }

    /// Evaluate `script`, then invoke its `run` entry point with `args`.
    ///
    /// Fails with [`BridgeError::NotInitialized`] without touching the
    /// interpreter unless [`Bridge::initialize`] has succeeded.
    pub async fn call(&self, script: &str, args: &[ScriptArg]) -> Result<String, BridgeError> {
        let interpreter = match self.runtime.get() {
            Some(Ok(interpreter)) => Arc::clone(interpreter),
            _ => return Err(BridgeError::NotInitialized),
        };

        tracing::debug!("calling run() with {} argument(s)", args.len());
        let program = build_program(script, args);
        interpreter.execute(&program).await
    }
}
