//! # Python Process Runtime
//!
//! The production [`RuntimeLoader`] / [`Interpreter`] pair. Loading probes the
//! configured executable once; every call then runs in a fresh interpreter
//! process, so templates never share a global scope.
//!
//! ```text
//! <python> -I -X utf8 -      (program on stdin, result on stdout)
//! ```
//!
//! `-I` isolates the child from user site-packages and `PYTHON*` variables;
//! `-X utf8` keeps stdout UTF-8 regardless of the host locale.

use super::error::BridgeError;
use super::runtime::{Interpreter, RuntimeLoader};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const VERSION_PROBE: &str = "import sys; print(sys.version.split()[0])";

/// Locates and validates a Python 3 interpreter.
#[derive(Debug, Clone)]
pub struct PythonLoader {
    program: PathBuf,
    call_timeout: Option<Duration>,
}

impl PythonLoader {
    /// `call_timeout` of `None` lets calls run without a deadline.
    pub fn new(program: impl Into<PathBuf>, call_timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            call_timeout,
        }
    }
}

#[async_trait]
impl RuntimeLoader for PythonLoader {
    async fn load(&self) -> Result<Arc<dyn Interpreter>, BridgeError> {
        tracing::debug!("probing {}", self.program.display());

        let output = Command::new(&self.program)
            .arg("-c")
            .arg(VERSION_PROBE)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                BridgeError::Initialization(format!(
                    "failed to launch '{}': {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(BridgeError::Initialization(format!(
                "'{}' exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.starts_with("3.") {
            return Err(BridgeError::Initialization(format!(
                "'{}' reports version '{}', Python 3 is required",
                self.program.display(),
                version
            )));
        }

        Ok(Arc::new(PythonInterpreter {
            program: self.program.clone(),
            version,
            call_timeout: self.call_timeout,
        }))
    }
}

/// A validated Python 3 executable.
#[derive(Debug, Clone)]
pub struct PythonInterpreter {
    program: PathBuf,
    version: String,
    call_timeout: Option<Duration>,
}

impl PythonInterpreter {
    pub fn version(&self) -> &str {
        &self.version
    }

    async fn run_process(&self, program: &str) -> Result<std::process::Output, BridgeError> {
        let mut child = Command::new(&self.program)
            .args(["-I", "-X", "utf8", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                BridgeError::Io(format!("failed to spawn '{}': {}", self.program.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BridgeError::Io("failed to capture stdin".to_string()))?;
        stdin
            .write_all(program.as_bytes())
            .await
            .map_err(|e| BridgeError::Io(format!("failed to write program: {}", e)))?;
        // Closing stdin lets the interpreter start executing
        drop(stdin);

        child
            .wait_with_output()
            .await
            .map_err(|e| BridgeError::Io(format!("failed to collect output: {}", e)))
    }
}

#[async_trait]
impl Interpreter for PythonInterpreter {
    fn describe(&self) -> String {
        format!("Python {}", self.version)
    }

    async fn execute(&self, program: &str) -> Result<String, BridgeError> {
        let output = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_process(program))
                .await
                .map_err(|_| {
                    tracing::warn!("script exceeded {:?}, killing interpreter", limit);
                    BridgeError::Timeout(limit)
                })??,
            None => self.run_process(program).await?,
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(BridgeError::script(exception_message(&stderr)))
        }
    }
}

/// Pull the exception line (`ValueError: ...`) out of a traceback.
fn exception_message(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Script exited with an error".to_string())
}
