//! # Bridge Module
//!
//! Everything that crosses the boundary into the Python runtime goes through
//! here. Templates never touch the interpreter directly.
//!
//! ## Components
//!
//! | Item | Role |
//! |------|------|
//! | [`Bridge`] | One-time initialization, status, and the `run(...)` call |
//! | [`ScriptArg`] | Closed set of argument kinds and their Python literals |
//! | [`PythonLoader`] | Probes a `python3` executable and hands out an interpreter |
//! | [`BridgeError`] | Initialization, not-ready, script and transport failures |
//!
//! ## Script Contract
//!
//! Every script defines a top-level `run`. The bridge evaluates the source,
//! calls `run(args...)`, and returns `str()` of the result.

pub mod error;
pub mod marshal;
pub mod python;
pub mod runtime;

pub use error::BridgeError;
pub use marshal::ScriptArg;
pub use python::{PythonInterpreter, PythonLoader};
pub use runtime::{Bridge, Interpreter, RuntimeLoader, RuntimeStatus, StatusObserver};
