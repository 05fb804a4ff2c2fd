//! Python Template Gallery - a terminal gallery of small Python programs
//!
//! This library provides the runtime bridge to a Python 3 interpreter, the
//! template registry with lazy mounting, the template units themselves, and
//! the TUI that hosts them.

pub mod bridge;
pub mod shell;
pub mod templates;
pub mod ui;
