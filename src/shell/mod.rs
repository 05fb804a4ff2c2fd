//! # Shell Module
//!
//! The static template registry and the lazy-mount container around it.
//!
//! - [`registry()`] - ordered [`TemplateDescriptor`]s for the sidebar
//! - [`Shell`] - active template plus every unit mounted so far
//!
//! Rendering rule: a unit exists iff it has been selected at least once,
//! and is drawn iff it is the active one.

pub mod registry;
pub mod selection;

pub use registry::{registry, validate_registry, RegistryError, TemplateDescriptor};
pub use selection::{SelectionState, Shell};
