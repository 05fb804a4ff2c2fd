//! # UI Module
//!
//! Terminal user interface for the gallery.
//!
//! ## Components
//!
//! - [`App`] - Application state (sidebar highlight, focus, runtime status)
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`widgets`] - Text inputs, output box and status pill shared by templates
//! - [`theme`] - Color palettes
//! - [`config`] - Persisted settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │   Header                          ● Python Ready │
//! ├──────────────┬──────────────────────────────────┤
//! │              │                                  │
//! │  Templates   │   Active template                │
//! │  (sidebar)   │   (inputs, run hint, output)     │
//! │              │                                  │
//! ├──────────────┴──────────────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod render;
pub mod theme;
pub mod widgets;

pub use app::{App, AppEvent, FocusPane};
pub use render::render;
