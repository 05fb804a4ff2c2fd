//! # Templates Module
//!
//! A template unit is a script, an input form and an output renderer. Units
//! never talk to the interpreter themselves: the app asks a unit for a
//! [`CallRequest`], runs it through the [`Bridge`], and hands the outcome
//! back with [`TemplateUnit::complete_call`].
//!
//! ## Call Cycle
//!
//! ```text
//! begin_call(ready) ──▶ Some(CallRequest)   running = true, output cleared
//!        │                     │
//!        │              Bridge::call(...)
//!        │                     │
//!        └── None          complete_call(outcome)   running = false
//! ```
//!
//! `begin_call` returns `None` while the runtime is not ready or a call is
//! already in flight, which keeps calls from one unit strictly serialized.

pub mod catalog;
pub mod form;
pub mod hangman;

pub use form::{FieldKind, FieldSpec, FormSpec, FormTemplate};
pub use hangman::{GameState, HangmanTemplate};

use crate::bridge::{Bridge, BridgeError, ScriptArg};
use crate::ui::widgets::{CallResult, RenderContext};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// What a unit did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the app may interpret it.
    Ignored,
    /// Handled locally (text edit, field switch, reset).
    Consumed,
    /// The user asked to run the template.
    Submit,
}

/// A script invocation a unit wants performed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub script: &'static str,
    pub args: Vec<ScriptArg>,
}

pub trait TemplateUnit: Send {
    /// Panel title, e.g. "Fibonacci Sequence".
    fn title(&self) -> &'static str;

    /// Script file name shown under the title.
    fn filename(&self) -> &'static str;

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome;

    /// Start a call: mark the unit busy, clear the previous result and build
    /// the arguments from the current input.
    fn begin_call(&mut self, ready: bool) -> Option<CallRequest>;

    /// Store the outcome of the call started by `begin_call` and release the
    /// busy flag.
    fn complete_call(&mut self, outcome: Result<String, BridgeError>);

    fn is_running(&self) -> bool;

    /// The text currently shown in the output box.
    fn output(&self) -> &CallResult;

    /// Footer hint for the keys this unit understands.
    fn key_hint(&self) -> &'static str {
        "[Enter] Run  [Tab] Next field  [Esc] Back"
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext);
}

/// Run one full call cycle for `unit` against `bridge`.
///
/// Returns `false` if the unit declined to start a call.
pub async fn drive(unit: &mut dyn TemplateUnit, bridge: &Bridge) -> bool {
    let Some(request) = unit.begin_call(bridge.status().is_ready()) else {
        return false;
    };
    let outcome = bridge.call(request.script, &request.args).await;
    unit.complete_call(outcome);
    true
}
