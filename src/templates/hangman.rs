//! # Hangman Template
//!
//! A two-phase unit. In `Setup` the player types a secret word; submitting
//! it runs `hangman_init.py`, which returns the initial [`GameState`] as
//! JSON. In `Playing` each guess runs `hangman_guess.py` with the current
//! state and the guess, and the returned JSON replaces the state.
//!
//! All game rules live in the guess script. Rejections ("One letter at a
//! time!", "Game is already over.") arrive as ordinary states with a new
//! message, not as errors.

use super::{CallRequest, KeyOutcome, TemplateUnit};
use crate::bridge::{BridgeError, ScriptArg};
use crate::ui::widgets::{render_output, run_hint, CallResult, RenderContext, TextInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde::{Deserialize, Serialize};

pub const INIT_SCRIPT: &str = include_str!("scripts/hangman_init.py");
pub const GUESS_SCRIPT: &str = include_str!("scripts/hangman_guess.py");

/// Placeholder for an unrevealed position in the word bar.
pub const BLANK: &str = "_";

/// Game state as exchanged with the scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(rename = "secretword")]
    pub secret_letters: Vec<String>,
    #[serde(rename = "wordbar")]
    pub word_bar: Vec<String>,
    #[serde(rename = "wrongguess")]
    pub wrong_guesses: Vec<String>,
    #[serde(rename = "count")]
    pub wrong_count: u32,
    pub ended: bool,
    pub won: bool,
    pub message: String,
}

impl GameState {
    /// Wrong guesses allowed before the game is lost.
    pub fn max_wrong(&self) -> usize {
        self.secret_letters.len() + 1
    }

    /// The word bar as shown to the player, e.g. `C _ T`.
    pub fn display_bar(&self) -> String {
        self.word_bar
            .iter()
            .map(|c| c.to_uppercase())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingCall {
    Start,
    Guess,
}

enum Phase {
    Setup,
    Playing(GameState),
}

pub struct HangmanTemplate {
    phase: Phase,
    secret_input: TextInput,
    guess_input: TextInput,
    output: CallResult,
    pending: Option<PendingCall>,
}

impl Default for HangmanTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl HangmanTemplate {
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            secret_input: TextInput::new(""),
            guess_input: TextInput::new(""),
            output: CallResult::Empty,
            pending: None,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.phase {
            Phase::Playing(state) => Some(state),
            Phase::Setup => None,
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(self.phase, Phase::Setup)
    }

    /// Back to setup, discarding the game and all input.
    pub fn reset(&mut self) {
        self.phase = Phase::Setup;
        self.secret_input.clear();
        self.guess_input.clear();
        self.output = CallResult::Empty;
    }

    fn game_over(&self) -> bool {
        self.game().is_some_and(|g| g.ended)
    }

    fn active_input(&mut self) -> &mut TextInput {
        match self.phase {
            Phase::Setup => &mut self.secret_input,
            Phase::Playing(_) => &mut self.guess_input,
        }
    }

    fn apply_state(&mut self, raw: &str) -> Result<(), String> {
        let state: GameState =
            serde_json::from_str(raw).map_err(|e| format!("Invalid game state: {}", e))?;
        self.output = CallResult::Success(state.message.clone());
        self.phase = Phase::Playing(state);
        Ok(())
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, state: &GameState) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                state.display_bar(),
                Style::default()
                    .fg(ctx.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
        ];
        if !state.wrong_guesses.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Wrong: {}", state.wrong_guesses.join(", ")),
                    Style::default().fg(ctx.theme.error),
                ),
                Span::styled(
                    format!("   {}/{} mistakes", state.wrong_count, state.max_wrong()),
                    Style::default().fg(ctx.theme.fg_dim),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl TemplateUnit for HangmanTemplate {
    fn title(&self) -> &'static str {
        "Hangman"
    }

    fn filename(&self) -> &'static str {
        "hangman_init.py + hangman_guess.py"
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            // A reply still in flight would bring the discarded game back
            if self.pending.is_some() {
                return KeyOutcome::Ignored;
            }
            self.reset();
            return KeyOutcome::Consumed;
        }
        if key.code == KeyCode::Enter {
            return KeyOutcome::Submit;
        }
        if self.game_over() {
            return KeyOutcome::Ignored;
        }
        if self.active_input().handle_key(&key) {
            KeyOutcome::Consumed
        } else {
            KeyOutcome::Ignored
        }
    }

    fn begin_call(&mut self, ready: bool) -> Option<CallRequest> {
        if !ready || self.pending.is_some() {
            return None;
        }
        let request = match &self.phase {
            Phase::Setup => {
                let secret = self.secret_input.value().trim();
                if secret.is_empty() {
                    return None;
                }
                self.pending = Some(PendingCall::Start);
                CallRequest {
                    script: INIT_SCRIPT,
                    args: vec![ScriptArg::from(secret)],
                }
            }
            Phase::Playing(state) => {
                let guess = self.guess_input.value().trim();
                if guess.is_empty() || state.ended {
                    return None;
                }
                let state_json = serde_json::to_string(state).ok()?;
                self.pending = Some(PendingCall::Guess);
                CallRequest {
                    script: GUESS_SCRIPT,
                    args: vec![ScriptArg::Str(state_json), ScriptArg::from(guess)],
                }
            }
        };
        if let CallResult::Error(_) = self.output {
            self.output = CallResult::Empty;
        }
        Some(request)
    }

    fn complete_call(&mut self, outcome: Result<String, BridgeError>) {
        let pending = self.pending.take();
        let applied = outcome
            .map_err(|e| e.to_string())
            .and_then(|raw| self.apply_state(&raw));

        match applied {
            Ok(()) => {
                if pending == Some(PendingCall::Guess) {
                    self.guess_input.clear();
                }
            }
            Err(message) => {
                tracing::debug!("hangman call failed: {}", message);
                self.output = CallResult::Error(message);
            }
        }
    }

    fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    fn output(&self) -> &CallResult {
        &self.output
    }

    fn key_hint(&self) -> &'static str {
        match self.phase {
            Phase::Setup => "[Enter] Start game  [Esc] Back",
            Phase::Playing(_) => "[Enter] Guess  [Ctrl+R] New game  [Esc] Back",
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        match &self.phase {
            Phase::Setup => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Secret word
                        Constraint::Length(2), // Run hint
                        Constraint::Min(3),    // Output
                    ])
                    .split(area);

                self.secret_input.render(
                    frame,
                    chunks[0],
                    "Choose a secret word",
                    "Enter secret word…",
                    ctx,
                    true,
                );
                let enabled = !self.secret_input.value().trim().is_empty();
                let hint = run_hint("Start Game", enabled, self.is_running(), ctx);
                frame.render_widget(Paragraph::new(vec![Line::from(""), hint]), chunks[1]);
                render_output(frame, chunks[2], &self.output, self.is_running(), ctx);
            }
            Phase::Playing(state) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(5), // Word bar + wrong guesses
                        Constraint::Length(3), // Guess input
                        Constraint::Length(2), // Run hint
                        Constraint::Min(3),    // Output
                    ])
                    .split(area);

                self.render_board(frame, chunks[0], ctx, state);
                self.guess_input.render(
                    frame,
                    chunks[1],
                    "Guess a letter",
                    if state.ended {
                        "Game over - Ctrl+R for a new game"
                    } else {
                        "a-z"
                    },
                    ctx,
                    !state.ended,
                );
                let hint = run_hint("Guess", !state.ended, self.is_running(), ctx);
                frame.render_widget(Paragraph::new(vec![Line::from(""), hint]), chunks[2]);
                render_output(frame, chunks[3], &self.output, self.is_running(), ctx);
            }
        }
    }
}
