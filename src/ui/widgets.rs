//! # Shared Template Widgets
//!
//! The presentational pieces every template is built from: a single-line
//! [`TextInput`], the [`CallResult`] shown in the output box, and the
//! runtime status pill.

use crate::bridge::RuntimeStatus;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Everything a template needs to draw itself.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    /// The template's own accent color from the registry
    pub accent: Color,
    pub status: RuntimeStatus,
    /// Whether keyboard focus is on the template panel
    pub focused: bool,
}

/// Outcome of the most recent call made by a template.
///
/// Success and error are mutually exclusive; a new call replaces either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallResult {
    #[default]
    Empty,
    Success(String),
    Error(String),
}

impl CallResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn success(&self) -> Option<&str> {
        match self {
            Self::Success(s) => Some(s),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Single-line editable text field with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    numeric: bool,
}

impl TextInput {
    pub fn new(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            cursor: initial.chars().count(),
            numeric: false,
        }
    }

    /// A field that only accepts characters that can appear in a number.
    pub fn numeric(initial: &str) -> Self {
        Self {
            numeric: true,
            ..Self::new(initial)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) -> bool {
        if self.numeric && !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    /// Apply an editing key. Returns `true` if the key was used.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// Columns scrolled off the left so the cursor stays inside a box
    /// `width` cells wide (borders included).
    pub fn scroll_offset(&self, width: u16) -> usize {
        self.cursor.saturating_sub(usize::from(width.saturating_sub(3)))
    }

    /// Draw the field inside a bordered box titled with `label`.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        placeholder: &str,
        ctx: &RenderContext,
        focused: bool,
    ) {
        let theme = ctx.theme;
        let focused = focused && ctx.focused;
        let border = if focused { ctx.accent } else { theme.fg_dim };
        let content = if self.value.is_empty() {
            Span::styled(placeholder.to_string(), Style::default().fg(theme.fg_dim))
        } else {
            Span::styled(self.value.clone(), Style::default().fg(theme.fg))
        };

        let scroll = self.scroll_offset(area.width);
        let paragraph = Paragraph::new(Line::from(content))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", label))
                    .border_style(Style::default().fg(border))
                    .style(Style::default().bg(theme.surface)),
            )
            .scroll((0, u16::try_from(scroll).unwrap_or(u16::MAX)));
        frame.render_widget(paragraph, area);

        if focused && area.width > 2 && area.height > 2 {
            let column = u16::try_from(self.cursor - scroll).unwrap_or(u16::MAX);
            let x = area.x + 1 + column.min(area.width - 3);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

/// Draw the output box for a template.
pub fn render_output(
    frame: &mut Frame,
    area: Rect,
    result: &CallResult,
    running: bool,
    ctx: &RenderContext,
) {
    let (theme, accent) = (ctx.theme, ctx.accent);
    let (text, style, border) = if running {
        (
            "Running…".to_string(),
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::ITALIC),
            accent,
        )
    } else {
        match result {
            CallResult::Empty => (
                "Output will appear here".to_string(),
                Style::default().fg(theme.fg_dim),
                theme.fg_dim,
            ),
            CallResult::Success(s) => (s.clone(), Style::default().fg(accent), accent),
            CallResult::Error(e) => (
                format!("⚠ {}", e),
                Style::default().fg(theme.error),
                theme.error,
            ),
        }
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Output ")
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Draw the run trigger hint, greyed out while it cannot fire.
///
/// `enabled` covers template-specific conditions; the runtime must also be
/// ready.
pub fn run_hint(label: &str, enabled: bool, running: bool, ctx: &RenderContext) -> Line<'static> {
    let enabled = enabled && ctx.status.is_ready();
    let text = if running {
        "⏳ Running…".to_string()
    } else {
        format!("▶ [Enter] {}", label)
    };
    let style = if enabled && !running {
        Style::default().fg(ctx.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ctx.theme.fg_dim)
    };
    Line::from(Span::styled(text, style))
}

/// Label shown in the status pill.
pub fn status_label(status: RuntimeStatus) -> &'static str {
    match status {
        RuntimeStatus::Idle => "Idle",
        RuntimeStatus::Loading => "Loading Python…",
        RuntimeStatus::Ready => "Python Ready",
        RuntimeStatus::Error => "Error",
    }
}

pub fn status_pill(status: RuntimeStatus, theme: &Theme) -> Span<'static> {
    let color = theme.status_color(status);
    Span::styled(
        format!(" ● {} ", status_label(status)),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
