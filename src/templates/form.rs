//! # Form Templates
//!
//! [`FormTemplate`] covers every template that is "a few input fields, one
//! script, one result": add, dice, greet, stats, fibonacci and palindrome.
//! Each is described by a static [`FormSpec`].

use super::{CallRequest, KeyOutcome, TemplateUnit};
use crate::bridge::{BridgeError, ScriptArg};
use crate::ui::widgets::{render_output, run_hint, CallResult, RenderContext, TextInput};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// How a field's text becomes a script argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Passed through verbatim as a string.
    Text,
    /// Parsed as a float; unparseable or NaN input falls back.
    Number { fallback: f64 },
    /// Parsed as an integer; unparseable input falls back.
    Integer { fallback: i64 },
}

impl FieldKind {
    pub fn to_arg(self, raw: &str) -> ScriptArg {
        match self {
            Self::Text => ScriptArg::Str(raw.to_string()),
            Self::Number { fallback } => {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| !v.is_nan())
                    .unwrap_or(fallback);
                ScriptArg::Float(value)
            }
            Self::Integer { fallback } => {
                // "5.5" counts as 5
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map_or(fallback, |v| v.trunc() as i64);
                ScriptArg::Int(value)
            }
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(self, Self::Text)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub initial: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub struct FormSpec {
    pub title: &'static str,
    pub filename: &'static str,
    pub script: &'static str,
    pub fields: &'static [FieldSpec],
    /// Text on the run trigger.
    pub action: &'static str,
}

pub struct FormTemplate {
    spec: &'static FormSpec,
    inputs: Vec<TextInput>,
    focused_field: usize,
    output: CallResult,
    running: bool,
}

impl FormTemplate {
    pub fn new(spec: &'static FormSpec) -> Self {
        let inputs = spec
            .fields
            .iter()
            .map(|f| {
                if f.kind.is_numeric() {
                    TextInput::numeric(f.initial)
                } else {
                    TextInput::new(f.initial)
                }
            })
            .collect();
        Self {
            spec,
            inputs,
            focused_field: 0,
            output: CallResult::Empty,
            running: false,
        }
    }

    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    pub fn value(&self, field: usize) -> Option<&str> {
        self.inputs.get(field).map(TextInput::value)
    }

    /// Overwrite field values in order, e.g. from the command line.
    pub fn set_values(&mut self, values: &[String]) -> anyhow::Result<()> {
        if values.len() != self.inputs.len() {
            anyhow::bail!(
                "'{}' takes {} value(s) ({}), got {}",
                self.spec.title,
                self.inputs.len(),
                self.spec
                    .fields
                    .iter()
                    .map(|f| f.label)
                    .collect::<Vec<_>>()
                    .join(", "),
                values.len()
            );
        }
        for (input, value) in self.inputs.iter_mut().zip(values) {
            input.set_value(value);
        }
        Ok(())
    }

    /// Arguments for the script, derived from the current input.
    pub fn args(&self) -> Vec<ScriptArg> {
        self.spec
            .fields
            .iter()
            .zip(&self.inputs)
            .map(|(field, input)| field.kind.to_arg(input.value()))
            .collect()
    }

    fn focus_next(&mut self) {
        if !self.inputs.is_empty() {
            self.focused_field = (self.focused_field + 1) % self.inputs.len();
        }
    }

    fn focus_previous(&mut self) {
        if !self.inputs.is_empty() {
            self.focused_field = self
                .focused_field
                .checked_sub(1)
                .unwrap_or(self.inputs.len() - 1);
        }
    }
}

impl TemplateUnit for FormTemplate {
    fn title(&self) -> &'static str {
        self.spec.title
    }

    fn filename(&self) -> &'static str {
        self.spec.filename
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Enter => KeyOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                KeyOutcome::Consumed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                KeyOutcome::Consumed
            }
            _ => match self.inputs.get_mut(self.focused_field) {
                Some(input) => {
                    if input.handle_key(&key) {
                        KeyOutcome::Consumed
                    } else {
                        KeyOutcome::Ignored
                    }
                }
                None => KeyOutcome::Ignored,
            },
        }
    }

    fn begin_call(&mut self, ready: bool) -> Option<CallRequest> {
        if !ready || self.running {
            return None;
        }
        self.running = true;
        self.output = CallResult::Empty;
        Some(CallRequest {
            script: self.spec.script,
            args: self.args(),
        })
    }

    fn complete_call(&mut self, outcome: Result<String, BridgeError>) {
        self.output = match outcome {
            Ok(out) => CallResult::Success(out),
            Err(e) => CallResult::Error(e.to_string()),
        };
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn output(&self) -> &CallResult {
        &self.output
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut constraints: Vec<Constraint> =
            self.inputs.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(2)); // Run hint
        constraints.push(Constraint::Min(3)); // Output

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, (field, input)) in self.spec.fields.iter().zip(&self.inputs).enumerate() {
            input.render(
                frame,
                chunks[i],
                field.label,
                field.placeholder,
                ctx,
                i == self.focused_field,
            );
        }

        let n = self.inputs.len();
        let hint = run_hint(self.spec.action, true, self.running, ctx);
        frame.render_widget(Paragraph::new(vec![Line::from(""), hint]), chunks[n]);
        render_output(frame, chunks[n + 1], &self.output, self.running, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    static TWO_FIELDS: FormSpec = FormSpec {
        title: "Add Two Numbers",
        filename: "add.py",
        script: "def run(a, b):\n    return a + b\n",
        fields: &[
            FieldSpec {
                label: "a",
                placeholder: "a",
                initial: "12",
                kind: FieldKind::Number { fallback: 0.0 },
            },
            FieldSpec {
                label: "b",
                placeholder: "b",
                initial: "30",
                kind: FieldKind::Number { fallback: 0.0 },
            },
        ],
        action: "Run",
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_number_fallback() {
        let kind = FieldKind::Number { fallback: 0.0 };
        assert_eq!(kind.to_arg(" 12 "), ScriptArg::Float(12.0));
        assert_eq!(kind.to_arg("abc"), ScriptArg::Float(0.0));
        assert_eq!(kind.to_arg(""), ScriptArg::Float(0.0));
        assert_eq!(kind.to_arg("NaN"), ScriptArg::Float(0.0));
    }

    #[test]
    fn test_integer_fallback() {
        let kind = FieldKind::Integer { fallback: 10 };
        assert_eq!(kind.to_arg("5"), ScriptArg::Int(5));
        assert_eq!(kind.to_arg("0"), ScriptArg::Int(0));
        assert_eq!(kind.to_arg("-3"), ScriptArg::Int(-3));
        assert_eq!(kind.to_arg("lots"), ScriptArg::Int(10));
    }

    #[test]
    fn test_integer_truncates_decimals() {
        let kind = FieldKind::Integer { fallback: 10 };
        assert_eq!(kind.to_arg("5.5"), ScriptArg::Int(5));
        assert_eq!(kind.to_arg(" 7.99 "), ScriptArg::Int(7));
        assert_eq!(kind.to_arg("-2.7"), ScriptArg::Int(-2));
        assert_eq!(kind.to_arg("inf"), ScriptArg::Int(10));
    }

    #[test]
    fn test_text_passthrough() {
        assert_eq!(
            FieldKind::Text.to_arg("  spaced  "),
            ScriptArg::Str("  spaced  ".to_string())
        );
    }

    #[test]
    fn test_initial_args() {
        let form = FormTemplate::new(&TWO_FIELDS);
        assert_eq!(
            form.args(),
            vec![ScriptArg::Float(12.0), ScriptArg::Float(30.0)]
        );
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        assert_eq!(form.handle_key(key(KeyCode::Tab)), KeyOutcome::Consumed);
        assert_eq!(form.handle_key(key(KeyCode::Char('5'))), KeyOutcome::Consumed);
        assert_eq!(form.value(0), Some("12"));
        assert_eq!(form.value(1), Some("305"));
        form.handle_key(key(KeyCode::BackTab));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.value(0), Some("1"));
    }

    #[test]
    fn test_enter_submits() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyOutcome::Submit);
    }

    #[test]
    fn test_begin_call_requires_ready() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        assert!(form.begin_call(false).is_none());
        assert!(!form.is_running());
    }

    #[test]
    fn test_begin_call_refuses_while_running() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        let request = form.begin_call(true).expect("first call starts");
        assert_eq!(request.script, TWO_FIELDS.script);
        assert!(form.is_running());
        assert!(form.begin_call(true).is_none());
    }

    #[test]
    fn test_begin_call_clears_previous_output() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        form.begin_call(true);
        form.complete_call(Ok("42".to_string()));
        assert_eq!(form.output().success(), Some("42"));

        form.begin_call(true);
        assert!(form.output().is_empty());
    }

    #[test]
    fn test_complete_call_error_releases_running() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        form.begin_call(true);
        form.complete_call(Err(BridgeError::script("ZeroDivisionError: division by zero")));
        assert!(!form.is_running());
        assert_eq!(
            form.output().error(),
            Some("ZeroDivisionError: division by zero")
        );
        assert!(form.output().success().is_none());
    }

    #[test]
    fn test_set_values_checks_arity() {
        let mut form = FormTemplate::new(&TWO_FIELDS);
        assert!(form.set_values(&["1".to_string()]).is_err());
        form.set_values(&["1".to_string(), "2.5".to_string()])
            .expect("two values");
        assert_eq!(form.args(), vec![ScriptArg::Float(1.0), ScriptArg::Float(2.5)]);
    }
}
