use crate::bridge::{BridgeError, RuntimeStatus};
use crate::shell::{Shell, TemplateDescriptor};
use crate::templates::{CallRequest, KeyOutcome};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Sidebar,
    Template,
}

/// Messages delivered to the UI loop from background tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Status(RuntimeStatus),
    /// Initialization failed; carries the reason for the footer.
    InitFailed(String),
    CallFinished {
        unit_id: &'static str,
        outcome: Result<String, BridgeError>,
    },
}

pub struct App {
    pub shell: Shell,
    /// Highlighted sidebar row, independent of the active template.
    pub selected_index: usize,
    pub focus: FocusPane,
    pub runtime_status: RuntimeStatus,
    pub runtime_error: Option<String>,
    pub runtime_name: Option<String>,
    pub should_quit: bool,
    pub show_info: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(shell: Shell, theme: Theme) -> Self {
        Self {
            shell,
            selected_index: 0,
            focus: FocusPane::Sidebar,
            runtime_status: RuntimeStatus::Idle,
            runtime_error: None,
            runtime_name: None,
            should_quit: false,
            show_info: false,
            theme,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.runtime_status.is_ready()
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Sidebar if self.shell.active_unit().is_some() => FocusPane::Template,
            FocusPane::Sidebar => FocusPane::Sidebar,
            FocusPane::Template => FocusPane::Sidebar,
        };
    }

    pub fn next(&mut self) {
        let count = self.shell.descriptors().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    pub fn previous(&mut self) {
        let count = self.shell.descriptors().len();
        if count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = count - 1;
            }
        }
    }

    pub fn highlighted(&self) -> Option<&'static TemplateDescriptor> {
        self.shell.descriptors().get(self.selected_index)
    }

    /// Activate the highlighted template and move focus into it.
    pub fn open_highlighted(&mut self) {
        let Some(descriptor) = self.highlighted() else {
            return;
        };
        match self.shell.select(descriptor.id) {
            Ok(()) => self.focus = FocusPane::Template,
            Err(e) => tracing::warn!("{}", e),
        }
    }

    /// Forward a key to the active template. Returns the call it wants
    /// started, if any.
    pub fn handle_template_key(&mut self, key: KeyEvent) -> Option<(&'static str, CallRequest)> {
        let ready = self.is_ready();
        let id = self.shell.selection().active()?;
        let unit = self.shell.active_unit_mut()?;
        match unit.handle_key(key) {
            KeyOutcome::Submit => unit.begin_call(ready).map(|request| (id, request)),
            KeyOutcome::Consumed | KeyOutcome::Ignored => None,
        }
    }

    /// Route a key press. Returns the call to start, if the key submitted
    /// the active template.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<(&'static str, CallRequest)> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.show_info {
            if matches!(key.code, KeyCode::Char('i') | KeyCode::Esc) {
                self.toggle_info();
            }
            return None;
        }

        match self.focus {
            FocusPane::Sidebar => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                    KeyCode::Char('j') | KeyCode::Down => self.next(),
                    KeyCode::Char('k') | KeyCode::Up => self.previous(),
                    KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                        self.open_highlighted()
                    }
                    KeyCode::Tab => self.toggle_focus(),
                    KeyCode::Char('i') => self.toggle_info(),
                    KeyCode::Char('t') => self.cycle_theme(),
                    _ => {}
                }
                None
            }
            FocusPane::Template => {
                if key.code == KeyCode::Esc {
                    self.focus = FocusPane::Sidebar;
                    return None;
                }
                self.handle_template_key(key)
            }
        }
    }

    /// Apply a background event to the app state.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Status(status) => self.runtime_status = status,
            AppEvent::InitFailed(reason) => {
                self.runtime_status = RuntimeStatus::Error;
                self.runtime_error = Some(reason);
            }
            AppEvent::CallFinished { unit_id, outcome } => match self.shell.unit_mut(unit_id) {
                Some(unit) => unit.complete_call(outcome),
                None => tracing::warn!("call finished for unmounted template '{}'", unit_id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::registry;

    fn app() -> App {
        App::new(Shell::new(registry()), Theme::default_theme().clone())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous();
        assert_eq!(app.selected_index, registry().len() - 1);
        app.next();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_highlight_does_not_mount() {
        let mut app = app();
        app.next();
        app.next();
        assert_eq!(app.highlighted().map(|d| d.id), Some("add"));
        assert_eq!(app.shell.mounted_count(), 0);
    }

    #[test]
    fn test_open_highlighted_focuses_template() {
        let mut app = app();
        app.open_highlighted();
        assert_eq!(app.focus, FocusPane::Template);
        assert_eq!(app.shell.selection().active(), Some("hangman"));
    }

    #[test]
    fn test_toggle_focus_needs_active_template() {
        let mut app = app();
        app.toggle_focus();
        assert_eq!(app.focus, FocusPane::Sidebar);
        app.open_highlighted();
        app.toggle_focus();
        assert_eq!(app.focus, FocusPane::Sidebar);
        app.toggle_focus();
        assert_eq!(app.focus, FocusPane::Template);
    }

    #[test]
    fn test_submit_blocked_until_ready() {
        let mut app = app();
        app.selected_index = 2; // add
        app.open_highlighted();
        assert!(app.handle_template_key(key(KeyCode::Enter)).is_none());

        app.apply_event(AppEvent::Status(RuntimeStatus::Ready));
        let (id, request) = app
            .handle_template_key(key(KeyCode::Enter))
            .expect("call starts once ready");
        assert_eq!(id, "add");
        assert_eq!(request.args.len(), 2);
    }

    #[test]
    fn test_init_failure_sets_error() {
        let mut app = app();
        app.apply_event(AppEvent::Status(RuntimeStatus::Loading));
        app.apply_event(AppEvent::InitFailed("no python3".to_string()));
        assert_eq!(app.runtime_status, RuntimeStatus::Error);
        assert_eq!(app.runtime_error.as_deref(), Some("no python3"));
    }

    #[test]
    fn test_call_finished_reaches_hidden_unit() {
        let mut app = app();
        app.apply_event(AppEvent::Status(RuntimeStatus::Ready));
        app.selected_index = 2;
        app.open_highlighted();
        app.handle_template_key(key(KeyCode::Enter))
            .expect("call starts");

        // Switch away before the result arrives
        app.selected_index = 3;
        app.open_highlighted();
        app.apply_event(AppEvent::CallFinished {
            unit_id: "add",
            outcome: Ok("42".to_string()),
        });

        app.selected_index = 2;
        app.open_highlighted();
        let unit = app.shell.active_unit().expect("add is active");
        assert!(!unit.is_running());
        assert_eq!(unit.output().success(), Some("42"));
    }

    #[test]
    fn test_cycle_theme() {
        let mut app = app();
        let before = app.theme.name;
        app.cycle_theme();
        assert_ne!(app.theme.name, before);
    }
}
