//! Keyboard event handling tests
//!
//! Tests for key routing between the sidebar, the active template and the
//! info modal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pygallery::bridge::RuntimeStatus;
use pygallery::shell::{registry, Shell};
use pygallery::ui::app::FocusPane;
use pygallery::ui::theme::Theme;
use pygallery::ui::{App, AppEvent};

/// Helper to create a key event
fn key_event(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
}

fn press(app: &mut App, code: KeyCode) {
    if let Event::Key(key) = key_event(code) {
        app.handle_key(key);
    }
}

/// Helper to create a test app over the built-in registry
fn create_test_app() -> App {
    App::new(Shell::new(registry()), Theme::default_theme().clone())
}

#[tokio::test]
async fn test_quit_with_q_key() {
    let mut app = create_test_app();
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_quit_with_capital_q_key() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('Q'));
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_ctrl_c_quits_from_template() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus, FocusPane::Template);

    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[tokio::test]
async fn test_q_types_into_template_input() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Enter); // hangman
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);

    app.apply_event(AppEvent::Status(RuntimeStatus::Ready));
    let (id, request) = app
        .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()))
        .expect("secret submitted");
    assert_eq!(id, "hangman");
    assert_eq!(request.args.len(), 1);
}

#[tokio::test]
async fn test_info_modal_swallows_keys() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('i'));
    assert!(app.show_info);

    // Navigation and quit are ignored while the modal is open
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.selected_index, 0);
    assert!(!app.should_quit);

    press(&mut app, KeyCode::Esc);
    assert!(!app.show_info);
}

#[tokio::test]
async fn test_navigation_keys() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected_index, 2);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.selected_index, 1);
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.selected_index, registry().len() - 1);
}

#[tokio::test]
async fn test_esc_returns_to_sidebar_and_keeps_active() {
    let mut app = create_test_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.shell.selection().active(), Some("dice"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.focus, FocusPane::Sidebar);
    assert_eq!(app.shell.selection().active(), Some("dice"));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, FocusPane::Template);
}

#[tokio::test]
async fn test_theme_key_cycles() {
    let mut app = create_test_app();
    let before = app.theme.name;
    press(&mut app, KeyCode::Char('t'));
    assert_ne!(app.theme.name, before);
}
