use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui;

/// File written by the export key.
pub const EXPORT_FILE: &str = "dashboard_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Direct view access
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.set_view(View::ALL[index]);
        }

        KeyCode::Char('r') => {
            app.refresh();
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.prev_view(),
        MouseEventKind::ScrollDown => app.next_view(),
        MouseEventKind::Down(MouseButton::Left) if mouse.row == ui::TAB_ROW => {
            if let Some(view) = ui::tab_at(mouse.column) {
                app.set_view(view);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::FetchOrchestrator;
    use crate::source::MockSource;
    use crate::ui::Theme;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let orchestrator = Arc::new(FetchOrchestrator::new(Arc::new(MockSource::new())));
        App::new(orchestrator, tokio::runtime::Handle::current(), Theme::dark())
    }

    #[tokio::test]
    async fn test_tab_navigation() {
        let mut app = app();

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Crypto);

        handle_key_event(&mut app, key(KeyCode::BackTab));
        handle_key_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.current_view, View::Overview);

        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, View::Rates);

        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.current_view, View::Banking);
    }

    #[tokio::test]
    async fn test_help_swallows_next_key() {
        let mut app = app();

        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_export_without_data_reports_failure() {
        let mut app = app();

        handle_key_event(&mut app, key(KeyCode::Char('e')));
        assert!(app.get_status_message().unwrap().starts_with("Export failed"));
    }

    #[tokio::test]
    async fn test_refresh_key_loads_dashboard() {
        let mut app = app();

        handle_key_event(&mut app, key(KeyCode::Char('r')));
        for _ in 0..10 {
            tokio::task::yield_now().await;
            app.sync_state();
            if app.dashboard.is_some() {
                break;
            }
        }
        assert!(app.dashboard.is_some());
    }

    #[tokio::test]
    async fn test_tab_click() {
        let mut app = app();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: ui::TAB_ROW,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse_event(&mut app, click);
        assert_eq!(app.current_view, View::Crypto);
    }
}
