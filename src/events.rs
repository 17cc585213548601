use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};

/// File written by the export key.
pub const EXPORT_FILE: &str = "weather_export.json";

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
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
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
        KeyCode::Char('1') => app.set_view(View::Conditions),
        KeyCode::Char('2') => app.set_view(View::Trends),

        // Repaint only; new readings arrive on the poll interval
        KeyCode::Char('r') => {
            app.request_redraw();
            app.set_status_message(format!(
                "Refreshed, next reading within {}s",
                app.config.interval_secs
            ));
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::data::Observation;
    use crate::source::ChannelSource;

    fn test_app() -> App {
        let (_tx, source) = ChannelSource::create("test");
        App::new(Box::new(source), MonitorConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_view_keys() {
        let mut app = test_app();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Trends);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_view, View::Conditions);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_view, View::Trends);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_view, View::Conditions);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_view, View::Trends);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = test_app();

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_refresh_key_does_not_poll() {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), MonitorConfig::default());
        tx.try_send(Observation::Error("offline".to_string())).unwrap();

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.ticks, 0);
        assert_eq!(app.history.count(), 0);
        assert!(app.take_redraw_request());
        assert_eq!(
            app.get_status_message(),
            Some("Refreshed, next reading within 60s")
        );

        // The queued tick is still picked up by the regular poll
        assert!(app.reload_data().unwrap());
        assert_eq!(app.history.count(), 1);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }
}
