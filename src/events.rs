use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, EXPORT_FILE};

/// Lines moved per PageUp/PageDown in the log panel.
const LOG_PAGE: usize = 5;

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
    // Ignore key releases on terminals that report them
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if ctrl => app.quit(),

        // Dashboard controls
        KeyCode::Char('d') if ctrl => app.toggle_demo(Instant::now()),
        KeyCode::Char('l') if ctrl => app.clear_logs(),
        KeyCode::F(11) | KeyCode::Char('f') => app.toggle_fullscreen(),
        KeyCode::Char('r') => app.refresh_now(),

        // Log scrolling
        KeyCode::PageUp | KeyCode::Up | KeyCode::Char('k') => app.scroll_logs_up(
            if key.code == KeyCode::PageUp { LOG_PAGE } else { 1 },
        ),
        KeyCode::PageDown | KeyCode::Down | KeyCode::Char('j') => app.scroll_logs_down(
            if key.code == KeyCode::PageDown { LOG_PAGE } else { 1 },
        ),
        KeyCode::Home => app.scroll_logs_oldest(),
        KeyCode::End => app.scroll_logs_newest(),

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
