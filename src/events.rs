use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

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
    // Ctrl+C always quits, whatever mode the keyboard is in
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the bed detail overlay is shown, handle overlay-specific keys
    if app.show_bed_detail {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through beds while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If the attach prompt is open, it owns the keyboard
    if app.attach_prompt.is_some() {
        handle_attach_input(app, key);
        return;
    }

    // The assistant view is a text console; most keys type
    if app.current_view == View::Assistant {
        handle_chat_input(app, key);
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access (bed detail is overlay-only, via Enter)
        KeyCode::Char('1') => app.set_view(View::Vitals),
        KeyCode::Char('2') => app.set_view(View::Beds),
        KeyCode::Char('3') => app.set_view(View::Assistant),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter bed detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Regenerate the simulation
        KeyCode::Char('r') => app.regenerate(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Sorting and status filter (Beds view)
        KeyCode::Char('s') => {
            if app.current_view == View::Beds {
                app.cycle_sort();
            }
        }
        KeyCode::Char('S') => {
            if app.current_view == View::Beds {
                app.toggle_sort_direction();
            }
        }
        KeyCode::Char('f') => {
            if app.current_view == View::Beds {
                app.cycle_status_filter();
            }
        }

        // Search (start typing to filter)
        KeyCode::Char('/') => {
            if app.current_view == View::Beds {
                app.start_filter();
            }
        }

        // Clear search
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("wardwatch_export.json");
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

/// Handle key input while the beds search filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle key input in the assistant console.
///
/// Printable characters go to the input line; control chords drive the
/// rest (Ctrl+N model, Ctrl+O attach, Ctrl+R sample query, Ctrl+X drop
/// last attachment).
fn handle_chat_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => app.chat.next_model(),
            KeyCode::Char('o') => app.start_attach(),
            KeyCode::Char('r') => app.chat.cycle_sample_query(),
            KeyCode::Char('x') => app.chat.pop_staged(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.send_chat(),
        KeyCode::Esc => app.go_back(),
        KeyCode::Backspace => {
            app.chat.input.pop();
        }
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char(c) => app.chat.input.push(c),
        _ => {}
    }
}

/// Handle key input while the attach-path prompt is open
fn handle_attach_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.confirm_attach(),
        KeyCode::Esc => app.cancel_attach(),
        KeyCode::Backspace => {
            if let Some(path) = app.attach_prompt.as_mut() {
                path.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(path) = app.attach_prompt.as_mut() {
                path.push(c);
            }
        }
        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Rows below the header, tabs and table header select beds
            if app.current_view == View::Beds && clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                if item_row < app.filtered_bed_count() {
                    app.selected_bed_index = item_row;
                }
            }

            // Tab clicks (row 1, after the header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Vitals (0-10), Beds (11-18), Assistant (19-32)
                if col < 11 {
                    app.set_view(View::Vitals);
                } else if col < 19 {
                    app.set_view(View::Beds);
                } else if col < 33 {
                    app.set_view(View::Assistant);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Responder;
    use crate::ui::Theme;

    fn test_app() -> (tokio::runtime::Runtime, App) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let responder = Responder::new(rt.handle().clone(), Duration::from_millis(10));
        let app = App::new(Some(7), responder, Theme::dark());
        (rt, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn press_ctrl(app: &mut App, c: char) {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_tab_cycles_views() {
        let (_rt, mut app) = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Beds);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Assistant);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Vitals);
    }

    #[test]
    fn test_q_quits_outside_the_console() {
        let (_rt, mut app) = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_typing_q_in_the_console_does_not_quit() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Assistant);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.chat.input, "q");
    }

    #[test]
    fn test_ctrl_c_quits_even_while_typing() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Assistant);
        press_ctrl(&mut app, 'c');
        assert!(!app.running);
    }

    #[test]
    fn test_enter_sends_the_typed_message() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Assistant);
        for c in "test".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.chat.messages.len(), 2);
        assert_eq!(app.chat.messages[1].content, "test");
        assert!(app.chat.input.is_empty());
    }

    #[test]
    fn test_search_mode_captures_characters() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Beds);
        press(&mut app, KeyCode::Char('/'));
        assert!(app.filter_active);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.filter_text, "dr");

        press(&mut app, KeyCode::Enter);
        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "dr");
    }

    #[test]
    fn test_help_swallows_the_next_key() {
        let (_rt, mut app) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running, "key closing help must not also act");
        assert!(!app.show_help);
    }

    #[test]
    fn test_attach_prompt_owns_the_keyboard() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Assistant);
        press_ctrl(&mut app, 'o');
        assert!(app.attach_prompt.is_some());

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.attach_prompt.as_deref(), Some("x"));
        assert!(app.chat.input.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.attach_prompt.is_none());
    }

    #[test]
    fn test_ctrl_n_cycles_model() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Assistant);
        let before = app.chat.selected_model;
        press_ctrl(&mut app, 'n');
        assert_ne!(app.chat.selected_model, before);
    }

    #[test]
    fn test_scroll_wheel_moves_bed_selection() {
        let (_rt, mut app) = test_app();
        app.set_view(View::Beds);
        let scroll_down = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, scroll_down, 3);
        assert_eq!(app.selected_bed_index, 1);
    }
}
