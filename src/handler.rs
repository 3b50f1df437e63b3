use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ftree::NodeKind;

use crate::app::{App, AppMode};

/// Handle a key event: route it to the rename editor, the search prompt, or
/// the normal-mode bindings, in that order.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // An open rename editor owns the keyboard.
    if app.tree.is_renaming() {
        app.tree.handle_key(key);
        return;
    }

    match app.mode {
        AppMode::Search => handle_search_key(app, key),
        AppMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = AppMode::Normal;
            app.search_input.clear();
            app.tree.clear_search();
        }
        KeyCode::Enter => {
            let term = app.search_input.clone();
            app.tree.apply_search(&term);
            app.mode = AppMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            let term = app.search_input.clone();
            app.tree.input_search(&term);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            let term = app.search_input.clone();
            app.tree.input_search(&term);
        }
        // Arrows still traverse while the prompt is open.
        KeyCode::Up | KeyCode::Down => {
            app.tree.handle_key(key);
        }
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') => {
            app.search_input = app.tree.search_input().to_string();
            app.mode = AppMode::Search;
        }
        KeyCode::Char(' ') => {
            if let Some(focused) = app.tree.focused().map(str::to_string) {
                app.tree.toggle_select(&focused);
            }
        }
        KeyCode::Char('c') => app.tree.clear_selection(),
        KeyCode::Char('f') => {
            if let Some(focused) = app.tree.focused().map(str::to_string) {
                app.tree.toggle_favorite(&focused);
            }
        }
        KeyCode::Char('r') | KeyCode::F(2) => {
            if let Some(focused) = app.tree.focused().map(str::to_string) {
                app.tree.begin_rename(&focused);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let targets = app.operation_targets();
            app.tree.request_delete(targets);
        }
        KeyCode::Char('y') => {
            let targets = app.operation_targets();
            app.tree.copy(targets);
        }
        KeyCode::Char('x') => {
            let targets = app.operation_targets();
            app.tree.cut(targets);
        }
        KeyCode::Char('p') => {
            let target = app.paste_target();
            app.tree.paste(&target);
        }
        KeyCode::Char('n') => {
            let parent = app.paste_target();
            app.tree.request_create(&parent, NodeKind::File);
        }
        KeyCode::Char('N') => {
            let parent = app.paste_target();
            app.tree.request_create(&parent, NodeKind::Folder);
        }
        // Keyboard-driven drag: grab the focused row, traverse to a target,
        // drop with 'm'; Esc cancels inside the engine.
        KeyCode::Char('D') => {
            if let Some(focused) = app.tree.focused().map(str::to_string) {
                app.tree.begin_drag(&focused);
            }
        }
        KeyCode::Char('m') => {
            if let Some(focused) = app.tree.focused().map(str::to_string) {
                app.tree.drop_on(&focused);
            }
        }
        _ => {
            app.tree.handle_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftree::config::AppConfig;
    use ftree::Node;

    fn app() -> App {
        let root: Node =
            serde_json::from_str(r#"{"src": {"a.ts": null, "b.ts": null}, "readme.md": null}"#)
                .unwrap();
        App::new(root, &AppConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
        app.apply_requests();
    }

    #[test]
    fn q_quits_in_normal_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut app = app();
        app.mode = AppMode::Search;
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn space_toggles_selection_of_the_focused_row() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.tree.is_selected("src"));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.tree.is_selected("src"));
    }

    #[test]
    fn search_mode_types_and_applies_on_enter() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::Search);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.search_input, "a.");
        // 'q' is input here, not quit.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.tree.active_search(), "a.");
    }

    #[test]
    fn escape_leaves_search_and_restores_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.tree.active_search(), "");
        assert_eq!(app.tree.rows().len(), 4);
    }

    #[test]
    fn rename_editor_captures_all_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('r'));
        assert!(app.tree.is_renaming());
        press(&mut app, KeyCode::Char('q')); // typed, not quit
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.tree.is_renaming());
    }

    #[test]
    fn cut_and_paste_via_keys_moves_the_focused_row() {
        let mut app = app();
        press(&mut app, KeyCode::Down); // src
        press(&mut app, KeyCode::Down); // src/a.ts
        press(&mut app, KeyCode::Char('x'));
        // Move focus to readme.md (top level) and paste there.
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.tree.focused(), Some("readme.md"));
        press(&mut app, KeyCode::Char('p'));
        assert!(app.root.contains("a.ts"));
        assert!(!app.root.contains("src/a.ts"));
    }

    #[test]
    fn keyboard_drag_and_drop_moves_rows() {
        let mut app = app();
        press(&mut app, KeyCode::Down); // src
        press(&mut app, KeyCode::Down); // src/a.ts
        press(&mut app, KeyCode::Char('D'));
        assert!(app.tree.is_dragging());
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.tree.focused(), Some("readme.md"));
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.tree.is_dragging());
        assert!(app.root.contains("a.ts"));
    }

    #[test]
    fn delete_key_removes_the_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' ')); // select src/a.ts
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.root.contains("src/a.ts"));
    }

    #[test]
    fn create_folder_lands_under_the_focused_dir() {
        let mut app = app();
        press(&mut app, KeyCode::Down); // src
        press(&mut app, KeyCode::Char('N'));
        assert!(app.root.contains("src/new-folder"));
    }
}
