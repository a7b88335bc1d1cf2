use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::NavOutcome;

use super::app::{App, Mode};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.flash = None;

    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Filter => handle_filter(app, key),
        Mode::Browse => handle_browse(app, key),
    }
}

fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.session.cancel(&mut app.view);
            app.mode = Mode::Browse;
        }
        KeyCode::Enter => {
            let dest = app.session.selected_entry().map(|e| e.target.line);
            app.session.activate(&mut app.view);
            app.mode = Mode::Browse;
            match dest {
                Some(line) => app.flash = Some(format!("line {}", line)),
                None => app.flash = Some("nothing to jump to".to_string()),
            }
        }
        KeyCode::Up => acknowledge(app, |app| app.session.move_by(-1, &mut app.view)),
        KeyCode::Down => acknowledge(app, |app| app.session.move_by(1, &mut app.view)),
        KeyCode::PageUp => {
            let page = app.page_size();
            acknowledge(app, |app| app.session.move_page(-1, page, &mut app.view));
        }
        KeyCode::PageDown => {
            let page = app.page_size();
            acknowledge(app, |app| app.session.move_page(1, page, &mut app.view));
        }
        KeyCode::Home => acknowledge(app, |app| app.session.move_first(&mut app.view)),
        KeyCode::End => acknowledge(app, |app| app.session.move_last(&mut app.view)),
        KeyCode::Backspace => {
            let mut query: String = app.session.query().to_string();
            match app.select_from.take() {
                // Deleting the selection deletes everything past the
                // prefix seed
                Some(from) => query = query.chars().take(from).collect(),
                None => {
                    query.pop();
                }
            }
            app.session.set_query(query);
        }
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            let mut query: String = match app.select_from.take() {
                // Overtyping replaces the selected tail
                Some(from) => app.session.query().chars().take(from).collect(),
                None => app.session.query().to_string(),
            };
            query.push(c);
            app.session.set_query(query);
        }
        _ => {}
    }
}

fn handle_browse(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => app.open_panel(),
        KeyCode::Up | KeyCode::Char('k') => app.view.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.view.scroll_by(1),
        KeyCode::PageUp => app.view.scroll_by(-(app.view.height.max(1) as isize)),
        KeyCode::PageDown => app.view.scroll_by(app.view.height.max(1) as isize),
        KeyCode::Home => {
            app.view.line = 1;
            app.view.recenter();
        }
        KeyCode::End => {
            app.view.line = app.view.total;
            app.view.recenter();
        }
        _ => {}
    }
}

/// Run a navigation op; a refused or shortened move gets the non-fatal
/// acknowledgment (bell + status flash), never an error.
fn acknowledge(app: &mut App, op: impl FnOnce(&mut App) -> NavOutcome) {
    let outcome = op(app);
    if outcome.hit_boundary() {
        app.bell = true;
        app.flash = Some(
            if app.session.is_empty() {
                "no entries"
            } else {
                "no further entries"
            }
            .to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Config;
    use crate::source::SymbolSource;
    use crate::tui::app::App;
    use std::path::PathBuf;

    fn app_for(text: &str) -> App {
        let source = SymbolSource::from_text(text);
        let mut app = App::new(PathBuf::from("test.rs"), source, Config::default());
        app.open_panel();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_edits_the_query_and_reranks() {
        let mut app = app_for("fn alpha() {}\nfn beta() {}\n");
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.session.query(), "be");
        assert_eq!(app.session.selected_entry().unwrap().label, "beta");
    }

    #[test]
    fn backspace_pops_the_query() {
        let mut app = app_for("fn alpha() {}\n");
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.query(), "a");
    }

    #[test]
    fn escape_cancels_back_to_the_origin() {
        let mut app = app_for("fn alpha() {}\nfn beta() {}\nfn gamma() {}\n");
        app.view.line = 3;
        app.open_panel();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.view.line, 2);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.view.line, 3);
        assert!(!app.session.is_open());
    }

    #[test]
    fn enter_activates_and_jumps() {
        let mut app = app_for("fn alpha() {}\nfn beta() {}\n");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.view.line, 2);
        assert!(!app.session.is_open());
    }

    #[test]
    fn boundary_moves_ring_the_bell() {
        let mut app = app_for("fn alpha() {}\n");
        press(&mut app, KeyCode::Up);
        assert!(app.bell);
        assert!(app.flash.is_some());
    }

    #[test]
    fn slash_reopens_with_remembered_selection() {
        let mut app = app_for("fn alpha() {}\nfn beta() {}\n");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Filter);
        assert_eq!(app.session.selected_entry().unwrap().label, "beta");
    }

    #[test]
    fn prefix_selection_is_replaced_by_typing() {
        let source = SymbolSource::from_text("fn get_a() {}\nfn set_a() {}\n");
        let mut config = Config::default();
        config.query.prefix = Some("get".to_string());
        let mut app = App::new(PathBuf::from("test.rs"), source, config);
        app.open_panel();
        assert_eq!(app.session.query(), "get");

        // First keystroke overtypes the seeded selection; the tail past
        // the prefix is empty, so the prefix itself stays
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.session.query(), "getx");
        assert_eq!(app.select_from, None);
    }

    #[test]
    fn browse_quit() {
        let mut app = app_for("fn alpha() {}\n");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
