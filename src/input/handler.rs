use scribe::fs::FileAccess;

use super::command::{Command, CommandParser, HELP, Zoom};
use crate::app::App;

/// Run one line of console input against the app
pub fn handle_line<F: FileAccess>(app: &mut App<F>, line: &str) {
    // Clear any message on new input
    app.clear_message();

    match CommandParser::parse(line) {
        Ok(command) => execute(app, command),
        Err(err) => app.set_message(err.to_string()),
    }
}

fn execute<F: FileAccess>(app: &mut App<F>, command: Command) {
    match command {
        // Tabs
        Command::New => app.new_tab(),
        Command::Open(path) => app.open(path),
        Command::Close { force } => app.close(force),
        Command::Tab(n) => app.switch_tab(n),
        Command::Next => app.next_tab(),
        Command::Prev => app.previous_tab(),
        Command::Tabs | Command::Show => app.redraw = true,

        // Files
        Command::Save => app.save(),
        Command::SaveAs(path) => app.save_as(path),

        // Editing
        Command::Append(text) => app.append(&text),
        Command::Undo => app.undo(),
        Command::Redo => app.redo(),
        Command::Select(span) => app.select_lines(span.first, span.last),
        Command::SelectAll => app.select_all(),
        Command::Copy => app.copy(),
        Command::Cut => app.cut(),
        Command::Paste => app.paste(),

        // Search
        Command::Find(query) => app.find(&query),
        Command::Replace { find, with } => app.replace(&find, &with),
        Command::Goto(line) => app.goto(line),

        // View
        Command::Zoom(Zoom::In) => app.zoom_in(),
        Command::Zoom(Zoom::Out) => app.zoom_out(),
        Command::Theme(mode) => app.set_theme(mode),
        Command::Lines => app.toggle_line_numbers(),
        Command::Info => app.info(),
        Command::Help => app.set_message(HELP),

        Command::Quit { force } => app.request_quit(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe::config::Settings;
    use scribe::fs::DiskFiles;

    #[test]
    fn runs_a_small_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let mut app = App::new(Settings::default(), DiskFiles);

        for line in ["append milk", "append eggs", "replace /eggs/bread/"] {
            handle_line(&mut app, line);
        }
        handle_line(&mut app, &format!("saveas {}", path.display()));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "milk\nbread");
        assert_eq!(app.message.as_deref(), Some("File saved successfully!"));

        handle_line(&mut app, "new");
        handle_line(&mut app, &format!("open {}", path.display()));
        assert_eq!(app.session.len(), 2);
        assert_eq!(app.active().unwrap().display_name(), "list.txt");
    }

    #[test]
    fn parse_errors_become_messages() {
        let mut app = App::new(Settings::default(), DiskFiles);
        handle_line(&mut app, "bogus");
        assert!(app.message.as_deref().unwrap().starts_with("Unknown command"));
    }

    #[test]
    fn cut_and_paste_move_lines_between_tabs() {
        let mut app = App::new(Settings::default(), DiskFiles);
        for line in ["append one", "append two", "append three", "select 2", "cut"] {
            handle_line(&mut app, line);
        }
        assert_eq!(app.active().unwrap().text(), "one\nthree");
        assert_eq!(app.clipboard, "two\n");

        handle_line(&mut app, "new");
        handle_line(&mut app, "paste");
        assert_eq!(app.active().unwrap().text(), "two\n");

        handle_line(&mut app, "undo");
        assert!(app.active().unwrap().is_empty());
    }

    #[test]
    fn zoom_and_theme_update_settings() {
        let mut app = App::new(Settings::default(), DiskFiles);
        handle_line(&mut app, "zoom in");
        assert_eq!(app.settings.font_size, 13);
        handle_line(&mut app, "theme dark");
        assert_eq!(app.theme.name, "dark");
        handle_line(&mut app, "lines");
        assert!(!app.settings.show_line_numbers);
    }
}
