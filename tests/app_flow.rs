use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use student_roster::{App, Group, Panel, Roster};

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key(code)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

/// Open the add panel and fill it in. `group_steps` is how many times the
/// group selector is advanced from "Select Group".
fn add_student(app: &mut App, first: &str, last: &str, works: bool, group_steps: usize) {
    press(app, KeyCode::Char('+'));
    type_text(app, first);
    press(app, KeyCode::Tab);
    type_text(app, last);
    press(app, KeyCode::Tab);
    if works {
        press(app, KeyCode::Char(' '));
    }
    press(app, KeyCode::Tab);
    for _ in 0..group_steps {
        press(app, KeyCode::Right);
    }
    press(app, KeyCode::Enter);
}

fn seeded_app() -> App {
    let mut app = App::new(Roster::new());
    add_student(&mut app, "Vali", "Toshev", true, 1);
    add_student(&mut app, "Olim", "Aliev", false, 2);
    app
}

fn visible_names(app: &App) -> Vec<String> {
    app.visible_students().iter().map(|s| s.full_name()).collect()
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn adding_students_through_the_form() {
    let app = seeded_app();

    assert_eq!(visible_names(&app), vec!["Vali Toshev", "Olim Aliev"]);
    let list = app.roster().list();
    assert!(list[0].does_work);
    assert_eq!(list[0].group, Group::N58);
    assert!(!list[1].does_work);
    assert_eq!(list[1].group, Group::N65);
    assert_eq!(app.roster().panel(), Panel::Closed);
    assert_eq!(app.status_text(), Some("Added Olim Aliev."));
}

#[test]
fn search_filters_case_insensitively_and_esc_clears() {
    let mut app = seeded_app();

    press(&mut app, KeyCode::Char('f'));
    assert!(app.is_searching());
    // "Vali" and "Aliev" both contain "ali".
    type_text(&mut app, "ALI");
    assert_eq!(visible_names(&app), vec!["Vali Toshev", "Olim Aliev"]);

    type_text(&mut app, "EV");
    assert_eq!(visible_names(&app), vec!["Olim Aliev"]);

    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "zz");
    assert!(app.visible_students().is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.is_searching());
    assert_eq!(visible_names(&app), vec!["Vali Toshev", "Olim Aliev"]);
}

#[test]
fn group_filter_combines_with_search() {
    let mut app = seeded_app();

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(visible_names(&app), vec!["Vali Toshev"]);

    press(&mut app, KeyCode::Char('f'));
    type_text(&mut app, "liev");
    press(&mut app, KeyCode::Enter);
    assert!(app.visible_students().is_empty());

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(visible_names(&app), vec!["Olim Aliev"]);

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(visible_names(&app), vec!["Vali Toshev", "Olim Aliev"]);
}

#[test]
fn editing_keeps_id_and_position() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Home);
    let original = app.selected_student().cloned().expect("a selected student");

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.roster().panel(), Panel::Editing(original.id));
    assert_eq!(app.roster().draft().first_name, "Vali");

    for _ in 0.."Vali".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "Aziz");
    press(&mut app, KeyCode::Enter);

    let list = app.roster().list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, original.id);
    assert_eq!(list[0].first_name, "Aziz");
    assert_eq!(list[0].last_name, "Toshev");
    assert_eq!(app.status_text(), Some("Updated Aziz Toshev."));
}

#[test]
fn delete_requires_confirmation() {
    let mut app = seeded_app();
    press(&mut app, KeyCode::Home);

    press(&mut app, KeyCode::Char('-'));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.roster().records().len(), 2);

    press(&mut app, KeyCode::Char('-'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(visible_names(&app), vec!["Olim Aliev"]);
    assert_eq!(app.status_text(), Some("Deleted Vali Toshev."));
}

#[test]
fn incomplete_form_stays_open_until_cancelled() {
    let mut app = App::new(Roster::new());

    press(&mut app, KeyCode::Char('+'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.roster().panel(), Panel::Creating);
    assert_eq!(app.status_text(), Some("First name is required."));

    type_text(&mut app, "Vali");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Toshev");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status_text(), Some("Group is required."));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.roster().panel(), Panel::Closed);
    assert!(app.roster().records().is_empty());
}

#[test]
fn edit_and_delete_with_empty_roster_report_errors() {
    let mut app = App::new(Roster::new());
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.status_text(), Some("No student selected to edit."));
    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.status_text(), Some("No student selected to delete."));
    assert_eq!(app.roster().panel(), Panel::Closed);
}

#[test]
fn quit_keys_exit() {
    let mut app = App::new(Roster::new());
    assert!(press(&mut app, KeyCode::Char('q')));

    // 'q' typed into the form is text, not a quit.
    press(&mut app, KeyCode::Char('+'));
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(app.roster().draft().first_name, "q");
}

#[test]
fn panel_title_follows_panel_state() {
    let mut app = seeded_app();
    let screen = render(&app);
    assert!(screen.contains("Students (2 of 2)"));
    assert!(screen.contains("Toshev"));
    assert!(screen.contains("Yes"));

    press(&mut app, KeyCode::Char('+'));
    assert!(render(&app).contains("Add Student"));
    press(&mut app, KeyCode::Esc);

    press(&mut app, KeyCode::Char('e'));
    assert!(render(&app).contains("Edit Student"));
}

#[test]
fn empty_roster_renders_hint() {
    let app = App::new(Roster::new());
    assert!(render(&app).contains("No students yet."));
}

#[test]
fn long_input_keeps_cursor_inside_the_frame() {
    let mut app = seeded_app();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");

    press(&mut app, KeyCode::Char('f'));
    type_text(&mut app, &"x".repeat(300));
    terminal.draw(|frame| app.draw(frame)).expect("draw");
    let cursor = terminal.get_cursor_position().expect("cursor");
    assert!(cursor.x < 100);

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('+'));
    type_text(&mut app, &"y".repeat(300));
    terminal.draw(|frame| app.draw(frame)).expect("draw");
    let cursor = terminal.get_cursor_position().expect("cursor");
    assert!(cursor.x < 100);
    assert_eq!(app.roster().draft().first_name.len(), 300);
}
