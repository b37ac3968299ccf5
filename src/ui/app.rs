use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::models::Student;
use crate::store::{Panel, Roster, StoreError};

use super::forms::{ConfirmStudentDelete, StudentField, StudentForm};
use super::helpers::{centered_rect, cursor_column, key_hints};
use super::screens::RosterScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the search / group filter bar above the table.
const QUERY_BAR_HEIGHT: u16 = 3;
/// Rows skipped by PageUp / PageDown.
const PAGE_STEP: isize = 5;

/// Modes layered over the roster table. Keeping this explicit makes it easy
/// to reason about which overlay is drawn and what each key does.
enum Mode {
    Normal,
    /// Add/edit panel open. The draft lives in the roster; this is only focus
    /// and error state.
    Form(StudentForm),
    ConfirmDelete(ConfirmStudentDelete),
    Searching,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    roster: Roster,
    screen: RosterScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(roster: Roster) -> Self {
        let screen = RosterScreen::new(roster.list());
        Self {
            roster,
            screen,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Rows currently shown in the table, in roster order.
    pub fn visible_students(&self) -> &[Student] {
        &self.screen.visible
    }

    /// Student under the highlight, if any.
    pub fn selected_student(&self) -> Option<&Student> {
        self.screen.current_student()
    }

    /// Text of the footer status line, if one is showing.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    /// Whether the search bar currently has keyboard focus.
    pub fn is_searching(&self) -> bool {
        matches!(self.mode, Mode::Searching)
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Form(form) => self.handle_form(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Searching => self.handle_search(code),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                self.roster.begin_create();
                return Mode::Form(StudentForm::default());
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                let Some(id) = self.screen.current_student().map(|s| s.id) else {
                    self.set_status("No student selected to edit.", StatusKind::Error);
                    return Mode::Normal;
                };
                self.clear_status();
                // A stale row simply leaves the panel closed.
                if self.roster.begin_edit(id) {
                    return Mode::Form(StudentForm::default());
                }
                self.refresh_view();
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(student) = self.screen.current_student() {
                    let confirm = ConfirmStudentDelete::from(student);
                    self.clear_status();
                    return Mode::ConfirmDelete(confirm);
                }
                self.set_status("No student selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Mode::Searching;
            }
            KeyCode::Char('g') => self.cycle_group_filter(true),
            KeyCode::Char('G') => self.cycle_group_filter(false),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.screen.query.is_active() {
                    self.screen.query = Default::default();
                    self.refresh_view();
                    self.set_status("Search and group filter cleared.", StatusKind::Info);
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_form(&mut self, code: KeyCode, mut form: StudentForm) -> Mode {
        let Some(draft) = self.roster.draft_mut() else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Esc => {
                let message = match self.roster.panel() {
                    Panel::Editing(_) => "Edit cancelled.",
                    _ => "Add student cancelled.",
                };
                self.roster.cancel();
                self.set_status(message, StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.backspace(draft),
            KeyCode::Left => {
                form.cycle_group(draft, false);
            }
            KeyCode::Right => {
                form.cycle_group(draft, true);
            }
            KeyCode::Char(' ') if form.toggle(draft) => {}
            KeyCode::Char(ch) => {
                if form.push_char(draft, ch) {
                    form.error = None;
                }
            }
            KeyCode::Enter => return self.submit_form(form),
            _ => {}
        }

        Mode::Form(form)
    }

    /// Commit the open draft and decide which mode follows.
    fn submit_form(&mut self, mut form: StudentForm) -> Mode {
        let editing = matches!(self.roster.panel(), Panel::Editing(_));
        match self.roster.submit() {
            Ok(student) => {
                self.refresh_view();
                self.screen.focus(student.id);
                let verb = if editing { "Updated" } else { "Added" };
                self.set_status(
                    format!("{verb} {}.", student.full_name()),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            Err(err @ StoreError::IncompleteDraft(_)) => {
                let message = err.to_string();
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                Mode::Form(form)
            }
            Err(err) => {
                warn!(error = %err, "submit failed");
                self.refresh_view();
                self.set_status(err.to_string(), StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmStudentDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if self.roster.delete(confirm.id) {
                    self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
                } else {
                    self.clear_status();
                }
                self.refresh_view();
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_search(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                self.screen.query.clear_search();
                self.refresh_view();
                return Mode::Normal;
            }
            KeyCode::Enter => {
                debug!(search = %self.screen.query.search, "search committed");
                return Mode::Normal;
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.move_selection(PAGE_STEP),
            KeyCode::Tab => self.cycle_group_filter(true),
            KeyCode::BackTab => self.cycle_group_filter(false),
            KeyCode::Backspace => {
                self.screen.query.backspace();
                self.refresh_view();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                self.screen.query.push_char(ch);
                self.refresh_view();
            }
            _ => {}
        }
        Mode::Searching
    }

    fn cycle_group_filter(&mut self, forward: bool) {
        self.screen.query.cycle_group_filter(forward);
        self.refresh_view();
        self.set_status(
            format!("Showing {}.", self.screen.query.group_filter.label()),
            StatusKind::Info,
        );
    }

    fn refresh_view(&mut self) {
        self.screen.refresh(self.roster.list());
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(QUERY_BAR_HEIGHT), Constraint::Min(0)])
            .split(content_area);
        self.draw_query_bar(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Form(form) => self.draw_student_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching | Mode::Normal => {}
        }
    }

    fn draw_query_bar(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let searching = self.is_searching();
        let border_style = if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let search_block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search");
        let search_text = if self.screen.query.search.is_empty() && !searching {
            Span::styled("Press [f] to search", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.screen.query.search.clone())
        };
        frame.render_widget(
            Paragraph::new(Line::from(search_text)).block(search_block.clone()),
            chunks[0],
        );

        let filter = Paragraph::new(self.screen.query.group_filter.label())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Group [g]"));
        frame.render_widget(filter, chunks[1]);

        if searching {
            let inner = search_block.inner(chunks[0]);
            let cursor_x = cursor_column(inner.x, self.screen.query.search.chars().count());
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Students ({} of {})",
            self.screen.visible.len(),
            self.roster.records().len()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.roster.records().is_empty() {
            let message = Paragraph::new("No students yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        if self.screen.visible.is_empty() {
            let message = Paragraph::new("No students match the current search.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["First Name", "Last Name", "Does Work", "Group"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self.screen.visible.iter().map(|student| {
            Row::new(vec![
                Cell::from(student.first_name.clone()),
                Cell::from(student.last_name.clone()),
                Cell::from(student.does_work_label()),
                Cell::from(student.group.label()),
            ])
        });
        let widths = [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.screen.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match &self.mode {
            Mode::Form(_) => key_hints(&[
                ("[Tab]", "Next Field"),
                ("[Space]", "Toggle"),
                ("[←→]", "Group"),
                ("[Enter]", "Save"),
                ("[Esc]", "Cancel"),
            ]),
            Mode::ConfirmDelete(_) => key_hints(&[("[y]", "Delete"), ("[n/Esc]", "Keep")]),
            Mode::Searching => key_hints(&[
                ("[↑↓]", "Select"),
                ("[Tab]", "Group Filter"),
                ("[Enter]", "Done"),
                ("[Esc]", "Clear Search"),
            ]),
            Mode::Normal => key_hints(&[
                ("[↑↓]", "Select"),
                ("[+]", "Add"),
                ("[e]", "Edit"),
                ("[-]", "Delete"),
                ("[f]", "Search"),
                ("[g]", "Group Filter"),
                ("[c]", "Clear"),
                ("[q]", "Quit"),
            ]),
        }
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, form: &StudentForm) {
        let (title, submit_label) = match self.roster.panel() {
            Panel::Editing(_) => ("Edit Student", "Update Student"),
            _ => ("Add Student", "Add Student"),
        };
        let draft = self.roster.draft();

        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(draft, StudentField::FirstName),
            form.build_line(draft, StudentField::LastName),
            form.build_line(draft, StudentField::DoesWork),
            form.build_line(draft, StudentField::Group),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Enter to {submit_label} • Tab to switch • Esc to cancel"),
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some(offset) = form.cursor_offset(draft) {
            let cursor_x = cursor_column(inner.x, offset).min(inner.right().saturating_sub(1));
            let cursor_y = inner.y.saturating_add(form.active_row());
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmStudentDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove {} from the roster?", confirm.name)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
