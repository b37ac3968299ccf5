use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Student, StudentId};
use crate::store::Draft;

/// Focus and error state for the add/edit student panel. The field values
/// themselves live in the roster's draft.
#[derive(Default, Clone)]
pub(crate) struct StudentForm {
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
}

/// Fields available within the student form, in Tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum StudentField {
    #[default]
    FirstName,
    LastName,
    DoesWork,
    Group,
}

impl StudentField {
    const ORDER: [StudentField; 4] = [
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::DoesWork,
        StudentField::Group,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StudentField::FirstName => "First Name",
            StudentField::LastName => "Last Name",
            StudentField::DoesWork => "Does Work",
            StudentField::Group => "Group",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, StudentField::FirstName | StudentField::LastName)
    }
}

impl StudentForm {
    /// Cycle focus forward across the fields.
    pub(crate) fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    /// Cycle focus backward across the fields.
    pub(crate) fn focus_previous(&mut self) {
        self.shift_focus(StudentField::ORDER.len() - 1);
    }

    fn shift_focus(&mut self, step: usize) {
        let len = StudentField::ORDER.len();
        let idx = StudentField::ORDER
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0);
        self.active = StudentField::ORDER[(idx + step) % len];
    }

    /// Append a character to the active text field.
    pub(crate) fn push_char(&self, draft: &mut Draft, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            StudentField::FirstName => draft.first_name.push(ch),
            StudentField::LastName => draft.last_name.push(ch),
            StudentField::DoesWork | StudentField::Group => return false,
        }
        true
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&self, draft: &mut Draft) {
        match self.active {
            StudentField::FirstName => {
                draft.first_name.pop();
            }
            StudentField::LastName => {
                draft.last_name.pop();
            }
            StudentField::DoesWork | StudentField::Group => {}
        }
    }

    /// Space on the checkbox flips it; on the group selector it advances.
    pub(crate) fn toggle(&self, draft: &mut Draft) -> bool {
        match self.active {
            StudentField::DoesWork => {
                draft.does_work = !draft.does_work;
                true
            }
            StudentField::Group => {
                draft.cycle_group(true);
                true
            }
            _ => false,
        }
    }

    /// Left/Right on the group selector.
    pub(crate) fn cycle_group(&self, draft: &mut Draft, forward: bool) -> bool {
        if self.active != StudentField::Group {
            return false;
        }
        draft.cycle_group(forward);
        true
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, draft: &Draft, field: StudentField) -> Line<'static> {
        let is_active = self.active == field;
        let (display, is_placeholder) = match field {
            StudentField::FirstName => text_or_required(&draft.first_name),
            StudentField::LastName => text_or_required(&draft.last_name),
            StudentField::DoesWork => {
                let mark = if draft.does_work { "[x]" } else { "[ ]" };
                (mark.to_string(), false)
            }
            StudentField::Group => match draft.group {
                Some(group) => (format!("< {group} >"), false),
                None => ("< Select Group >".to_string(), true),
            },
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_placeholder {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Cursor column offset for the active field, if it is a text field.
    pub(crate) fn cursor_offset(&self, draft: &Draft) -> Option<usize> {
        if !self.active.is_text() {
            return None;
        }
        let value = match self.active {
            StudentField::FirstName => &draft.first_name,
            _ => &draft.last_name,
        };
        Some(format!("{}: ", self.active.label()).len() + value.chars().count())
    }

    /// Row of the active field inside the form body.
    pub(crate) fn active_row(&self) -> u16 {
        StudentField::ORDER
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or(0) as u16
    }
}

fn text_or_required(value: &str) -> (String, bool) {
    if value.is_empty() {
        ("<required>".to_string(), true)
    } else {
        (value.to_string(), false)
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmStudentDelete {
    pub(crate) id: StudentId,
    pub(crate) name: String,
}

impl ConfirmStudentDelete {
    /// Build the confirmation state from the student being considered.
    pub(crate) fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
        }
    }
}
