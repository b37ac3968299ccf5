use std::cmp::min;

use crate::models::{Student, StudentId};
use crate::view::{project, Query};

/// The roster table: live query inputs, the projected rows and the
/// highlighted row.
#[derive(Default)]
pub(crate) struct RosterScreen {
    pub(crate) query: Query,
    pub(crate) visible: Vec<Student>,
    pub(crate) selected: usize,
}

impl RosterScreen {
    pub(crate) fn new(students: &[Student]) -> Self {
        let mut screen = Self::default();
        screen.refresh(students);
        screen
    }

    /// Re-project after any store or query change. Keeps the highlight on the
    /// same student when it is still visible.
    pub(crate) fn refresh(&mut self, students: &[Student]) {
        let focused = self.current_student().map(|s| s.id);
        self.visible = project(students, &self.query).into_iter().cloned().collect();
        match focused {
            Some(id) => self.focus(id),
            None => self.ensure_in_bounds(),
        }
    }

    /// Move the highlight onto `id` if it is visible.
    pub(crate) fn focus(&mut self, id: StudentId) {
        if let Some(idx) = self.visible.iter().position(|s| s.id == id) {
            self.selected = idx;
        } else {
            self.ensure_in_bounds();
        }
    }

    pub(crate) fn current_student(&self) -> Option<&Student> {
        self.visible.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.visible.len() as isize - 1;
        let next = (self.selected as isize + offset).clamp(0, last);
        self.selected = next as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else {
            self.selected = min(self.selected, self.visible.len() - 1);
        }
    }
}
