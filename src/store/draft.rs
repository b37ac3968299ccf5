use tracing::debug;

use crate::models::{Group, Student, StudentFields, StudentId};

use super::{RecordStore, StoreError};

/// State of the create/edit panel. Only one draft can be open at a time, so
/// the editing target lives here rather than on the draft itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Closed,
    Creating,
    Editing(StudentId),
}

impl Panel {
    pub fn is_open(&self) -> bool {
        !matches!(self, Panel::Closed)
    }
}

/// Work-in-progress form values. `group` stays `None` until the user picks
/// one, which is what the form shows as "Select Group".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub does_work: bool,
    pub group: Option<Group>,
}

impl Draft {
    fn from_student(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            does_work: student.does_work,
            group: Some(student.group),
        }
    }

    /// Check the required fields and return the values ready for the store.
    /// Whitespace-only names count as missing; names are stored as typed.
    pub fn to_fields(&self) -> Result<StudentFields, StoreError> {
        if self.first_name.trim().is_empty() {
            return Err(StoreError::IncompleteDraft("First name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(StoreError::IncompleteDraft("Last name"));
        }
        let group = self.group.ok_or(StoreError::IncompleteDraft("Group"))?;

        Ok(StudentFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            does_work: self.does_work,
            group,
        })
    }

    /// Step the group selector through "unselected" and every group, wrapping
    /// around in either direction.
    pub fn cycle_group(&mut self, forward: bool) {
        let count = Group::ALL.len();
        // Slot 0 is the unselected sentinel, groups occupy 1..=count.
        let slot = self.group.map(|g| g.index() + 1).unwrap_or(0);
        let next = if forward {
            (slot + 1) % (count + 1)
        } else {
            (slot + count) % (count + 1)
        };
        self.group = next.checked_sub(1).map(|idx| Group::ALL[idx]);
    }
}

/// Session state around the record store: the roster itself plus the one
/// pending draft and the panel it belongs to.
#[derive(Debug, Default)]
pub struct Roster {
    records: RecordStore,
    panel: Panel,
    draft: Draft,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Shorthand for `records().list()`.
    pub fn list(&self) -> &[Student] {
        self.records.list()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access to the open draft. `None` while the panel is closed.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        if self.panel.is_open() {
            Some(&mut self.draft)
        } else {
            None
        }
    }

    /// Open an empty draft for a new student. Replaces any draft already open.
    pub fn begin_create(&mut self) {
        self.draft = Draft::default();
        self.panel = Panel::Creating;
        debug!("panel opened for create");
    }

    /// Load an existing student into the draft. An unknown id leaves
    /// everything untouched and returns `false`; callers only pass ids from
    /// rows they just rendered, so this is not treated as an error.
    pub fn begin_edit(&mut self, id: StudentId) -> bool {
        let Some(student) = self.records.get(id) else {
            debug!(%id, "edit requested for missing student");
            return false;
        };
        self.draft = Draft::from_student(student);
        self.panel = Panel::Editing(id);
        debug!(%id, "panel opened for edit");
        true
    }

    /// Throw away the draft and close the panel.
    pub fn cancel(&mut self) {
        if self.panel.is_open() {
            debug!(panel = ?self.panel, "panel cancelled");
        }
        self.close();
    }

    /// Commit the draft: create from `Creating`, update from `Editing`.
    ///
    /// A draft with a blank required field is rejected and left open so the
    /// user can correct it. Otherwise the panel closes, including when the
    /// update target vanished in the meantime; that `NotFound` is still
    /// returned to the caller.
    pub fn submit(&mut self) -> Result<Student, StoreError> {
        let target = match self.panel {
            Panel::Closed => return Err(StoreError::PanelClosed),
            Panel::Creating => None,
            Panel::Editing(id) => Some(id),
        };
        let fields = self.draft.to_fields()?;

        let result = match target {
            None => Ok(self.records.create(fields)),
            Some(id) => self.records.update(id, fields),
        };
        self.close();
        result
    }

    /// Delete a student by id; unknown ids are a silent no-op. Deleting the
    /// student whose edit panel is open also closes that panel.
    pub fn delete(&mut self, id: StudentId) -> bool {
        let removed = self.records.delete(id);
        if self.panel == Panel::Editing(id) {
            debug!(%id, "closing edit panel for deleted student");
            self.close();
        }
        removed
    }

    fn close(&mut self) {
        self.draft = Draft::default();
        self.panel = Panel::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft(first: &str, last: &str, group: Group) -> Draft {
        Draft {
            first_name: first.into(),
            last_name: last.into(),
            does_work: false,
            group: Some(group),
        }
    }

    fn fill(roster: &mut Roster, first: &str, last: &str, group: Group) {
        *roster.draft_mut().expect("panel should be open") = filled_draft(first, last, group);
    }

    #[test]
    fn submit_from_creating_adds_one_and_closes() {
        let mut roster = Roster::new();
        roster.begin_create();
        assert_eq!(roster.panel(), Panel::Creating);
        fill(&mut roster, "Vali", "Toshev", Group::N58);

        let created = roster.submit().unwrap();

        assert_eq!(roster.records().len(), 1);
        assert_eq!(roster.list()[0], created);
        assert_eq!(roster.panel(), Panel::Closed);
        assert_eq!(roster.draft(), &Draft::default());
    }

    #[test]
    fn begin_create_clears_previous_draft() {
        let mut roster = Roster::new();
        roster.begin_create();
        fill(&mut roster, "Vali", "Toshev", Group::N58);
        roster.begin_create();
        assert_eq!(roster.draft(), &Draft::default());
    }

    #[test]
    fn edit_round_trip_updates_in_place() {
        let mut roster = Roster::new();
        roster.begin_create();
        fill(&mut roster, "Vali", "Toshev", Group::N58);
        let first = roster.submit().unwrap();
        roster.begin_create();
        fill(&mut roster, "Olim", "Aliev", Group::N65);
        roster.submit().unwrap();

        assert!(roster.begin_edit(first.id));
        assert_eq!(roster.panel(), Panel::Editing(first.id));
        assert_eq!(roster.draft().first_name, "Vali");
        assert_eq!(roster.draft().group, Some(Group::N58));

        let draft = roster.draft_mut().unwrap();
        draft.first_name = "Valijon".into();
        draft.does_work = true;
        let updated = roster.submit().unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(roster.list()[0].first_name, "Valijon");
        assert!(roster.list()[0].does_work);
        assert_eq!(roster.records().len(), 2);
        assert_eq!(roster.panel(), Panel::Closed);
    }

    #[test]
    fn begin_edit_with_missing_id_stays_closed() {
        let mut roster = Roster::new();
        assert!(!roster.begin_edit(StudentId::new()));
        assert_eq!(roster.panel(), Panel::Closed);
        assert!(roster.draft_mut().is_none());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut roster = Roster::new();
        roster.begin_create();
        fill(&mut roster, "Vali", "Toshev", Group::N58);
        roster.cancel();

        assert_eq!(roster.panel(), Panel::Closed);
        assert_eq!(roster.draft(), &Draft::default());
        assert!(roster.records().is_empty());
    }

    #[test]
    fn incomplete_draft_keeps_panel_open() {
        let mut roster = Roster::new();
        roster.begin_create();
        roster.draft_mut().unwrap().first_name = "Vali".into();
        roster.draft_mut().unwrap().last_name = "   ".into();

        let err = roster.submit().unwrap_err();

        assert_eq!(err, StoreError::IncompleteDraft("Last name"));
        assert_eq!(roster.panel(), Panel::Creating);
        assert_eq!(roster.draft().first_name, "Vali");
    }

    #[test]
    fn missing_group_is_rejected() {
        let draft = Draft {
            first_name: "Vali".into(),
            last_name: "Toshev".into(),
            ..Draft::default()
        };
        assert_eq!(draft.to_fields(), Err(StoreError::IncompleteDraft("Group")));
    }

    #[test]
    fn names_are_stored_as_typed() {
        let draft = filled_draft("  Vali ", " Toshev", Group::N1);
        let fields = draft.to_fields().unwrap();
        assert_eq!(fields.first_name, "  Vali ");
        assert_eq!(fields.last_name, " Toshev");
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let draft = filled_draft("Vali", "   ", Group::N1);
        assert_eq!(
            draft.to_fields(),
            Err(StoreError::IncompleteDraft("Last name"))
        );
    }

    #[test]
    fn submit_while_closed_errors() {
        let mut roster = Roster::new();
        assert_eq!(roster.submit(), Err(StoreError::PanelClosed));
    }

    #[test]
    fn deleting_edited_student_closes_panel() {
        let mut roster = Roster::new();
        roster.begin_create();
        fill(&mut roster, "Vali", "Toshev", Group::N58);
        let student = roster.submit().unwrap();

        roster.begin_edit(student.id);
        assert!(roster.delete(student.id));
        assert_eq!(roster.panel(), Panel::Closed);
        assert!(!roster.delete(student.id));
    }

    #[test]
    fn cycle_group_wraps_through_unselected() {
        let mut draft = Draft::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            draft.cycle_group(true);
            seen.push(draft.group);
        }
        assert_eq!(
            seen,
            vec![
                Some(Group::N58),
                Some(Group::N65),
                Some(Group::N1),
                Some(Group::N69),
                None
            ]
        );

        draft.cycle_group(false);
        assert_eq!(draft.group, Some(Group::N69));
    }
}
