//! Domain models passed between the roster store, the view projection and the
//! TUI. These stay plain data holders; ordering and lifecycle rules live in
//! `store`, matching rules live in `view`.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier assigned to a student when it is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Mint a fresh random identifier. Collisions are not a practical concern
    /// for a session-sized roster.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed set of class groups a student can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    N58,
    N65,
    N1,
    N69,
}

impl Group {
    /// Every group in display order. Selectors cycle through this slice.
    pub const ALL: [Group; 4] = [Group::N58, Group::N65, Group::N1, Group::N69];

    /// Label shown in the table and matched by free-text search.
    pub fn label(self) -> &'static str {
        match self {
            Group::N58 => "N58",
            Group::N65 => "N65",
            Group::N1 => "N1",
            Group::N69 => "N69",
        }
    }

    /// Position of the group inside [`Group::ALL`].
    pub(crate) fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|group| *group == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated student fields, i.e. everything a record carries except its id.
/// `RecordStore::create` and `RecordStore::update` accept this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub does_work: bool,
    pub group: Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A committed roster entry.
pub struct Student {
    /// Assigned once at creation. Edit and delete flows hand it back to the
    /// store, so it must never change.
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Whether the student holds a job alongside their studies.
    pub does_work: bool,
    pub group: Group,
}

impl Student {
    pub(crate) fn from_fields(id: StudentId, fields: StudentFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            does_work: fields.does_work,
            group: fields.group,
        }
    }

    /// `First Last`, used in status messages and confirmation dialogs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The `Yes` / `No` text rendered in the "Does Work" column.
    pub fn does_work_label(&self) -> &'static str {
        if self.does_work {
            "Yes"
        } else {
            "No"
        }
    }
}
