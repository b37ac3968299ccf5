use thiserror::Error;

use crate::models::StudentId;

/// Failures the roster store reports to its callers. Deletes and edits of a
/// missing id are deliberately absent: those paths are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An update targeted a record that no longer exists.
    #[error("Student not found ({0}).")]
    NotFound(StudentId),
    /// A required draft field is blank or unselected. Carries the field's
    /// display name.
    #[error("{0} is required.")]
    IncompleteDraft(&'static str),
    /// Submit was called with no create/edit panel open.
    #[error("No student form is open.")]
    PanelClosed,
}
