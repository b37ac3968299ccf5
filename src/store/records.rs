use tracing::{info, trace, warn};

use crate::models::{Student, StudentFields, StudentId};

use super::StoreError;

/// Authoritative ordered list of students. Order is insertion order; updates
/// keep a record where it is.
#[derive(Debug, Default)]
pub struct RecordStore {
    students: Vec<Student>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new student with a freshly minted id, returning a copy of the
    /// stored record so the caller can focus it in the UI.
    ///
    /// The fields are assumed valid; `Draft::to_fields` is where blank names
    /// get rejected.
    pub fn create(&mut self, fields: StudentFields) -> Student {
        let mut id = StudentId::new();
        while self.position(id).is_some() {
            id = StudentId::new();
        }

        let student = Student::from_fields(id, fields);
        trace!(%id, name = %student.full_name(), "student fields");
        self.students.push(student.clone());
        info!(%id, total = self.students.len(), "student created");
        student
    }

    /// Replace every field of an existing student except its id. The record
    /// keeps its position. A missing id is reported rather than ignored since
    /// it means the caller is holding a stale reference.
    pub fn update(&mut self, id: StudentId, fields: StudentFields) -> Result<Student, StoreError> {
        let Some(idx) = self.position(id) else {
            warn!(%id, "update targeted a missing student");
            return Err(StoreError::NotFound(id));
        };

        let updated = Student::from_fields(id, fields);
        trace!(%id, name = %updated.full_name(), "student fields");
        self.students[idx] = updated.clone();
        info!(%id, position = idx, "student updated");
        Ok(updated)
    }

    /// Remove the student with `id`. Returns whether anything was removed;
    /// deleting an unknown id is a no-op so a repeated delete never fails.
    pub fn delete(&mut self, id: StudentId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.students.remove(idx);
                info!(%id, total = self.students.len(), "student deleted");
                true
            }
            None => false,
        }
    }

    /// Every student in store order.
    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }
}
