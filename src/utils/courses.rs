use log::{debug, warn};
use thiserror::Error;
use crate::models::{CourseEntry, Field};

pub const MIN_COURSES: usize = 1;
pub const MAX_COURSES: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseListError {
    #[error("row {index} is out of range (the form has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

// Ordered rows of the form. Always holds between MIN_COURSES and MAX_COURSES entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseList {
    entries: Vec<CourseEntry>,
}

impl CourseList {
    pub fn new() -> Self {
        CourseList { entries: vec![CourseEntry::default()] }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[CourseEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CourseEntry> {
        self.entries.iter()
    }

    pub fn can_append(&self) -> bool {
        self.entries.len() < MAX_COURSES
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > MIN_COURSES
    }

    /// Adds a default row at the end. Returns `false` when the list is already full.
    pub fn append(&mut self) -> bool {
        if !self.can_append() {
            warn!("Cannot add a course, the form already has {} rows", MAX_COURSES);
            return false;
        }
        let entry = CourseEntry::default();
        debug!("Appending row {} at position {}", entry.id, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Removes the row at `index`. Returns `Ok(false)` when it is the last remaining row.
    pub fn remove_at(&mut self, index: usize) -> Result<bool, CourseListError> {
        self.check_index(index)?;
        if !self.can_remove() {
            warn!("Cannot remove row {}, at least {} row is required", index, MIN_COURSES);
            return Ok(false);
        }
        let removed = self.entries.remove(index);
        debug!("Removed row {} from position {}", removed.id, index);
        Ok(true)
    }

    pub fn update_field(&mut self, index: usize, field: Field, value: &str) -> Result<(), CourseListError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        match field {
            Field::Name => entry.name = value.to_string(),
            Field::Credits => entry.credits = value.to_string(),
            Field::Grade => entry.grade = value.to_string(),
        }
        debug!("Set {} of row {} to {:?}", field, index, value);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CourseListError> {
        if index >= self.entries.len() {
            return Err(CourseListError::IndexOutOfRange { index, len: self.entries.len() });
        }
        Ok(())
    }
}

impl Default for CourseList {
    fn default() -> Self {
        CourseList::new()
    }
}
