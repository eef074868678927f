//! In-memory directory stores.
//!
//! Holds the employee list and the bookmark list for the lifetime of a
//! run. Mutations are plain appends and removals; derived views are
//! always recomputed from the current contents.

pub mod filter;
pub mod intake;

pub use filter::{paginate, total_pages, SearchFilter, DEFAULT_PAGE_SIZE};
pub use intake::EmployeeDraft;

use crate::models::EmployeeRecord;
use tracing::debug;

/// The employee list for one run.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<EmployeeRecord>,
}

impl EmployeeDirectory {
    /// Create an empty directory.
    #[allow(dead_code)] // Utility constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory from already-normalized records.
    pub fn from_records(employees: Vec<EmployeeRecord>) -> Self {
        Self { employees }
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: u64) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Append a record.
    pub fn add(&mut self, record: EmployeeRecord) {
        debug!("Adding employee {} ({})", record.id, record.full_name());
        self.employees.push(record);
    }

    /// Next free id for intake records (one past the current maximum).
    pub fn next_id(&self) -> u64 {
        self.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

/// Bookmarked employees, in bookmark order.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    bookmarks: Vec<EmployeeRecord>,
}

impl BookmarkList {
    /// Create an empty bookmark list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given id is bookmarked.
    pub fn contains(&self, id: u64) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }

    /// Toggle a bookmark: add when absent, remove when present.
    /// Returns true when the record is bookmarked afterwards.
    pub fn toggle(&mut self, record: &EmployeeRecord) -> bool {
        if self.contains(record.id) {
            self.bookmarks.retain(|b| b.id != record.id);
            false
        } else {
            self.bookmarks.push(record.clone());
            true
        }
    }

    /// Remove a bookmark by id. Returns true when one was removed.
    #[allow(dead_code)] // Utility for explicit removal
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        self.bookmarks.len() != before
    }

    /// Bookmarked records, in bookmark order.
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.bookmarks
    }

    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    /// Whether no records are bookmarked.
    #[allow(dead_code)] // Utility accessor
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}
