//! In-memory roster
//!
//! The roster is rebuilt wholesale on load. After that the only mutation is
//! storing a generated password on a member.

mod normalize;
mod spreadsheet;

pub use normalize::{normalize_row, normalize_rows, serial_to_date};
pub use spreadsheet::{
    RawCell, RawRow, SpreadsheetError, read_rows_from_bytes, read_rows_from_path,
};

use std::path::Path;

use parking_lot::RwLock;
use shared::models::MemberRecord;

#[derive(Debug, Default)]
pub struct RosterStore {
    members: RwLock<Vec<MemberRecord>>,
}

impl RosterStore {
    pub fn new(members: Vec<MemberRecord>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    /// Load and normalize the first sheet of a workbook on disk
    pub fn load_path(path: &Path) -> Result<Vec<MemberRecord>, SpreadsheetError> {
        let rows = read_rows_from_path(path)?;
        Ok(normalize_rows(&rows))
    }

    /// Load and normalize an uploaded workbook
    pub fn load_bytes(bytes: &[u8]) -> Result<Vec<MemberRecord>, SpreadsheetError> {
        let rows = read_rows_from_bytes(bytes)?;
        Ok(normalize_rows(&rows))
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    pub fn with_phone_count(&self) -> usize {
        self.members
            .read()
            .iter()
            .filter(|m| m.effective_phone().is_some())
            .count()
    }

    /// Swap in a new roster, returning the number of members loaded
    pub fn replace(&self, members: Vec<MemberRecord>) -> usize {
        let count = members.len();
        *self.members.write() = members;
        count
    }

    pub fn snapshot(&self) -> Vec<MemberRecord> {
        self.members.read().clone()
    }

    /// Members in `[start, end)` with their roster index
    pub fn slice(&self, start: usize, end: usize) -> Vec<(usize, MemberRecord)> {
        let members = self.members.read();
        let end = end.min(members.len());
        let start = start.min(end);
        members[start..end]
            .iter()
            .cloned()
            .enumerate()
            .map(|(offset, m)| (start + offset, m))
            .collect()
    }

    /// First member with this id
    pub fn find(&self, membership_id: &str) -> Option<(usize, MemberRecord)> {
        self.members
            .read()
            .iter()
            .enumerate()
            .find(|(_, m)| m.membership_id == membership_id)
            .map(|(idx, m)| (idx, m.clone()))
    }

    /// Write back a member whose password was just assigned.
    ///
    /// Only the password is taken from `updated`, and only when the slot still
    /// holds the same member.
    pub fn write_back(&self, index: usize, updated: &MemberRecord) -> bool {
        let mut members = self.members.write();
        match members.get_mut(index) {
            Some(slot) if slot.membership_id == updated.membership_id => {
                slot.password.clone_from(&updated.password);
                true
            }
            _ => false,
        }
    }

    pub fn log_preview(&self, count: usize) {
        for (idx, m) in self.members.read().iter().take(count).enumerate() {
            tracing::debug!(
                "[DATA] {}: {} -> {}",
                idx,
                m.membership_id,
                m.effective_phone().unwrap_or("NO_PHONE")
            );
        }
    }
}
