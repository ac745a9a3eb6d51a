//! Member Model

use serde::{Deserialize, Serialize};

/// Canonical roster entry built from one spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Trimmed membership id, empty when the row had none
    pub membership_id: String,
    pub name: String,
    pub email: String,
    /// Cleaned phone column (`phoneno_clean`)
    pub phone_primary: Option<String>,
    /// Raw phone column (`phoneno`)
    pub phone_fallback: Option<String>,
    /// `DD/MM/YYYY` when the sheet stored a date serial, otherwise the trimmed text
    pub date_of_birth: Option<String>,
    /// Assigned on first send, kept until the roster is reloaded
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl MemberRecord {
    /// Phone the member is reached at.
    ///
    /// The primary number wins unless it is missing or the literal `"null"`
    /// that spreadsheet exports leave behind.
    pub fn effective_phone(&self) -> Option<&str> {
        match self.phone_primary.as_deref() {
            Some(p) if !p.is_empty() && p != "null" => Some(p),
            _ => self.phone_fallback.as_deref().filter(|p| !p.is_empty()),
        }
    }

    /// Identifier used in error samples and logs
    pub fn display_key(&self) -> &str {
        if self.membership_id.is_empty() {
            &self.name
        } else {
            &self.membership_id
        }
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
