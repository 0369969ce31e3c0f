use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::role::Role;

/// A person who can log in and record attendance.
///
/// `password` is kept and compared as plain text. That is only acceptable for
/// a prototype; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub department: String,
    pub joined_at: NaiveDate,
}

impl User {
    /// Exact, case-sensitive match. Users without a stored password never match.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_deref() == Some(candidate)
    }
}
