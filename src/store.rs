//! In-memory users and attendance records, mirrored to a key-value storage.
//!
//! Every mutation writes both collections back in full. On startup the store
//! reads them again and falls back to the bootstrap dataset for any key that
//! is missing or does not parse.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, GeoPoint, calendar_date, time_of_day,
};
use crate::model::theme::Theme;
use crate::model::user::User;
use crate::models::UserForm;
use crate::seed::{bootstrap_attendance, bootstrap_users};
use crate::storage::{ATTENDANCE_KEY, KeyValueStorage, THEME_KEY, USERS_KEY};

pub const DEFAULT_RECENT_LIMIT: usize = 4;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub present: usize,
    pub late: usize,
    pub half_day: usize,
}

impl StatusCounts {
    fn tally<'a>(records: impl Iterator<Item = &'a AttendanceRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Late => counts.late += 1,
                AttendanceStatus::HalfDay => counts.half_day += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.present + self.late + self.half_day
    }
}

/// Per-user attendance figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub user_id: String,
    pub total: usize,
    pub by_status: StatusCounts,
    pub open: usize,
    /// Share of on-time check-ins, 0..=100. A user without records scores 100.
    pub discipline_score: u8,
}

/// Company-wide figures for the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceOverview {
    #[schema(example = "2024-05-20", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub headcount: usize,
    pub checked_in_today: usize,
    pub open_today: usize,
    pub by_status: StatusCounts,
}

/// The store as shared between request handlers.
pub type SharedStore = Mutex<AttendanceStore>;

pub struct AttendanceStore {
    users: Vec<User>,
    attendance: Vec<AttendanceRecord>,
    theme: Theme,
    storage: Box<dyn KeyValueStorage>,
}

fn restore<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value does not parse, using bootstrap data");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value, using bootstrap data");
            None
        }
    }
}

fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

impl AttendanceStore {
    /// Restores state from `storage`, then writes it back so the storage
    /// always holds a complete snapshot.
    pub fn load(storage: impl KeyValueStorage + 'static, default_theme: Theme) -> Self {
        let storage: Box<dyn KeyValueStorage> = Box::new(storage);

        let users = restore(storage.as_ref(), USERS_KEY).unwrap_or_else(bootstrap_users);
        let attendance =
            restore(storage.as_ref(), ATTENDANCE_KEY).unwrap_or_else(bootstrap_attendance);
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::from_str(raw.trim()).unwrap_or(default_theme),
            _ => default_theme,
        };

        info!(
            users = users.len(),
            records = attendance.len(),
            theme = %theme,
            "Attendance store loaded"
        );

        let mut store = Self {
            users,
            attendance,
            theme,
            storage,
        };
        store.persist();
        store.persist_theme();
        store
    }

    fn persist(&mut self) {
        let users = serde_json::to_string(&self.users);
        let attendance = serde_json::to_string(&self.attendance);
        let (users, attendance) = match (users, attendance) {
            (Ok(u), Ok(a)) => (u, a),
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to serialize attendance state");
                return;
            }
        };

        if let Err(e) = self.storage.set(USERS_KEY, &users) {
            error!(error = %e, key = USERS_KEY, "Failed to persist users");
        }
        if let Err(e) = self.storage.set(ATTENDANCE_KEY, &attendance) {
            error!(error = %e, key = ATTENDANCE_KEY, "Failed to persist attendance");
        }
    }

    fn persist_theme(&mut self) {
        if let Err(e) = self.storage.set(THEME_KEY, self.theme.as_ref()) {
            error!(error = %e, key = THEME_KEY, "Failed to persist theme");
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Exact username and password match, both case-sensitive.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, StoreError> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password_matches(password))
            .cloned()
            .ok_or(StoreError::InvalidCredentials)
    }

    pub fn check_in(
        &mut self,
        user_id: &str,
        now: NaiveDateTime,
    ) -> Result<AttendanceRecord, StoreError> {
        self.check_in_at(user_id, now, None)
    }

    /// Opens today's record for `user_id`, optionally tagged with where the
    /// check-in happened. A user has at most one open record per calendar
    /// day; checking in again after a same-day check-out starts a new one.
    pub fn check_in_at(
        &mut self,
        user_id: &str,
        now: NaiveDateTime,
        location: Option<GeoPoint>,
    ) -> Result<AttendanceRecord, StoreError> {
        if self.user(user_id).is_none() {
            return Err(StoreError::UnknownUser);
        }
        let today = calendar_date(now);
        if self
            .attendance
            .iter()
            .any(|r| r.user_id == user_id && r.date == today && r.is_open())
        {
            return Err(StoreError::AlreadyCheckedIn);
        }

        let check_in = time_of_day(now);
        let record = AttendanceRecord {
            id: fresh_id(|id| self.attendance.iter().any(|r| r.id == id)),
            user_id: user_id.to_string(),
            date: today,
            check_in,
            check_out: None,
            status: AttendanceStatus::at_check_in(check_in),
            location,
        };

        debug!(user_id, record_id = %record.id, status = %record.status, "Checked in");
        self.attendance.push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Closes the latest open record of today. `None` means there was
    /// nothing to close and nothing changed.
    pub fn check_out(&mut self, user_id: &str, now: NaiveDateTime) -> Option<AttendanceRecord> {
        let today = calendar_date(now);
        let record = self
            .attendance
            .iter_mut()
            .rev()
            .find(|r| r.user_id == user_id && r.date == today && r.is_open())?;

        record.check_out = Some(time_of_day(now));
        let record = record.clone();

        debug!(user_id, record_id = %record.id, "Checked out");
        self.persist();
        Some(record)
    }

    pub fn create_user(&mut self, form: UserForm, now: NaiveDateTime) -> Result<User, StoreError> {
        let full_name = form.full_name.trim();
        let username = form.username.trim();
        if full_name.is_empty() {
            return Err(StoreError::MissingField("fullName"));
        }
        if username.is_empty() {
            return Err(StoreError::MissingField("username"));
        }
        if form.password.trim().is_empty() {
            return Err(StoreError::MissingField("password"));
        }
        if self.users.iter().any(|u| u.username == username) {
            return Err(StoreError::UsernameTaken);
        }

        let user = User {
            id: fresh_id(|id| self.user(id).is_some()),
            username: username.to_string(),
            full_name: full_name.to_string(),
            role: form.role,
            password: Some(form.password),
            department: form.department.trim().to_string(),
            joined_at: calendar_date(now),
        };

        info!(user_id = %user.id, username = %user.username, "User created");
        self.users.push(user.clone());
        self.persist();
        Ok(user)
    }

    /// Removes the user together with all of their attendance records.
    /// Returns `false` when no such user exists.
    pub fn delete_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return false;
        }

        let records_before = self.attendance.len();
        self.attendance.retain(|r| r.user_id != id);

        info!(
            user_id = id,
            removed_records = records_before - self.attendance.len(),
            "User deleted"
        );
        self.persist();
        true
    }

    /// Latest `limit` records of the user, most recently inserted first.
    pub fn recent_records_for(&self, user_id: &str, limit: usize) -> Vec<AttendanceRecord> {
        self.attendance
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn today_record_for(&self, user_id: &str, now: NaiveDateTime) -> Option<&AttendanceRecord> {
        let today = calendar_date(now);
        self.attendance
            .iter()
            .rev()
            .find(|r| r.user_id == user_id && r.date == today)
    }

    pub fn summary_for(&self, user_id: &str) -> AttendanceSummary {
        let records: Vec<_> = self
            .attendance
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        let by_status = StatusCounts::tally(records.iter().copied());
        let total = by_status.total();
        let discipline_score = if total == 0 {
            100
        } else {
            ((by_status.present as f64 / total as f64) * 100.0).round() as u8
        };

        AttendanceSummary {
            user_id: user_id.to_string(),
            total,
            by_status,
            open: records.iter().filter(|r| r.is_open()).count(),
            discipline_score,
        }
    }

    pub fn overview(&self, now: NaiveDateTime) -> AttendanceOverview {
        let today = calendar_date(now);
        let todays: Vec<_> = self.attendance.iter().filter(|r| r.date == today).collect();
        let checked_in: HashSet<&str> = todays.iter().map(|r| r.user_id.as_str()).collect();

        AttendanceOverview {
            date: today,
            headcount: self.users.len(),
            checked_in_today: checked_in.len(),
            open_today: todays.iter().filter(|r| r.is_open()).count(),
            by_status: StatusCounts::tally(self.attendance.iter()),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist_theme();
    }
}
