//! Bootstrap dataset used when nothing usable is persisted yet.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::role::Role;
use crate::model::user::User;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed date is valid")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("seed time is valid")
}

fn user(id: &str, username: &str, full_name: &str, role: Role, department: &str, joined_at: NaiveDate) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        full_name: full_name.to_string(),
        role,
        password: Some("password".to_string()),
        department: department.to_string(),
        joined_at,
    }
}

pub static BOOTSTRAP_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        user("1", "admin", "HR Manager", Role::Admin, "Human Resources", date(2023, 1, 1)),
        user("2", "jdoe", "Ahmed Ali", Role::Employee, "Engineering", date(2023, 5, 15)),
        user("3", "asmith", "Sara Khaled", Role::Employee, "Design", date(2023, 6, 20)),
    ]
});

// Statuses are stored as recorded, not re-derived from the check-in time.
pub static BOOTSTRAP_ATTENDANCE: Lazy<Vec<AttendanceRecord>> = Lazy::new(|| {
    vec![
        AttendanceRecord {
            id: "r1".to_string(),
            user_id: "2".to_string(),
            date: date(2024, 5, 20),
            check_in: time(9, 5),
            check_out: Some(time(18, 10)),
            status: AttendanceStatus::Present,
            location: None,
        },
        AttendanceRecord {
            id: "r2".to_string(),
            user_id: "3".to_string(),
            date: date(2024, 5, 20),
            check_in: time(9, 15),
            check_out: Some(time(18, 0)),
            status: AttendanceStatus::Present,
            location: None,
        },
    ]
});

pub fn bootstrap_users() -> Vec<User> {
    BOOTSTRAP_USERS.clone()
}

pub fn bootstrap_attendance() -> Vec<AttendanceRecord> {
    BOOTSTRAP_ATTENDANCE.clone()
}
