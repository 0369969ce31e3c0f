pub mod attendance;
pub mod insights;
pub mod preferences;
pub mod users;

use std::sync::MutexGuard;

use actix_web::error::ErrorInternalServerError;
use chrono::{Local, NaiveDateTime};
use tracing::error;

use crate::store::{AttendanceStore, SharedStore};

/// Handlers hold the lock only for the synchronous store call.
pub fn lock(store: &SharedStore) -> actix_web::Result<MutexGuard<'_, AttendanceStore>> {
    store.lock().map_err(|_| {
        error!("Attendance store lock poisoned");
        ErrorInternalServerError("Internal Server Error")
    })
}

/// Naive local wall-clock time used for every attendance timestamp.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
