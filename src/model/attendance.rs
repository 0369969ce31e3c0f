use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Late,
    HalfDay,
}

impl AttendanceStatus {
    /// Status assigned once, at check-in.
    ///
    /// Only arrivals at nine o'clock or later with a non-zero minute count as
    /// late, so 09:00 and 10:00 are both `Present`.
    pub fn at_check_in(time: NaiveTime) -> Self {
        if time.hour() >= 9 && time.minute() > 0 {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = "r1")]
    pub id: String,
    #[schema(example = "2")]
    pub user_id: String,
    #[schema(example = "2024-05-20", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "09:05:00", value_type = String)]
    pub check_in: NaiveTime,
    #[schema(example = "18:10:00", value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

/// Date portion of a local timestamp; the attendance grouping key.
pub fn calendar_date(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

/// Time of day at whole-second precision.
pub fn time_of_day(now: NaiveDateTime) -> NaiveTime {
    let time = now.time();
    time.with_nanosecond(0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[rstest]
    #[case(at(8, 59, 59), AttendanceStatus::Present)]
    #[case(at(9, 0, 0), AttendanceStatus::Present)]
    #[case(at(9, 0, 59), AttendanceStatus::Present)]
    #[case(at(9, 1, 0), AttendanceStatus::Late)]
    #[case(at(9, 5, 0), AttendanceStatus::Late)]
    #[case(at(10, 0, 0), AttendanceStatus::Present)]
    #[case(at(14, 30, 0), AttendanceStatus::Late)]
    #[case(at(7, 45, 0), AttendanceStatus::Present)]
    fn status_follows_check_in_clock(#[case] time: NaiveTime, #[case] expected: AttendanceStatus) {
        assert_eq!(AttendanceStatus::at_check_in(time), expected);
    }

    #[test]
    fn status_uses_kebab_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half-day\""
        );
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "half-day");
    }

    #[test]
    fn time_of_day_drops_fractional_seconds() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_milli_opt(18, 10, 0, 734)
            .unwrap();
        assert_eq!(time_of_day(now), at(18, 10, 0));
        assert_eq!(calendar_date(now).to_string(), "2024-05-20");
    }

    #[test]
    fn record_serializes_with_camel_case_and_null_check_out() {
        let record = AttendanceRecord {
            id: "r9".into(),
            user_id: "2".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            check_in: at(9, 5, 0),
            check_out: None,
            status: AttendanceStatus::Late,
            location: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "r9",
                "userId": "2",
                "date": "2024-05-20",
                "checkIn": "09:05:00",
                "checkOut": null,
                "status": "late"
            })
        );
    }
}
