use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    attendance::{AttendanceRecord, GeoPoint},
    role::Role,
    theme::Theme,
    user::User,
};

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

fn default_department() -> String {
    "Engineering".to_string()
}

/// Admin form for adding a team member.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[schema(example = "Omar Hassan")]
    pub full_name: String,
    #[schema(example = "ohassan")]
    pub username: String,
    #[schema(example = "s3cret")]
    pub password: String,
    #[serde(default = "default_department")]
    #[schema(example = "Engineering")]
    pub department: String,
    #[serde(default)]
    pub role: Role,
}

/// A user as shown on the roster; never carries the password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub department: String,
    #[schema(example = "2023-05-15", format = "date", value_type = String)]
    pub joined_at: NaiveDate,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            department: user.department.clone(),
            joined_at: user.joined_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckInReq {
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordEnvelope {
    pub record: Option<AttendanceRecord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThemeReq {
    pub theme: Theme,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InsightsResponse {
    pub report: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
