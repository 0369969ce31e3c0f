use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus, GeoPoint},
    role::Role,
    theme::Theme,
};
use crate::models::{
    CheckInReq, InsightsResponse, LoginReqDto, LoginResponse, RecordEnvelope, ThemeReq, UserForm,
    UserResponse,
};
use crate::store::{AttendanceOverview, AttendanceSummary, StatusCounts};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tros Attendance API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracker

Daily check-in / check-out for employees and a roster view for admins.

### Key Features
- **Attendance**
  - Check in, check out, today's status and recent history
  - Arrivals after 09:00 (non-zero minute) are marked late
- **Team Management**
  - List, add and delete team members; deleting a member removes their records
- **Insights**
  - AI-written summary of attendance patterns

### Security
Endpoints under `/api` need a **JWT Bearer** token from `/auth/login`.
Roster, full log, overview and insights are **admin** only.

Passwords are compared in plain text. Do not use real credentials.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::me,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::today,
        crate::api::attendance::recent,
        crate::api::attendance::summary,
        crate::api::attendance::list_records,
        crate::api::attendance::overview,

        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::delete_user,

        crate::api::insights::generate_report,

        crate::api::preferences::get_theme,
        crate::api::preferences::set_theme,
        crate::api::preferences::toggle_theme
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            UserForm,
            UserResponse,
            Role,
            AttendanceRecord,
            AttendanceStatus,
            GeoPoint,
            CheckInReq,
            RecordEnvelope,
            AttendanceSummary,
            AttendanceOverview,
            StatusCounts,
            InsightsResponse,
            Theme,
            ThemeReq
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and current user"),
        (name = "Attendance", description = "Check-in / check-out and history"),
        (name = "Users", description = "Team management"),
        (name = "Insights", description = "AI attendance report"),
        (name = "Preferences", description = "Display theme"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
