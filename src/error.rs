use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Failures of attendance store operations.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,

    /// A required create-user field was empty or blank.
    #[display(fmt = "{} must not be empty", _0)]
    MissingField(&'static str),

    #[display(fmt = "Username already taken")]
    UsernameTaken,

    #[display(fmt = "Already checked in today")]
    AlreadyCheckedIn,

    #[display(fmt = "User not found")]
    UnknownUser,
}

impl std::error::Error for StoreError {}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StoreError::MissingField(_) => StatusCode::BAD_REQUEST,
            StoreError::UsernameTaken | StoreError::AlreadyCheckedIn => StatusCode::CONFLICT,
            StoreError::UnknownUser => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(StoreError::MissingField("username"), StatusCode::BAD_REQUEST)]
    #[case(StoreError::UsernameTaken, StatusCode::CONFLICT)]
    #[case(StoreError::AlreadyCheckedIn, StatusCode::CONFLICT)]
    #[case(StoreError::UnknownUser, StatusCode::NOT_FOUND)]
    fn maps_to_http_status(#[case] err: StoreError, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_response().status(), status);
    }

    #[test]
    fn names_the_missing_field() {
        assert_eq!(
            StoreError::MissingField("fullName").to_string(),
            "fullName must not be empty"
        );
    }
}
