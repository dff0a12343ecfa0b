use log::error;
use rocket::Responder;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::Responses;
use rocket_okapi::okapi::schemars::{self, JsonSchema, Map};
use rocket_okapi::response::OpenApiResponderInner;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt::{Debug, Display, Formatter};

#[derive(Serialize, JsonSchema, Debug, Responder)]
pub enum GenericError {
    #[response(status = 404)]
    NotFound(&'static str),
    #[response(status = 500)]
    UnknownError(&'static str),
    #[response(status = 400)]
    BadRequest(&'static str),
    #[response(status = 400)]
    Validation(String),
    #[response(status = 400)]
    ViolatesForeignKey(&'static str),
    #[response(status = 409)]
    Conflict(&'static str),
    #[response(status = 422)]
    CheckError(&'static str),
    #[response(status = 403)]
    NotPermitted(&'static str),
    AuthError(AuthError),
}

#[derive(Debug, JsonSchema, Serialize, Responder)]
pub enum AuthError {
    #[response(status = 401)]
    Missing(&'static str),
    #[response(status = 401)]
    InvalidCredentials(&'static str),
    #[response(status = 403)]
    Invalid(&'static str),
}

impl From<AuthError> for GenericError {
    fn from(e: AuthError) -> Self {
        Self::AuthError(e)
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::NotFound(msg)
            | Self::UnknownError(msg)
            | Self::BadRequest(msg)
            | Self::ViolatesForeignKey(msg)
            | Self::Conflict(msg)
            | Self::CheckError(msg)
            | Self::NotPermitted(msg) => write!(f, "{msg}"),
            Self::AuthError(AuthError::Missing(msg))
            | Self::AuthError(AuthError::InvalidCredentials(msg))
            | Self::AuthError(AuthError::Invalid(msg)) => write!(f, "{msg}"),
        }
    }
}

/// Picks the user facing message for a unique violation from the constraint named in the
/// database message.
fn unique_violation_message(db_message: &str) -> &'static str {
    if db_message.contains("username") {
        "This username is already taken. Please try another."
    } else if db_message.contains("teams_code") {
        "This team code is already in use."
    } else if db_message.contains("unique_judge_score_per_dive") {
        "This judge has already scored this dive."
    } else if db_message.contains("meet_participants") {
        "This diver is already entered in the meet."
    } else if db_message.contains("meet_judges") {
        "This judge is already assigned to the meet."
    } else {
        "A record with this data already exists."
    }
}

impl From<DbErr> for GenericError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::Conflict(unique_violation_message(&msg))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                error!("Foreign key violation: {msg}");
                Self::ViolatesForeignKey("A referenced record does not exist")
            }
            _ => {
                error!("Database error: {:#?}", e);
                Self::UnknownError("Internal server error")
            }
        }
    }
}

impl OpenApiResponderInner for GenericError {
    fn responses(_: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response as OpenApiResponse};

        let mut responses = Map::new();
        responses.insert(
            "400".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [400 Bad Request](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400)\n\
                The request failed validation, for example a judge score outside 0-10. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "401".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [401 Unauthorized](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401)\n\
                No valid session cookie was sent, or the credentials were wrong. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "403".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [403 Forbidden](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403)\n\
                The caller may not do this, for example a judge not assigned to the meet. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "404".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [404 Not Found](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404)\n\
                The requested record does not exist.\
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "409".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [409 Conflict](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/409)\n\
                A record with the same unique value already exists. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "422".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [422 Unprocessable Entity](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/422)\n\
                The request body is missing required fields or is not correctly formatted. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        responses.insert(
            "500".to_string(),
            RefOr::Object(OpenApiResponse {
                description: "\
                # [500 Internal Server Error](https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/500)\n\
                Something went wrong on the server. \
                "
                .to_string(),
                ..Default::default()
            }),
        );
        Ok(Responses {
            responses,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_name_the_clashing_field() {
        assert_eq!(
            unique_violation_message(
                "duplicate key value violates unique constraint \"users_username_key\""
            ),
            "This username is already taken. Please try another."
        );
        assert_eq!(
            unique_violation_message(
                "duplicate key value violates unique constraint \"teams_code_key\""
            ),
            "This team code is already in use."
        );
        assert_eq!(
            unique_violation_message("duplicate key value violates unique constraint \"x\""),
            "A record with this data already exists."
        );
    }

    #[test]
    fn other_database_errors_are_internal() {
        let err: GenericError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, GenericError::UnknownError(_)));
    }
}
