use crate::models::api_response::ErrorBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use custom_error::custom_error;
use derive_more::Display;

/// Stable machine-readable codes distinguishing the class of a parameter
/// failure: wrong shape vs wrong magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParameterErrorCode {
    #[display("PFE0001")]
    Format,
    #[display("PFE0002")]
    Size,
    #[display("PFE0003")]
    MinimumValue,
    #[display("PFE0004")]
    MaximumValue,
}

pub const NOT_LOGGED_IN_ERROR_CODE: &str = "PHE0001";
pub const NOT_ALLOWED_ERROR_CODE: &str = "PHE0002";
pub const NOT_IMPLEMENTED_ERROR_CODE: &str = "PHE0003";

custom_error! { #[derive(new)] #[allow(clippy::enum_variant_names)]
    pub DomainError
    ParameterFormat {code: ParameterErrorCode, message: String} = "Parameter format error [{code}] - {message}",
    Duplicate {message: String} = "Already exists - {message}",
    NotLoggedIn = "Not logged in",
    NotAllowed = "Method not allowed",
    EntityDoesNotExist {message: String} = "Entity does not exist - {message}",
    NotImplemented = "Method not implemented",
    DbError {source: diesel::result::Error} = "Database error",
    DbPoolError {source: r2d2::Error} = "Failed to get connection from pool",
    BlockingError {source: actix_web::error::BlockingError} = "Blocking error - {source}"
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::ParameterFormat { .. } | DomainError::Duplicate { .. } => {
                StatusCode::BAD_REQUEST
            }
            DomainError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            DomainError::NotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DomainError::EntityDoesNotExist { .. } => StatusCode::NOT_FOUND,
            DomainError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            DomainError::DbError { .. }
            | DomainError::DbPoolError { .. }
            | DomainError::BlockingError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let _ = tracing::error!("{:?}", self);
        let body = match self {
            DomainError::ParameterFormat { code, .. } => ErrorBody::new(
                self.to_string(),
                "ParameterFormatError".to_owned(),
                Some(code.to_string()),
            ),
            DomainError::Duplicate { .. } => ErrorBody::new(
                self.to_string(),
                "DuplicateEntityError".to_owned(),
                None,
            ),
            DomainError::NotLoggedIn => ErrorBody::new(
                self.to_string(),
                "HttpError".to_owned(),
                Some(NOT_LOGGED_IN_ERROR_CODE.to_owned()),
            ),
            DomainError::NotAllowed => ErrorBody::new(
                self.to_string(),
                "HttpError".to_owned(),
                Some(NOT_ALLOWED_ERROR_CODE.to_owned()),
            ),
            DomainError::EntityDoesNotExist { .. } => {
                ErrorBody::new(self.to_string(), "HttpError".to_owned(), None)
            }
            DomainError::NotImplemented => ErrorBody::new(
                self.to_string(),
                "HttpError".to_owned(),
                Some(NOT_IMPLEMENTED_ERROR_CODE.to_owned()),
            ),
            // infrastructure failures get a generic message; the detail
            // stays in the server-side trace above
            DomainError::DbError { .. }
            | DomainError::DbPoolError { .. }
            | DomainError::BlockingError { .. } => ErrorBody::new(
                "Internal error".to_owned(),
                "InternalError".to_owned(),
                None,
            ),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
