use crate::errors::{DomainError, ParameterErrorCode};
use serde::Deserialize;

/// Page size for cursor listings, bounded 1-1000 with a default of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Take(i64);

impl Take {
    pub const DEFAULT: i64 = 10;
    pub const MINIMUM: i64 = 1;
    pub const MAXIMUM: i64 = 1000;

    pub fn validated(raw: Option<i64>) -> Result<Take, DomainError> {
        match raw {
            None => Ok(Take(Take::DEFAULT)),
            Some(value) if value < Take::MINIMUM => {
                Err(DomainError::new_parameter_format(
                    ParameterErrorCode::MinimumValue,
                    format!("Parameter not in range: take {value}"),
                ))
            }
            Some(value) if value > Take::MAXIMUM => {
                Err(DomainError::new_parameter_format(
                    ParameterErrorCode::MaximumValue,
                    format!("Parameter not in range: take {value}"),
                ))
            }
            Some(value) => Ok(Take(value)),
        }
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Query parameters for job/application listings; the cursor is the id of
/// the last element of the previous page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub take: Option<i64>,
    pub cursor: Option<i32>,
}

/// Author job listings add an owner-only switch to drop unpublished posts
/// from an otherwise lifted scope.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorJobsQuery {
    pub take: Option<i64>,
    pub cursor: Option<i32>,
    pub only_published: Option<bool>,
}

/// Users are keyed by opaque string ids, so their cursor is a string.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPageQuery {
    pub take: Option<i64>,
    pub cursor: Option<String>,
    pub role: Option<crate::models::users::Role>,
}
