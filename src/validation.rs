//! Field-level validation rules for the mutable fields of User, Job and
//! Application. Pure predicates: no persistence call happens before every
//! present field has passed its rule.

use crate::errors::{DomainError, ParameterErrorCode};
use bigdecimal::BigDecimal;
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

lazy_static! {
    pub static ref NAME_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9'.\s\-]+$").unwrap();
    pub static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[0-9A-Za-z_\-\.]+@([0-9A-Za-z_-]+\.)+[0-9A-Za-z_-]{2,4}$")
            .unwrap();
    pub static ref USERNAME_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._\-]+$").unwrap();
    pub static ref URL_PATTERN: Regex = Regex::new(
        r"^(\b(https?|ftp|file)://)[-A-Za-z0-9+&@#/%?=~_|!:,.;]+[-A-Za-z0-9+&@#/%=~_|]$"
    )
    .unwrap();
    pub static ref DECIMAL_PATTERN: Regex =
        Regex::new(r"^\d{1,6}(\.\d{0,3})?$").unwrap();
    /// printable ASCII plus whitespace; length is checked separately so
    /// that size violations report the size error code
    static ref PRINTABLE_PATTERN: Regex =
        Regex::new(r"^[\t\r\n\x20-\x7e]*$").unwrap();
}

pub const JOB_TITLE_MIN_SIZE: usize = 1;
pub const JOB_TITLE_MAX_SIZE: usize = 80;
pub const JOB_DESCRIPTION_MIN_SIZE: usize = 1;
pub const JOB_DESCRIPTION_MAX_SIZE: usize = 2000;
pub const JOB_LOCATION_MIN_SIZE: usize = 1;
pub const JOB_LOCATION_MAX_SIZE: usize = 80;
pub const COVER_LETTER_MIN_SIZE: usize = 1;
pub const COVER_LETTER_MAX_SIZE: usize = 1000;

fn check_pattern(
    pattern: &Regex,
    value: &str,
    field: &str,
) -> Result<(), DomainError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(DomainError::new_parameter_format(
            ParameterErrorCode::Format,
            format!("Parameter not correct: {field} {value}"),
        ))
    }
}

fn check_bounded_text(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(DomainError::new_parameter_format(
            ParameterErrorCode::Size,
            format!("Parameter not correct: {field} size {len} not in {min}-{max}"),
        ))
    } else {
        check_pattern(&PRINTABLE_PATTERN, value, field)
    }
}

pub fn validate_name(value: &str) -> Result<(), DomainError> {
    check_pattern(&NAME_PATTERN, value, "name")
}

pub fn validate_email(value: &str) -> Result<(), DomainError> {
    check_pattern(&EMAIL_PATTERN, value, "email")
}

pub fn validate_username(value: &str) -> Result<(), DomainError> {
    check_pattern(&USERNAME_PATTERN, value, "username")
}

pub fn validate_image_path(value: &str) -> Result<(), DomainError> {
    check_pattern(&URL_PATTERN, value, "imagePath")
}

pub fn validate_job_title(value: &str) -> Result<(), DomainError> {
    check_bounded_text(value, "title", JOB_TITLE_MIN_SIZE, JOB_TITLE_MAX_SIZE)
}

pub fn validate_job_description(value: &str) -> Result<(), DomainError> {
    check_bounded_text(
        value,
        "description",
        JOB_DESCRIPTION_MIN_SIZE,
        JOB_DESCRIPTION_MAX_SIZE,
    )
}

pub fn validate_job_location(value: &str) -> Result<(), DomainError> {
    check_bounded_text(
        value,
        "location",
        JOB_LOCATION_MIN_SIZE,
        JOB_LOCATION_MAX_SIZE,
    )
}

pub fn validate_cover_letter(value: &str) -> Result<(), DomainError> {
    check_bounded_text(
        value,
        "coverLetter",
        COVER_LETTER_MIN_SIZE,
        COVER_LETTER_MAX_SIZE,
    )
}

/// Checks the decimal rule (up to 6 integer digits, up to 3 fractional
/// digits) and parses the value for persistence.
pub fn parse_salary(value: &str) -> Result<BigDecimal, DomainError> {
    check_pattern(&DECIMAL_PATTERN, value, "salary")?;
    BigDecimal::from_str(value).map_err(|_| {
        DomainError::new_parameter_format(
            ParameterErrorCode::Format,
            format!("Parameter not correct: salary {value}"),
        )
    })
}
