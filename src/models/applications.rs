use crate::schema::applications;
use chrono::{DateTime, Utc};
use derive_more::{Display, Into};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::field_update::FieldUpdate;
use super::jobs::{JobId, JobView};
use super::users::{to_wire_date, UserId, UserView};

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    Display,
    Into,
    DieselNewType,
)]
pub struct ApplicationId(i32);

impl From<i32> for ApplicationId {
    fn from(value: i32) -> ApplicationId {
        ApplicationId(value)
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Application {
    pub id: ApplicationId,
    pub cover_letter: String,
    pub job_id: JobId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplication {
    pub cover_letter: String,
    pub job_id: JobId,
    pub author_id: UserId,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = applications)]
pub struct ApplicationChangeset {
    pub cover_letter: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub cover_letter: String,
    pub job_id: JobId,
    pub author_id: UserId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Application> for ApplicationView {
    fn from(application: Application) -> ApplicationView {
        ApplicationView {
            id: application.id,
            cover_letter: application.cover_letter,
            job_id: application.job_id,
            author_id: application.author_id,
            created_at: to_wire_date(application.created_at),
            updated_at: to_wire_date(application.updated_at),
        }
    }
}

/// Listing element for a job's applications (COMPANY view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithAuthor {
    pub application: ApplicationView,
    pub author: UserView,
}

/// Listing element for a worker's own applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    pub application: ApplicationView,
    pub job: JobView,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub job_id: i32,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationPayload {
    #[serde(default)]
    pub cover_letter: FieldUpdate<String>,
}
