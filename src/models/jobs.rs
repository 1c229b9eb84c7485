use crate::schema::jobs;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use derive_more::{Display, Into};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::applications::ApplicationView;
use super::field_update::FieldUpdate;
use super::users::{to_wire_date, UserId, UserView};

///newtype to keep job ids out of the other integer id spaces
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
pub struct JobId(i32);

impl From<i32> for JobId {
    fn from(value: i32) -> JobId {
        JobId(value)
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub salary: BigDecimal,
    pub location: String,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub salary: BigDecimal,
    pub location: String,
    pub published: bool,
    pub author_id: UserId,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
pub struct JobChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary: Option<BigDecimal>,
    pub location: Option<String>,
    pub published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Wire-safe projection; the salary travels as a normalized decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobView {
    fn from(job: Job) -> JobView {
        JobView {
            id: job.id,
            title: job.title,
            description: job.description,
            salary: job.salary.normalized().to_string(),
            location: job.location,
            published: job.published,
            author_id: job.author_id,
            created_at: to_wire_date(job.created_at),
            updated_at: to_wire_date(job.updated_at),
        }
    }
}

/// Listing element: the author projection rides along with each job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithAuthor {
    pub job: JobView,
    pub author: UserView,
    pub app_count: i64,
}

/// Single-job response; `application` is present only when a WORKER caller
/// has applied to this job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub job: JobView,
    pub app_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[serde(default)]
    pub title: FieldUpdate<String>,
    #[serde(default)]
    pub description: FieldUpdate<String>,
    #[serde(default)]
    pub salary: FieldUpdate<String>,
    #[serde(default)]
    pub location: FieldUpdate<String>,
    #[serde(default)]
    pub published: FieldUpdate<bool>,
}
