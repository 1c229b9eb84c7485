use crate::schema::users;
use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::{Display, Into};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use super::field_update::FieldUpdate;

/// Opaque user identity. Assigned at creation, never derived from input.
#[derive(
    Debug,
    Clone,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    Display,
    Into,
    DieselNewType,
)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> UserId {
        UserId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(s: String) -> UserId {
        UserId(s)
    }
}

#[derive(DbEnum, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[DbValueStyle = "SCREAMING_SNAKE_CASE"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Company,
    Worker,
}

impl Default for Role {
    fn default() -> Self {
        Role::Worker
    }
}

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub image_path: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub image_path: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub name: Option<Option<String>>,
    pub email: Option<String>,
    pub username: Option<Option<String>>,
    pub image_path: Option<Option<String>>,
    pub role: Option<Role>,
    pub updated_at: DateTime<Utc>,
}

/// Wire-safe projection: timestamps as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub image_path: Option<String>,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

pub(crate) fn to_wire_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<User> for UserView {
    fn from(user: User) -> UserView {
        UserView {
            id: user.id,
            name: user.name,
            email: user.email,
            username: user.username,
            image_path: user.image_path,
            role: user.role,
            created_at: to_wire_date(user.created_at),
            updated_at: to_wire_date(user.updated_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub image_path: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[serde(default)]
    pub name: FieldUpdate<String>,
    #[serde(default)]
    pub email: FieldUpdate<String>,
    #[serde(default)]
    pub username: FieldUpdate<String>,
    #[serde(default)]
    pub image_path: FieldUpdate<String>,
    #[serde(default)]
    pub role: FieldUpdate<Role>,
}
