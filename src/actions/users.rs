use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::errors::DomainError;
use crate::models::pagination::Take;
use crate::models::users::{
    CreateUserPayload, NewUser, Role, UpdateUserPayload, User, UserChangeset,
    UserId, UserView,
};
use crate::validation;

fn duplicate_email(err: DieselError, email: &str) -> DomainError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DomainError::new_duplicate(format!(
                "email {email} already registered"
            ))
        }
        err => err.into(),
    }
}

pub fn find_user_by_uid(
    uid: &UserId,
    conn: &mut PgConnection,
) -> Result<Option<User>, DomainError> {
    use crate::schema::users::dsl as users;

    let maybe_user = users::users
        .find(uid)
        .select(User::as_select())
        .first::<User>(conn)
        .optional();

    Ok(maybe_user?)
}

pub fn insert_new_user(
    payload: CreateUserPayload,
    conn: &mut PgConnection,
) -> Result<UserView, DomainError> {
    use crate::schema::users::dsl as users;

    if let Some(name) = payload.name.as_deref() {
        validation::validate_name(name)?;
    }
    validation::validate_email(&payload.email)?;
    if let Some(username) = payload.username.as_deref() {
        validation::validate_username(username)?;
    }
    if let Some(image_path) = payload.image_path.as_deref() {
        validation::validate_image_path(image_path)?;
    }

    let nu = NewUser {
        id: UserId::generate(),
        name: payload.name,
        email: payload.email,
        username: payload.username,
        image_path: payload.image_path,
        role: payload.role.unwrap_or_default(),
    };
    let user = diesel::insert_into(users::users)
        .values(&nu)
        .returning(User::as_returning())
        .get_result::<User>(conn)
        .map_err(|err| duplicate_email(err, &nu.email))?;

    Ok(user.into())
}

pub fn get_users(
    take: Option<i64>,
    cursor: Option<&UserId>,
    role_filter: Option<Role>,
    conn: &mut PgConnection,
) -> Result<Vec<UserView>, DomainError> {
    use crate::schema::users::dsl as users;

    let take = Take::validated(take)?;
    let mut query = users::users
        .select(User::as_select())
        .order((users::created_at.desc(), users::id.desc()))
        .limit(take.as_i64())
        .into_boxed();
    if let Some(cursor) = cursor {
        // uuid ids carry no order, so the cursor anchors on the cursor
        // row's creation time with the id as tie-break
        let anchor = find_user_by_uid(cursor, conn)?.ok_or_else(|| {
            DomainError::new_entity_does_not_exist(format!(
                "No user found with uid: {cursor}"
            ))
        })?;
        query = query.filter(
            users::created_at.lt(anchor.created_at).or(users::created_at
                .eq(anchor.created_at)
                .and(users::id.lt(cursor))),
        );
    }
    if let Some(role) = role_filter {
        query = query.filter(users::role.eq(role));
    }

    let rows = query.load::<User>(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub fn update_user(
    uid: &UserId,
    payload: UpdateUserPayload,
    conn: &mut PgConnection,
) -> Result<UserView, DomainError> {
    use crate::schema::users::dsl as users;

    if let Some(name) = payload.name.set_value() {
        validation::validate_name(name)?;
    }
    if let Some(email) = payload.email.set_value() {
        validation::validate_email(email)?;
    }
    if let Some(username) = payload.username.set_value() {
        validation::validate_username(username)?;
    }
    if let Some(image_path) = payload.image_path.set_value() {
        validation::validate_image_path(image_path)?;
    }

    let changeset = UserChangeset {
        name: payload.name.into_nullable_change(),
        email: payload.email.into_required_change("email")?,
        username: payload.username.into_nullable_change(),
        image_path: payload.image_path.into_nullable_change(),
        role: payload.role.into_required_change("role")?,
        updated_at: Utc::now(),
    };
    let email = changeset.email.clone();
    match diesel::update(users::users.find(uid))
        .set(&changeset)
        .returning(User::as_returning())
        .get_result::<User>(conn)
    {
        Ok(user) => Ok(user.into()),
        Err(DieselError::NotFound) => {
            Err(DomainError::new_entity_does_not_exist(format!(
                "No user found with uid: {uid}"
            )))
        }
        Err(err) => Err(duplicate_email(err, email.as_deref().unwrap_or(""))),
    }
}

pub fn delete_user(
    uid: &UserId,
    conn: &mut PgConnection,
) -> Result<(), DomainError> {
    use crate::schema::users::dsl as users;

    // owned jobs and applications go with the user via cascading deletes
    let deleted = diesel::delete(users::users.find(uid)).execute(conn)?;
    if deleted == 0 {
        Err(DomainError::new_entity_does_not_exist(format!(
            "No user found with uid: {uid}"
        )))
    } else {
        Ok(())
    }
}
