use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{HttpRequest, HttpResponse};

use crate::actions;
use crate::errors::DomainError;
use crate::models::field_update::FieldUpdate;
use crate::models::pagination::UsersPageQuery;
use crate::models::users::{
    CreateUserPayload, UpdateUserPayload, UserId, UserView,
};
use crate::policy::{self, Action};
use crate::utils::auth;
use crate::AppData;

pub async fn get_self(
    app_data: Data<AppData>,
    req: HttpRequest,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data, uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ReadSelf)?;
    Ok(HttpResponse::Ok().json(UserView::from(caller)))
}

/// Self-service profile update. The email is immutable here whatever the
/// payload says; only an admin may change it through the user admin route.
pub async fn update_self(
    app_data: Data<AppData>,
    req: HttpRequest,
    payload: Json<UpdateUserPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::UpdateSelf)?;
    let mut payload = payload.into_inner();
    payload.email = FieldUpdate::Unchanged;
    let user = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::update_user(&caller.id, payload, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    app_data: Data<AppData>,
    req: HttpRequest,
    payload: Json<CreateUserPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ManageUsers)?;
    let payload = payload.into_inner();
    let user = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::insert_new_user(payload, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created().json(user))
}

pub async fn get_user(
    app_data: Data<AppData>,
    req: HttpRequest,
    user_id: Path<String>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ManageUsers)?;
    let target = UserId::from(user_id.into_inner());
    let user = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::find_user_by_uid(&target, &mut conn)?.ok_or_else(
            || {
                DomainError::new_entity_does_not_exist(format!(
                    "No user found with uid: {target}"
                ))
            },
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(UserView::from(user)))
}

pub async fn update_user(
    app_data: Data<AppData>,
    req: HttpRequest,
    user_id: Path<String>,
    payload: Json<UpdateUserPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ManageUsers)?;
    let target = UserId::from(user_id.into_inner());
    let payload = payload.into_inner();
    let user = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::update_user(&target, payload, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    app_data: Data<AppData>,
    req: HttpRequest,
    user_id: Path<String>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ManageUsers)?;
    let target = UserId::from(user_id.into_inner());
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::delete_user(&target, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().finish())
}

pub async fn list_users(
    app_data: Data<AppData>,
    req: HttpRequest,
    query: Query<UsersPageQuery>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ManageUsers)?;
    let query = query.into_inner();
    let users = web::block(move || {
        let mut conn = app_data.pool.get()?;
        let cursor = query.cursor.map(UserId::from);
        actions::users::get_users(
            query.take,
            cursor.as_ref(),
            query.role,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(users))
}
