use actix_web::http::header;
use actix_web::web::{self, Data};
use actix_web::HttpRequest;

use crate::actions;
use crate::errors::DomainError;
use crate::models::users::{User, UserId};
use crate::AppData;

/// Pulls the bearer token out of the Authorization header, if any.
pub fn extract_session_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

pub async fn resolve_session(
    app_data: &AppData,
    req: &HttpRequest,
) -> Result<Option<UserId>, DomainError> {
    match extract_session_token(req) {
        Some(token) => app_data.sessions.resolve(&token).await,
        None => Ok(None),
    }
}

/// Requires a resolvable session and yields the caller's id. Requests with
/// no token, or with a token the session store does not know, get 401.
pub async fn require_session(
    app_data: &AppData,
    req: &HttpRequest,
) -> Result<UserId, DomainError> {
    resolve_session(app_data, req)
        .await?
        .ok_or_else(DomainError::new_not_logged_in)
}

pub async fn load_user(
    app_data: Data<AppData>,
    uid: UserId,
) -> Result<Option<User>, DomainError> {
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::users::find_user_by_uid(&uid, &mut conn)
    })
    .await?
}

/// Loads the caller's user row. A session pointing at a deleted user is
/// treated the same as an insufficient role.
pub async fn require_caller(
    app_data: Data<AppData>,
    uid: UserId,
) -> Result<User, DomainError> {
    load_user(app_data, uid)
        .await?
        .ok_or_else(DomainError::new_not_allowed)
}

pub async fn maybe_caller(
    app_data: Data<AppData>,
    req: &HttpRequest,
) -> Result<Option<User>, DomainError> {
    match resolve_session(&app_data, req).await? {
        Some(uid) => load_user(app_data, uid).await,
        None => Ok(None),
    }
}
