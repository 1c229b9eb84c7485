use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};

use crate::actions;
use crate::errors::DomainError;
use crate::policy::{self, Action};
use crate::utils::auth;
use crate::AppData;

/// Admin reset: removes every application, job and user except the caller.
pub async fn clean(
    app_data: Data<AppData>,
    req: HttpRequest,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::CleanDatabase)?;
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::misc::clean_database(&caller.id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().finish())
}

/// Default service for every resource: a known path with an unmapped verb.
pub async fn not_implemented() -> Result<HttpResponse, DomainError> {
    Err(DomainError::new_not_implemented())
}
