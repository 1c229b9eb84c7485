use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{HttpRequest, HttpResponse};
use futures::future::try_join;

use crate::actions;
use crate::errors::DomainError;
use crate::models::applications::{
    Application, ApplicationId, ApplicationView, CreateApplicationPayload,
    UpdateApplicationPayload,
};
use crate::models::jobs::JobId;
use crate::models::pagination::PageQuery;
use crate::policy::{self, Action};
use crate::routes::jobs::load_job;
use crate::utils::auth;
use crate::AppData;

async fn load_application(
    app_data: Data<AppData>,
    application_id: ApplicationId,
) -> Result<Option<Application>, DomainError> {
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::find_application_by_id(
            &application_id,
            &mut conn,
        )
    })
    .await?
}

pub async fn create_application(
    app_data: Data<AppData>,
    req: HttpRequest,
    payload: Json<CreateApplicationPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::CreateApplication)?;
    let payload = payload.into_inner();
    let application = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::insert_new_application(
            &caller.id, payload, &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Created().json(application))
}

/// Visible to the applicant and to the company that owns the job.
pub async fn get_application(
    app_data: Data<AppData>,
    req: HttpRequest,
    application_id: Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let application_id = ApplicationId::from(application_id.into_inner());
    let (caller, maybe_application) = try_join(
        auth::require_caller(app_data.clone(), uid),
        load_application(app_data.clone(), application_id),
    )
    .await?;
    let application =
        maybe_application.ok_or_else(DomainError::new_not_allowed)?;
    let job = load_job(app_data, application.job_id)
        .await?
        .ok_or_else(DomainError::new_not_allowed)?;
    policy::enforce(
        caller.role,
        &caller.id,
        &Action::ReadApplication {
            applicant_id: &application.author_id,
            job_author_id: &job.author_id,
        },
    )?;
    Ok(HttpResponse::Ok().json(ApplicationView::from(application)))
}

pub async fn update_application(
    app_data: Data<AppData>,
    req: HttpRequest,
    application_id: Path<i32>,
    payload: Json<UpdateApplicationPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let application_id = ApplicationId::from(application_id.into_inner());
    let (caller, maybe_application) = try_join(
        auth::require_caller(app_data.clone(), uid),
        load_application(app_data.clone(), application_id),
    )
    .await?;
    let application =
        maybe_application.ok_or_else(DomainError::new_not_allowed)?;
    policy::enforce(
        caller.role,
        &caller.id,
        &Action::ModifyApplication {
            applicant_id: &application.author_id,
        },
    )?;
    let payload = payload.into_inner();
    let application = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::update_application(
            &application_id,
            payload,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(application))
}

pub async fn delete_application(
    app_data: Data<AppData>,
    req: HttpRequest,
    application_id: Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let application_id = ApplicationId::from(application_id.into_inner());
    let (caller, maybe_application) = try_join(
        auth::require_caller(app_data.clone(), uid),
        load_application(app_data.clone(), application_id),
    )
    .await?;
    let application =
        maybe_application.ok_or_else(DomainError::new_not_allowed)?;
    policy::enforce(
        caller.role,
        &caller.id,
        &Action::ModifyApplication {
            applicant_id: &application.author_id,
        },
    )?;
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::delete_application(&application_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().finish())
}

/// Applications received by one of the caller's jobs.
pub async fn list_job_applications(
    app_data: Data<AppData>,
    req: HttpRequest,
    job_id: Path<i32>,
    query: Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let job_id = JobId::from(job_id.into_inner());
    let (caller, maybe_job) = try_join(
        auth::require_caller(app_data.clone(), uid),
        load_job(app_data.clone(), job_id),
    )
    .await?;
    let job = maybe_job.ok_or_else(DomainError::new_not_allowed)?;
    policy::enforce(
        caller.role,
        &caller.id,
        &Action::ListJobApplications {
            job_author_id: &job.author_id,
        },
    )?;
    let query = query.into_inner();
    let applications = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::get_job_applications(
            &job_id,
            query.take,
            query.cursor,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(applications))
}

/// Applications the calling worker has filed, each with its job.
pub async fn list_own_applications(
    app_data: Data<AppData>,
    req: HttpRequest,
    query: Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::ListOwnApplications)?;
    let query = query.into_inner();
    let applications = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::applications::get_author_applications(
            &caller.id,
            query.take,
            query.cursor,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(applications))
}
