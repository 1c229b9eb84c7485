use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{HttpRequest, HttpResponse};
use futures::future::try_join;

use crate::actions;
use crate::errors::DomainError;
use crate::models::jobs::{
    CreateJobPayload, Job, JobDetail, JobId, UpdateJobPayload,
};
use crate::models::pagination::{AuthorJobsQuery, PageQuery};
use crate::models::users::{Role, UserId};
use crate::policy::{self, Action, PublishedScope};
use crate::utils::auth;
use crate::AppData;

pub(crate) async fn load_job(
    app_data: Data<AppData>,
    job_id: JobId,
) -> Result<Option<Job>, DomainError> {
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::find_job_by_id(&job_id, &mut conn)
    })
    .await?
}

/// Public listing of published jobs, newest first.
pub async fn list_public_jobs(
    app_data: Data<AppData>,
    query: Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let query = query.into_inner();
    let jobs = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::get_jobs(
            PublishedScope::PublishedOnly,
            None,
            query.take,
            query.cursor,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}

pub async fn create_job(
    app_data: Data<AppData>,
    req: HttpRequest,
    payload: Json<CreateJobPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let caller = auth::require_caller(app_data.clone(), uid).await?;
    policy::enforce(caller.role, &caller.id, &Action::CreateJob)?;
    let payload = payload.into_inner();
    let job = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::insert_new_job(&caller.id, payload, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created().json(job))
}

/// Public job detail. WORKER callers additionally get their own application
/// for the job, if they filed one.
pub async fn get_job(
    app_data: Data<AppData>,
    req: HttpRequest,
    job_id: Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let job_id = JobId::from(job_id.into_inner());
    let caller = auth::maybe_caller(app_data.clone(), &req).await?;

    let detail = web::block(move || {
        let mut conn = app_data.pool.get()?;
        let (job, app_count) =
            actions::jobs::get_job_with_count(&job_id, &mut conn)?
                .ok_or_else(|| {
                    DomainError::new_entity_does_not_exist(format!(
                        "No job found with id: {job_id}"
                    ))
                })?;
        let application = match caller {
            Some(ref user) if user.role == Role::Worker => {
                actions::applications::find_application_for_job(
                    &job.id, &user.id, &mut conn,
                )?
                .map(Into::into)
            }
            _ => None,
        };
        Ok::<_, DomainError>(JobDetail {
            job: job.into(),
            app_count,
            application,
        })
    })
    .await??;
    Ok(HttpResponse::Ok().json(detail))
}

pub async fn update_job(
    app_data: Data<AppData>,
    req: HttpRequest,
    job_id: Path<i32>,
    payload: Json<UpdateJobPayload>,
) -> Result<HttpResponse, DomainError> {
    let uid = auth::require_session(&app_data, &req).await?;
    let job_id = JobId::from(job_id.into_inner());
    let (caller, maybe_job) = try_join(
        auth::require_caller(app_data.clone(), uid),
        load_job(app_data.clone(), job_id),
    )
    .await?;
    // a missing job and someone else's job look the same to the caller
    let job = maybe_job.ok_or_else(DomainError::new_not_allowed)?;
    policy::enforce(
        caller.role,
        &caller.id,
        &Action::ModifyJob {
            job_author_id: &job.author_id,
        },
    )?;
    let payload = payload.into_inner();
    let job = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::update_job(&job_id, payload, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(job))
}

pub async fn delete_job(
    app_data: Data<AppData>,
    req: HttpRequest,
    job_id: Path<i32>,
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
        &Action::ModifyJob {
            job_author_id: &job.author_id,
        },
    )?;
    web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::delete_job(&job_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().finish())
}

/// Jobs posted by one author. The owning COMPANY sees its unpublished
/// posts too; everyone else only the published ones.
pub async fn list_author_jobs(
    app_data: Data<AppData>,
    req: HttpRequest,
    author_id: Path<String>,
    query: Query<AuthorJobsQuery>,
) -> Result<HttpResponse, DomainError> {
    let author_id = UserId::from(author_id.into_inner());
    let caller = auth::maybe_caller(app_data.clone(), &req).await?;
    let scope = policy::author_jobs_scope(
        caller.as_ref().map(|user| (user.role, &user.id)),
        &author_id,
    )
    .narrowed(query.only_published.unwrap_or(false));
    let query = query.into_inner();
    let jobs = web::block(move || {
        let mut conn = app_data.pool.get()?;
        actions::jobs::get_jobs(
            scope,
            Some(&author_id),
            query.take,
            query.cursor,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}
