use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::errors::DomainError;
use crate::models::applications::{
    Application, ApplicationChangeset, ApplicationId, ApplicationView,
    ApplicationWithAuthor, ApplicationWithJob, CreateApplicationPayload,
    NewApplication, UpdateApplicationPayload,
};
use crate::models::jobs::{Job, JobId};
use crate::models::pagination::Take;
use crate::models::users::{User, UserId};
use crate::validation;

pub fn find_application_by_id(
    application_id: &ApplicationId,
    conn: &mut PgConnection,
) -> Result<Option<Application>, DomainError> {
    use crate::schema::applications::dsl as applications;

    let maybe_application = applications::applications
        .find(application_id)
        .select(Application::as_select())
        .first::<Application>(conn)
        .optional();

    Ok(maybe_application?)
}

/// The application a given worker filed for a given job, if any.
pub fn find_application_for_job(
    job_id: &JobId,
    author_id: &UserId,
    conn: &mut PgConnection,
) -> Result<Option<Application>, DomainError> {
    use crate::schema::applications::dsl as applications;

    let maybe_application = applications::applications
        .filter(applications::job_id.eq(job_id))
        .filter(applications::author_id.eq(author_id))
        .select(Application::as_select())
        .first::<Application>(conn)
        .optional();

    Ok(maybe_application?)
}

pub fn insert_new_application(
    author_id: &UserId,
    payload: CreateApplicationPayload,
    conn: &mut PgConnection,
) -> Result<ApplicationView, DomainError> {
    use crate::schema::applications::dsl as applications;

    validation::validate_cover_letter(&payload.cover_letter)?;

    let na = NewApplication {
        cover_letter: payload.cover_letter,
        job_id: JobId::from(payload.job_id),
        author_id: author_id.clone(),
    };
    match diesel::insert_into(applications::applications)
        .values(&na)
        .returning(Application::as_returning())
        .get_result::<Application>(conn)
    {
        Ok(application) => Ok(application.into()),
        // one application per (job, worker) pair, enforced by the db
        Err(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        )) => Err(DomainError::new_duplicate(format!(
            "application for job {} by user {}",
            na.job_id, na.author_id
        ))),
        Err(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => Err(DomainError::new_entity_does_not_exist(format!(
            "No job found with id: {}",
            na.job_id
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Applications received by a job, newest first, each with its author.
pub fn get_job_applications(
    job_id: &JobId,
    take: Option<i64>,
    cursor: Option<i32>,
    conn: &mut PgConnection,
) -> Result<Vec<ApplicationWithAuthor>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::users::dsl as users;

    let take = Take::validated(take)?;
    let mut query = applications::applications
        .inner_join(users::users)
        .select((Application::as_select(), User::as_select()))
        .filter(applications::job_id.eq(job_id))
        .order(applications::id.desc())
        .limit(take.as_i64())
        .into_boxed();
    if let Some(cursor) = cursor {
        query = query
            .filter(applications::id.lt(ApplicationId::from(cursor)));
    }

    let rows = query.load::<(Application, User)>(conn)?;
    Ok(rows
        .into_iter()
        .map(|(application, author)| ApplicationWithAuthor {
            application: application.into(),
            author: author.into(),
        })
        .collect())
}

/// Applications filed by a worker, newest first, each with its job.
pub fn get_author_applications(
    author_id: &UserId,
    take: Option<i64>,
    cursor: Option<i32>,
    conn: &mut PgConnection,
) -> Result<Vec<ApplicationWithJob>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;

    let take = Take::validated(take)?;
    let mut query = applications::applications
        .inner_join(jobs::jobs)
        .select((Application::as_select(), Job::as_select()))
        .filter(applications::author_id.eq(author_id))
        .order(applications::id.desc())
        .limit(take.as_i64())
        .into_boxed();
    if let Some(cursor) = cursor {
        query = query
            .filter(applications::id.lt(ApplicationId::from(cursor)));
    }

    let rows = query.load::<(Application, Job)>(conn)?;
    Ok(rows
        .into_iter()
        .map(|(application, job)| ApplicationWithJob {
            application: application.into(),
            job: job.into(),
        })
        .collect())
}

pub fn update_application(
    application_id: &ApplicationId,
    payload: UpdateApplicationPayload,
    conn: &mut PgConnection,
) -> Result<ApplicationView, DomainError> {
    use crate::schema::applications::dsl as applications;

    if let Some(cover_letter) = payload.cover_letter.set_value() {
        validation::validate_cover_letter(cover_letter)?;
    }

    let changeset = ApplicationChangeset {
        cover_letter: payload.cover_letter.into_required_change("coverLetter")?,
        updated_at: Utc::now(),
    };
    match diesel::update(applications::applications.find(application_id))
        .set(&changeset)
        .returning(Application::as_returning())
        .get_result::<Application>(conn)
    {
        Ok(application) => Ok(application.into()),
        Err(DieselError::NotFound) => {
            Err(DomainError::new_entity_does_not_exist(format!(
                "No application found with id: {application_id}"
            )))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn delete_application(
    application_id: &ApplicationId,
    conn: &mut PgConnection,
) -> Result<(), DomainError> {
    use crate::schema::applications::dsl as applications;

    let deleted =
        diesel::delete(applications::applications.find(application_id))
            .execute(conn)?;
    if deleted == 0 {
        Err(DomainError::new_entity_does_not_exist(format!(
            "No application found with id: {application_id}"
        )))
    } else {
        Ok(())
    }
}
