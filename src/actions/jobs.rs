use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::errors::DomainError;
use crate::models::jobs::{
    CreateJobPayload, Job, JobChangeset, JobId, JobView, JobWithAuthor,
    NewJob, UpdateJobPayload,
};
use crate::models::pagination::Take;
use crate::models::users::{User, UserId};
use crate::policy::PublishedScope;
use crate::validation;

pub fn find_job_by_id(
    job_id: &JobId,
    conn: &mut PgConnection,
) -> Result<Option<Job>, DomainError> {
    use crate::schema::jobs::dsl as jobs;

    let maybe_job = jobs::jobs
        .find(job_id)
        .select(Job::as_select())
        .first::<Job>(conn)
        .optional();

    Ok(maybe_job?)
}

/// Fetches a job together with the number of applications it received.
pub fn get_job_with_count(
    job_id: &JobId,
    conn: &mut PgConnection,
) -> Result<Option<(Job, i64)>, DomainError> {
    use crate::schema::applications::dsl as applications;

    match find_job_by_id(job_id, conn)? {
        None => Ok(None),
        Some(job) => {
            let app_count = applications::applications
                .filter(applications::job_id.eq(job.id))
                .count()
                .get_result::<i64>(conn)?;
            Ok(Some((job, app_count)))
        }
    }
}

pub fn insert_new_job(
    author_id: &UserId,
    payload: CreateJobPayload,
    conn: &mut PgConnection,
) -> Result<JobView, DomainError> {
    use crate::schema::jobs::dsl as jobs;

    validation::validate_job_title(&payload.title)?;
    validation::validate_job_description(&payload.description)?;
    let salary = validation::parse_salary(&payload.salary)?;
    validation::validate_job_location(&payload.location)?;

    let nj = NewJob {
        title: payload.title,
        description: payload.description,
        salary,
        location: payload.location,
        published: payload.published.unwrap_or(false),
        author_id: author_id.clone(),
    };
    let job = diesel::insert_into(jobs::jobs)
        .values(&nj)
        .returning(Job::as_returning())
        .get_result::<Job>(conn)?;

    Ok(job.into())
}

/// Cursor listing, newest first, with the author projection and the
/// application count assembled in the same call.
pub fn get_jobs(
    scope: PublishedScope,
    author_id: Option<&UserId>,
    take: Option<i64>,
    cursor: Option<i32>,
    conn: &mut PgConnection,
) -> Result<Vec<JobWithAuthor>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;

    let take = Take::validated(take)?;
    let mut query = jobs::jobs
        .inner_join(users::users)
        .select((Job::as_select(), User::as_select()))
        .order(jobs::id.desc())
        .limit(take.as_i64())
        .into_boxed();
    if let Some(author_id) = author_id {
        query = query.filter(jobs::author_id.eq(author_id));
    }
    if scope == PublishedScope::PublishedOnly {
        query = query.filter(jobs::published.eq(true));
    }
    if let Some(cursor) = cursor {
        query = query.filter(jobs::id.lt(JobId::from(cursor)));
    }

    let rows = query.load::<(Job, User)>(conn)?;
    let counts = application_counts(
        rows.iter().map(|(job, _)| job.id).collect(),
        conn,
    )?;
    Ok(rows
        .into_iter()
        .map(|(job, author)| JobWithAuthor {
            app_count: counts.get(&job.id).copied().unwrap_or(0),
            job: job.into(),
            author: author.into(),
        })
        .collect())
}

fn application_counts(
    job_ids: Vec<JobId>,
    conn: &mut PgConnection,
) -> Result<HashMap<JobId, i64>, DomainError> {
    use crate::schema::applications::dsl as applications;

    if job_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = applications::applications
        .filter(applications::job_id.eq_any(job_ids))
        .group_by(applications::job_id)
        .select((applications::job_id, diesel::dsl::count_star()))
        .load::<(JobId, i64)>(conn)?;
    Ok(rows.into_iter().collect())
}

pub fn update_job(
    job_id: &JobId,
    payload: UpdateJobPayload,
    conn: &mut PgConnection,
) -> Result<JobView, DomainError> {
    use crate::schema::jobs::dsl as jobs;

    if let Some(title) = payload.title.set_value() {
        validation::validate_job_title(title)?;
    }
    if let Some(description) = payload.description.set_value() {
        validation::validate_job_description(description)?;
    }
    if let Some(location) = payload.location.set_value() {
        validation::validate_job_location(location)?;
    }
    let salary = match payload.salary.into_required_change("salary")? {
        Some(raw) => Some(validation::parse_salary(&raw)?),
        None => None,
    };

    let changeset = JobChangeset {
        title: payload.title.into_required_change("title")?,
        description: payload.description.into_required_change("description")?,
        salary,
        location: payload.location.into_required_change("location")?,
        published: payload.published.into_required_change("published")?,
        updated_at: Utc::now(),
    };
    match diesel::update(jobs::jobs.find(job_id))
        .set(&changeset)
        .returning(Job::as_returning())
        .get_result::<Job>(conn)
    {
        Ok(job) => Ok(job.into()),
        Err(DieselError::NotFound) => {
            Err(DomainError::new_entity_does_not_exist(format!(
                "No job found with id: {job_id}"
            )))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn delete_job(
    job_id: &JobId,
    conn: &mut PgConnection,
) -> Result<(), DomainError> {
    use crate::schema::jobs::dsl as jobs;

    let deleted = diesel::delete(jobs::jobs.find(job_id)).execute(conn)?;
    if deleted == 0 {
        Err(DomainError::new_entity_does_not_exist(format!(
            "No job found with id: {job_id}"
        )))
    } else {
        Ok(())
    }
}
