use diesel::pg::Pg;
use diesel::query_builder::{AstPass, QueryFragment, QueryId};
use diesel::result::QueryResult;
use diesel::{Connection, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};

use crate::errors::DomainError;
use crate::models::users::UserId;

// below code is taken from diesel_cli

fn change_database_of_url(
    database_url: &str,
    default_database: &str,
) -> anyhow::Result<(String, String)> {
    let base = ::url::Url::parse(database_url)?;
    let database = base
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .ok_or_else(|| anyhow::anyhow!("database url has no database name"))?
        .to_owned();
    let mut new_url = base.join(default_database)?;
    new_url.set_query(base.query());
    Ok((database, new_url.to_string()))
}

#[derive(Debug, Clone)]
pub struct CreateDatabaseStatement {
    db_name: String,
}

impl CreateDatabaseStatement {
    pub fn new(db_name: &str) -> Self {
        CreateDatabaseStatement {
            db_name: db_name.to_owned(),
        }
    }
}

impl QueryFragment<Pg> for CreateDatabaseStatement {
    fn walk_ast<'b>(&'b self, mut out: AstPass<'_, 'b, Pg>) -> QueryResult<()> {
        out.push_sql("CREATE DATABASE ");
        out.push_identifier(&self.db_name)?;
        Ok(())
    }
}

impl<Conn> RunQueryDsl<Conn> for CreateDatabaseStatement {}

impl QueryId for CreateDatabaseStatement {
    type QueryId = ();

    const HAS_STATIC_QUERY_ID: bool = false;
}

fn create_database(db_name: &str) -> CreateDatabaseStatement {
    CreateDatabaseStatement::new(db_name)
}

pub fn create_database_if_needed(database_url: &str) -> anyhow::Result<()> {
    if PgConnection::establish(database_url).is_err() {
        let (database, postgres_url) =
            change_database_of_url(database_url, "postgres")?;
        tracing::info!("Creating database: {database}");
        let mut conn = PgConnection::establish(&postgres_url)?;
        create_database(&database).execute(&mut conn)?;
    } else {
        tracing::info!("Detected existing database");
    }
    Ok(())
}

/// Wipes every application, job and user except the calling admin, as a
/// single transaction so an interruption cannot leave dangling references.
pub fn clean_database(
    keep: &UserId,
    conn: &mut PgConnection,
) -> Result<(), DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(applications::applications).execute(conn)?;
        diesel::delete(jobs::jobs).execute(conn)?;
        diesel::delete(users::users.filter(users::id.ne(keep)))
            .execute(conn)?;
        Ok(())
    })?;
    Ok(())
}
