#![forbid(unsafe_code)]
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate diesel_derive_newtype;

pub mod actions;
pub mod config;
pub mod errors;
pub mod models;
pub mod policy;
mod routes;
mod schema;
pub mod types;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use actix_web::web::{Data, ServiceConfig};
use actix_web::{web, App, HttpServer};
use serde::Deserialize;
use tracing_actix_web::TracingLogger;
use types::DbPool;
use utils::session::SessionStore;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LoggerFormat {
    Json,
    Pretty,
}

pub struct AppData {
    pub pool: DbPool,
    pub sessions: Arc<dyn SessionStore>,
}

pub fn configure_app(
    app_data: Data<AppData>,
) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        // every resource answers unmapped verbs with 501
        let unmapped_verb =
            || web::route().to(routes::misc::not_implemented);
        // malformed query strings get the same error body as every other
        // parameter failure
        let query_config = web::QueryConfig::default().error_handler(
            |err, _req| {
                errors::DomainError::new_parameter_format(
                    errors::ParameterErrorCode::Format,
                    format!("Parameter not correct: {err}"),
                )
                .into()
            },
        );
        cfg.app_data(app_data.clone()).app_data(query_config).service(
            web::scope("/api/v1.0")
                .service(
                    web::resource("/jobs")
                        .route(web::get().to(routes::jobs::list_public_jobs))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/job")
                        .route(web::post().to(routes::jobs::create_job))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/job/{job_id}")
                        .route(web::get().to(routes::jobs::get_job))
                        .route(web::put().to(routes::jobs::update_job))
                        .route(web::delete().to(routes::jobs::delete_job))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/job/{job_id}/applications")
                        .route(
                            web::get().to(
                                routes::applications::list_job_applications,
                            ),
                        )
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/application")
                        .route(
                            web::post()
                                .to(routes::applications::create_application),
                        )
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/application/{application_id}")
                        .route(
                            web::get()
                                .to(routes::applications::get_application),
                        )
                        .route(
                            web::put()
                                .to(routes::applications::update_application),
                        )
                        .route(
                            web::delete()
                                .to(routes::applications::delete_application),
                        )
                        .default_service(unmapped_verb()),
                )
                // registered before /user/{user_id} so "applications" is
                // not taken for a user id
                .service(
                    web::resource("/user/applications")
                        .route(
                            web::get().to(
                                routes::applications::list_own_applications,
                            ),
                        )
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/user")
                        .route(web::get().to(routes::users::get_self))
                        .route(web::put().to(routes::users::update_self))
                        .route(web::post().to(routes::users::create_user))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/user/{user_id}/jobs")
                        .route(
                            web::get().to(routes::jobs::list_author_jobs),
                        )
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/user/{user_id}")
                        .route(web::get().to(routes::users::get_user))
                        .route(web::put().to(routes::users::update_user))
                        .route(web::delete().to(routes::users::delete_user))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/users")
                        .route(web::get().to(routes::users::list_users))
                        .default_service(unmapped_verb()),
                )
                .service(
                    web::resource("/clean")
                        .route(web::post().to(routes::misc::clean))
                        .default_service(unmapped_verb()),
                ),
        );
    })
}

pub async fn run(addr: String, app_data: Data<AppData>) -> anyhow::Result<()> {
    let _ = tracing::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let app = move || {
        App::new()
            .configure(configure_app(app_data.clone()))
            .wrap(TracingLogger::default())
    };
    HttpServer::new(app)
        .bind(addr)?
        .run()
        .await
        .map_err(|err| anyhow::anyhow!(err))
}
