use crate::common;

#[cfg(test)]
mod tests {

    use super::*;
    extern crate jobboard;
    use actix_web::dev::Service as _;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use crate::common::WithToken;
    use jobboard::models::api_response::ErrorBody;
    use jobboard::models::users::Role;
    use serde_json::{json, Value};

    const COMPANY_TOKEN: &str = "company-token";
    const WORKER_TOKEN: &str = "worker-token";
    const OTHER_WORKER_TOKEN: &str = "other-worker-token";

    #[actix_rt::test]
    async fn application_is_visible_to_its_author_and_the_job_owner_only() {
        let res: anyhow::Result<()> = async {
            let (connspec, _pg) = common::test_with_postgres().await?;
            let data = common::app_data(&connspec).await?;
            let app = common::test_app(data.clone()).await;
            let _ = common::seed_user(
                &data,
                "acme@jobboard.test",
                Role::Company,
                COMPANY_TOKEN,
            )
            .await?;
            let worker = common::seed_user(
                &data,
                "worker@jobboard.test",
                Role::Worker,
                WORKER_TOKEN,
            )
            .await?;
            let _ = common::seed_user(
                &data,
                "bystander@jobboard.test",
                Role::Worker,
                OTHER_WORKER_TOKEN,
            )
            .await?;

            let req = test::TestRequest::post()
                .uri("/api/v1.0/job")
                .with_token(COMPANY_TOKEN)
                .set_json(json!({
                    "title": "Backend engineer",
                    "description": "Rust services",
                    "salary": "2000",
                    "location": "Remote",
                    "published": true
                }))
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
            let job: Value = test::read_body_json(resp).await;
            let job_id = job["id"].as_i64().unwrap();

            let req = test::TestRequest::post()
                .uri("/api/v1.0/application")
                .with_token(WORKER_TOKEN)
                .set_json(json!({
                    "jobId": job_id,
                    "coverLetter": "Example cover letter"
                }))
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
            let application: Value = test::read_body_json(resp).await;
            assert_eq!(application["authorId"], json!(worker.to_string()));
            assert_eq!(application["jobId"], json!(job_id));
            let app_id = application["id"].as_i64().unwrap();

            // the author reads it back
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/application/{app_id}"))
                .with_token(WORKER_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);

            // another worker gets the same answer as for a missing id
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/application/{app_id}"))
                .with_token(OTHER_WORKER_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body: ErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.error_code, Some("PHE0002".to_owned()));

            // the job owner may read it too
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/application/{app_id}"))
                .with_token(COMPANY_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            Ok(())
        }
        .await;
        res.unwrap();
    }

    #[actix_rt::test]
    async fn a_worker_cannot_apply_to_the_same_job_twice() {
        let res: anyhow::Result<()> = async {
            let (connspec, _pg) = common::test_with_postgres().await?;
            let data = common::app_data(&connspec).await?;
            let app = common::test_app(data.clone()).await;
            let _ = common::seed_user(
                &data,
                "acme@jobboard.test",
                Role::Company,
                COMPANY_TOKEN,
            )
            .await?;
            let _ = common::seed_user(
                &data,
                "worker@jobboard.test",
                Role::Worker,
                WORKER_TOKEN,
            )
            .await?;

            let req = test::TestRequest::post()
                .uri("/api/v1.0/job")
                .with_token(COMPANY_TOKEN)
                .set_json(json!({
                    "title": "Backend engineer",
                    "description": "Rust services",
                    "salary": "2000",
                    "location": "Remote",
                    "published": true
                }))
                .to_request();
            let job: Value =
                test::read_body_json(app.call(req).await.unwrap()).await;
            let job_id = job["id"].as_i64().unwrap();

            let payload = json!({
                "jobId": job_id,
                "coverLetter": "Example cover letter"
            });
            let req = test::TestRequest::post()
                .uri("/api/v1.0/application")
                .with_token(WORKER_TOKEN)
                .set_json(payload.clone())
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);

            // the unique (job, author) constraint surfaces as a client error
            let req = test::TestRequest::post()
                .uri("/api/v1.0/application")
                .with_token(WORKER_TOKEN)
                .set_json(payload)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: ErrorBody = test::read_body_json(resp).await;
            assert_eq!(body.name, "DuplicateEntityError");
            Ok(())
        }
        .await;
        res.unwrap();
    }

    #[actix_rt::test]
    async fn application_listings_carry_their_joined_entities() {
        let res: anyhow::Result<()> = async {
            let (connspec, _pg) = common::test_with_postgres().await?;
            let data = common::app_data(&connspec).await?;
            let app = common::test_app(data.clone()).await;
            let _ = common::seed_user(
                &data,
                "acme@jobboard.test",
                Role::Company,
                COMPANY_TOKEN,
            )
            .await?;
            let worker = common::seed_user(
                &data,
                "worker@jobboard.test",
                Role::Worker,
                WORKER_TOKEN,
            )
            .await?;

            let req = test::TestRequest::post()
                .uri("/api/v1.0/job")
                .with_token(COMPANY_TOKEN)
                .set_json(json!({
                    "title": "Backend engineer",
                    "description": "Rust services",
                    "salary": "2000",
                    "location": "Remote",
                    "published": true
                }))
                .to_request();
            let job: Value =
                test::read_body_json(app.call(req).await.unwrap()).await;
            let job_id = job["id"].as_i64().unwrap();

            let req = test::TestRequest::post()
                .uri("/api/v1.0/application")
                .with_token(WORKER_TOKEN)
                .set_json(json!({
                    "jobId": job_id,
                    "coverLetter": "Example cover letter"
                }))
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);

            // the owner sees applicants with their author records
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/job/{job_id}/applications"))
                .with_token(COMPANY_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let page: Vec<Value> = test::read_body_json(resp).await;
            assert_eq!(page.len(), 1);
            assert_eq!(page[0]["author"]["id"], json!(worker.to_string()));

            // the worker sees their own applications with the job attached
            let req = test::TestRequest::get()
                .uri("/api/v1.0/user/applications")
                .with_token(WORKER_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let page: Vec<Value> = test::read_body_json(resp).await;
            assert_eq!(page.len(), 1);
            assert_eq!(page[0]["job"]["id"], json!(job_id));

            // the job detail tells an applicant they already applied
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/job/{job_id}"))
                .with_token(WORKER_TOKEN)
                .to_request();
            let detail: Value =
                test::read_body_json(app.call(req).await.unwrap()).await;
            assert_eq!(detail["appCount"], 1);
            assert!(detail["application"].is_object());
            Ok(())
        }
        .await;
        res.unwrap();
    }
}
