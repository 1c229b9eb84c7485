use crate::common;

#[cfg(test)]
mod tests {

    use super::*;
    extern crate jobboard;
    use actix_web::dev::Service as _;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::web;
    use crate::common::WithToken;
    use jobboard::errors::DomainError;
    use jobboard::models::jobs::JobId;
    use jobboard::models::users::Role;
    use serde_json::{json, Value};

    const COMPANY_TOKEN: &str = "company-token";

    async fn create_job<S, B>(
        app: &S,
        title: &str,
        salary: &str,
        published: bool,
    ) -> Value
    where
        S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
        B: actix_web::body::MessageBody,
    {
        let req = test::TestRequest::post()
            .uri("/api/v1.0/job")
            .with_token(COMPANY_TOKEN)
            .set_json(json!({
                "title": title,
                "description": "Rust services",
                "salary": salary,
                "location": "Remote",
                "published": published
            }))
            .to_request();
        let resp = app.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        test::read_body_json(resp).await
    }

    #[actix_rt::test]
    async fn job_pages_visit_every_id_exactly_once_in_descending_order() {
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

            let mut created = Vec::new();
            for i in 0..25 {
                let body =
                    create_job(&app, &format!("Job {i}"), "1000", true).await;
                created.push(body["id"].as_i64().unwrap());
            }

            let mut seen: Vec<i64> = Vec::new();
            let mut cursor: Option<i64> = None;
            loop {
                let uri = match cursor {
                    Some(c) => format!("/api/v1.0/jobs?take=10&cursor={c}"),
                    None => "/api/v1.0/jobs?take=10".to_owned(),
                };
                let req = test::TestRequest::get().uri(&uri).to_request();
                let resp = app.call(req).await.unwrap();
                assert_eq!(resp.status(), StatusCode::OK);
                let page: Vec<Value> = test::read_body_json(resp).await;
                if page.is_empty() {
                    break;
                }
                for item in &page {
                    seen.push(item["job"]["id"].as_i64().unwrap());
                }
                if page.len() < 10 {
                    break;
                }
                cursor = Some(seen[seen.len() - 1]);
            }

            let mut expected = created.clone();
            expected.sort_unstable();
            expected.reverse();
            assert_eq!(seen, expected, "every id once, descending, no gaps");
            Ok(())
        }
        .await;
        res.unwrap();
    }

    #[actix_rt::test]
    async fn salary_round_trips_as_normalized_decimal_string() {
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

            let body = create_job(&app, "Engineer", "1234.120", true).await;
            assert_eq!(body["salary"], "1234.12");
            let id = body["id"].as_i64().unwrap();

            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/job/{id}"))
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let detail: Value = test::read_body_json(resp).await;
            assert_eq!(detail["job"]["salary"], "1234.12");
            assert_eq!(detail["appCount"], 0);

            let body = create_job(&app, "Analyst", "50000", true).await;
            assert_eq!(body["salary"], "50000");
            Ok(())
        }
        .await;
        res.unwrap();
    }

    #[actix_rt::test]
    async fn unpublished_job_is_readable_by_id_but_hidden_from_listings() {
        let res: anyhow::Result<()> = async {
            let (connspec, _pg) = common::test_with_postgres().await?;
            let data = common::app_data(&connspec).await?;
            let app = common::test_app(data.clone()).await;
            let company = common::seed_user(
                &data,
                "acme@jobboard.test",
                Role::Company,
                COMPANY_TOKEN,
            )
            .await?;

            let draft = create_job(&app, "Draft role", "900", false).await;
            let live = create_job(&app, "Live role", "900", true).await;
            let draft_id = draft["id"].as_i64().unwrap();

            // get-by-id is public even for drafts
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/job/{draft_id}"))
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);

            // the public list hides it
            let req =
                test::TestRequest::get().uri("/api/v1.0/jobs").to_request();
            let page: Vec<Value> =
                test::read_body_json(app.call(req).await.unwrap()).await;
            let ids: Vec<i64> = page
                .iter()
                .map(|item| item["job"]["id"].as_i64().unwrap())
                .collect();
            assert!(!ids.contains(&draft_id));
            assert!(ids.contains(&live["id"].as_i64().unwrap()));

            // the owner's author listing shows it
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/user/{company}/jobs"))
                .with_token(COMPANY_TOKEN)
                .to_request();
            let page: Vec<Value> =
                test::read_body_json(app.call(req).await.unwrap()).await;
            assert_eq!(page.len(), 2);

            // unless the owner narrows to published posts
            let req = test::TestRequest::get()
                .uri(&format!(
                    "/api/v1.0/user/{company}/jobs?onlyPublished=true"
                ))
                .with_token(COMPANY_TOKEN)
                .to_request();
            let page: Vec<Value> =
                test::read_body_json(app.call(req).await.unwrap()).await;
            assert_eq!(page.len(), 1);

            // anonymous callers never see drafts
            let req = test::TestRequest::get()
                .uri(&format!("/api/v1.0/user/{company}/jobs"))
                .to_request();
            let page: Vec<Value> =
                test::read_body_json(app.call(req).await.unwrap()).await;
            assert_eq!(page.len(), 1);
            Ok(())
        }
        .await;
        res.unwrap();
    }

    #[actix_rt::test]
    async fn deleting_a_job_twice_gives_the_same_outcome_both_times() {
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

            let body = create_job(&app, "Short lived", "100", true).await;
            let id = body["id"].as_i64().unwrap();

            let req = test::TestRequest::delete()
                .uri(&format!("/api/v1.0/job/{id}"))
                .with_token(COMPANY_TOKEN)
                .to_request();
            let resp = app.call(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);

            // a vanished job is indistinguishable from someone else's
            for _ in 0..2 {
                let req = test::TestRequest::delete()
                    .uri(&format!("/api/v1.0/job/{id}"))
                    .with_token(COMPANY_TOKEN)
                    .to_request();
                let resp = app.call(req).await.unwrap();
                assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            }

            // the entity layer itself reports not-found, both times
            for _ in 0..2 {
                let pool = data.pool.clone();
                let err = web::block(move || {
                    let mut conn = pool.get()?;
                    jobboard::actions::jobs::delete_job(
                        &JobId::from(999_999),
                        &mut conn,
                    )
                })
                .await
                .unwrap()
                .unwrap_err();
                assert!(matches!(
                    err,
                    DomainError::EntityDoesNotExist { .. }
                ));
            }
            Ok(())
        }
        .await;
        res.unwrap();
    }
}
