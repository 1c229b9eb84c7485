use crate::common;

#[cfg(test)]
mod tests {

    use super::*;
    extern crate jobboard;
    use actix_web::dev::Service as _;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use jobboard::models::api_response::ErrorBody;

    async fn detached_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
    > {
        common::test_app(common::detached_app_data()).await
    }

    #[actix_rt::test]
    async fn unmapped_verb_on_known_resource_returns_501() {
        let req = test::TestRequest::delete()
            .uri("/api/v1.0/jobs")
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body,
            ErrorBody {
                message: "Method not implemented".to_owned(),
                name: "HttpError".to_owned(),
                error_code: Some("PHE0003".to_owned()),
            }
        );
    }

    #[actix_rt::test]
    async fn protected_route_without_token_returns_401() {
        let req = test::TestRequest::post()
            .uri("/api/v1.0/job")
            .set_json(serde_json::json!({
                "title": "Backend engineer",
                "description": "Rust services",
                "salary": "50000",
                "location": "Remote"
            }))
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body,
            ErrorBody {
                message: "Not logged in".to_owned(),
                name: "HttpError".to_owned(),
                error_code: Some("PHE0001".to_owned()),
            }
        );
    }

    #[actix_rt::test]
    async fn unknown_bearer_token_returns_401() {
        let req = test::TestRequest::get()
            .uri("/api/v1.0/user")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-session"))
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn clean_requires_a_session() {
        let req = test::TestRequest::post()
            .uri("/api/v1.0/clean")
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn own_applications_route_is_not_shadowed_by_user_id() {
        // a PUT lands on the listing resource's unmapped-verb default;
        // were "applications" taken for a user id it would reach the
        // user-update extractor instead
        let req = test::TestRequest::put()
            .uri("/api/v1.0/user/applications")
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[actix_rt::test]
    async fn malformed_query_string_gets_the_standard_error_body() {
        let req = test::TestRequest::get()
            .uri("/api/v1.0/jobs?take=ten")
            .to_request();
        let resp = detached_app().await.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.name, "ParameterFormatError");
        assert_eq!(body.error_code, Some("PFE0001".to_owned()));
    }
}
