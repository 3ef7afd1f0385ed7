use std::{any::Any, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{error::UNEXPECTED_ERROR, handlers::dispatch, state::AppState};

/// Create the application router with all routes and middleware.
///
/// There are no per-path routes: the fallback dispatcher normalizes the path and
/// picks the flow step itself.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "Handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, HeaderMap, Request},
    };
    use fakesso_core::{
        identity::{Identity, Provisioned},
        settings::{SettingKey, Settings},
        storage::{IdentityRepository, RepositoryError},
        token::BearerToken,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::storage::InMemoryRepository;

    struct TestApp {
        app: Router,
        state: AppState,
        repo: InMemoryRepository,
    }

    fn test_app() -> TestApp {
        let repo = InMemoryRepository::new();
        let state = AppState::new(Settings::default(), Arc::new(repo.clone()));
        TestApp {
            app: create_app(state.clone()),
            state,
            repo,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_me(token: &str) -> Request<Body> {
        Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn issue_token(app: &Router, code: &str) -> String {
        let (status, _, body) = send(app, post_form("/token", &format!("code={code}"))).await;
        assert_eq!(status, StatusCode::OK, "token request failed: {body}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        json["access_token"].as_str().unwrap().to_string()
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let test = test_app();

        for uri in ["/unknown/path", "/this/is/invalid", "/token/extra"] {
            let (status, _, _) = send(&test.app, get(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_routes_ignore_case_and_trailing_slash() {
        let test = test_app();

        let (status, _, body) = send(&test.app, post_form("/TOKEN/", "code=abc123")).await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let (status, _, _) = send(&test.app, get("/Authorize/?redirect_uri=/cb")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_method_is_not_part_of_routing() {
        let test = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/authorize?redirect_uri=/cb")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&test.app, request).await;

        assert_eq!(status, StatusCode::OK);
    }

    // ------------------------------------------------------------------------
    // Index
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_uses_host_header() {
        let test = test_app();
        let request = Request::builder()
            .uri("/")
            .header(header::HOST, "localhost:8080")
            .body(Body::empty())
            .unwrap();

        let (status, headers, html) = send(&test.app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(html.contains("http://localhost:8080/authorize"));
        assert!(html.contains("http://localhost:8080/token"));
        assert!(html.contains("http://localhost:8080/me"));
    }

    #[tokio::test]
    async fn test_index_honors_forwarded_proto() {
        let test = test_app();
        let request = Request::builder()
            .uri("/")
            .header(header::HOST, "sso.test")
            .header("X-Forwarded-Proto", "https")
            .body(Body::empty())
            .unwrap();

        let (_, _, html) = send(&test.app, request).await;

        assert!(html.contains("https://sso.test/authorize"));
    }

    #[tokio::test]
    async fn test_index_absolute_https_target() {
        let test = test_app();

        let (status, _, html) = send(&test.app, get("https://sso.test/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("https://sso.test/token"));
    }

    #[tokio::test]
    async fn test_index_without_host_uses_docker_host() {
        let test = test_app();

        let (status, _, html) = send(&test.app, get("/?from=test")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("http://host.docker.internal/me"));
    }

    // ------------------------------------------------------------------------
    // Authorize
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_authorize_requires_redirect_uri() {
        let test = test_app();

        for uri in [
            "/authorize",
            "/authorize?state=xyz",
            "/authorize?redirect_uri=",
        ] {
            let (status, _, _) = send(&test.app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_authorize_renders_form() {
        let test = test_app();

        let (status, _, html) = send(
            &test.app,
            get("/authorize?redirect_uri=http%3A%2F%2Fapp.test%2Fcallback&state=xyz"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"action="http://app.test/callback""#));
        assert!(html.contains(r#"name="state" value="xyz""#));
        assert!(html.contains(r#"name="code""#));
    }

    #[tokio::test]
    async fn test_authorize_state_defaults_to_empty() {
        let test = test_app();

        let (_, _, html) = send(&test.app, get("/authorize?redirect_uri=/cb")).await;

        assert!(html.contains(r#"name="state" value="""#));
    }

    #[tokio::test]
    async fn test_authorize_lists_known_ids() {
        let test = test_app();
        test.repo.get_or_create("abc123").await.unwrap();
        test.repo.get_or_create("dev@example.com").await.unwrap();

        let (_, _, html) = send(&test.app, get("/authorize?redirect_uri=/cb")).await;

        assert!(html.contains("<option>abc123</option>"));
        assert!(html.contains("<option>dev@example.com</option>"));
    }

    #[tokio::test]
    async fn test_authorize_hides_known_ids_when_disabled() {
        let test = test_app();
        test.repo.get_or_create("abc123").await.unwrap();
        test.state
            .override_setting(SettingKey::ShowKnownUsers, false);

        let (status, _, html) = send(&test.app, get("/authorize?redirect_uri=/cb")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("<option>"));
    }

    // ------------------------------------------------------------------------
    // Token
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_token_issues_bearer_for_code() {
        let test = test_app();

        let (status, headers, body) = send(&test.app, post_form("/token", "code=abc123")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);

        let token = BearerToken::decode(json["access_token"].as_str().unwrap()).unwrap();
        assert_eq!(token.identity_id(), "abc123");
        assert_eq!(token.nonce().len(), 20);
        assert!(test.repo.exists("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_token_trims_code() {
        let test = test_app();

        let token = issue_token(&test.app, "%20abc123%20").await;

        assert_eq!(fakesso_core::token::resolve(&token).unwrap(), "abc123");
        assert_eq!(test.repo.list_ids().await.unwrap(), ["abc123"]);
    }

    #[tokio::test]
    async fn test_token_requires_code() {
        let test = test_app();

        for body in ["", "code=", "code=%20%20", "state=xyz"] {
            let (status, _, _) = send(&test.app, post_form("/token", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
        }
        assert!(test.repo.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_non_form_body_counts_as_empty() {
        let test = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"code":"abc123"}"#))
            .unwrap();

        let (status, _, _) = send(&test.app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_secret_checked_before_code() {
        let test = test_app();
        test.state
            .override_setting(SettingKey::ClientSecret, "s3cr3t");

        for body in [
            "code=abc123",
            "code=abc123&client_secret=wrong",
            "",
            "client_secret=",
        ] {
            let (status, _, _) = send(&test.app, post_form("/token", body)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{body:?}");
        }
        assert!(test.repo.list_ids().await.unwrap().is_empty());

        let (status, _, _) = send(&test.app, post_form("/token", "client_secret=s3cr3t")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &test.app,
            post_form("/token", "code=abc123&client_secret=s3cr3t"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_ignores_query_parameters() {
        let test = test_app();

        let (status, _, _) = send(&test.app, get("/token?code=abc123")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/token?code=abc123")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&test.app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        test.state
            .override_setting(SettingKey::ClientSecret, "s3cr3t");
        let uri = "/token?code=abc123&client_secret=s3cr3t";
        let (status, _, _) = send(&test.app, get(uri)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert!(test.repo.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_keeps_identity_stable() {
        let test = test_app();

        issue_token(&test.app, "abc123").await;
        let first = test.repo.get_identity("abc123").await.unwrap();
        issue_token(&test.app, "abc123").await;
        let second = test.repo.get_identity("abc123").await.unwrap();

        assert_eq!(first, second);
    }

    // ------------------------------------------------------------------------
    // UserInfo
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_me_requires_authorization() {
        let test = test_app();

        let (status, _, _) = send(&test.app, get("/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, "Basic YWJjOjEyMw==")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&test.app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_accepts_token_without_scheme() {
        let test = test_app();
        let token = issue_token(&test.app, "abc123").await;

        let request = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, token)
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&test.app, request).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sub"], "abc123");
    }

    #[tokio::test]
    async fn test_me_rejects_malformed_token() {
        let test = test_app();

        for token in ["$invalid_token", "aW52YWxpZA=="] {
            let (status, _, _) = send(&test.app, get_me(token)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{token}");
        }
    }

    #[tokio::test]
    async fn test_me_rejects_unknown_identity() {
        let test = test_app();
        let token = BearerToken::issue("ghost").unwrap().encode();

        let (status, _, _) = send(&test.app, get_me(&token)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!test.repo.exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_full_flow_returns_profile() {
        let test = test_app();

        let token = issue_token(&test.app, "abc123").await;
        let (status, headers, body) = send(&test.app, get_me(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");

        let stored = test.repo.get_identity("abc123").await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sub": "abc123",
                "name": stored.name,
                "email": stored.email,
                "id": "abc123",
            })
        );
    }

    #[tokio::test]
    async fn test_me_without_additional_fields() {
        let test = test_app();
        test.state
            .override_setting(SettingKey::AdditionalFields, false);

        let token = issue_token(&test.app, "abc123").await;
        let (status, _, body) = send(&test.app, get_me(&token)).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sub"], "abc123");
        assert!(json.get("id").is_none());
    }

    #[tokio::test]
    async fn test_email_code_is_profile_email() {
        let test = test_app();

        let token = issue_token(&test.app, "dev%40example.com").await;
        let (_, _, body) = send(&test.app, get_me(&token)).await;

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sub"], "dev@example.com");
        assert_eq!(json["email"], "dev@example.com");
    }

    // ------------------------------------------------------------------------
    // Failures
    // ------------------------------------------------------------------------

    struct BrokenRepository;

    #[async_trait]
    impl IdentityRepository for BrokenRepository {
        async fn exists(&self, _id: &str) -> fakesso_core::storage::Result<bool> {
            Err(RepositoryError::QueryFailed("disk I/O error".to_string()))
        }

        async fn get_or_create(&self, _id: &str) -> fakesso_core::storage::Result<Provisioned> {
            Err(RepositoryError::QueryFailed("disk I/O error".to_string()))
        }

        async fn get_identity(&self, _id: &str) -> fakesso_core::storage::Result<Identity> {
            Err(RepositoryError::QueryFailed("disk I/O error".to_string()))
        }

        async fn list_ids(&self) -> fakesso_core::storage::Result<Vec<String>> {
            Err(RepositoryError::QueryFailed("disk I/O error".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failures_hide_details() {
        let app = create_app(AppState::new(
            Settings::default(),
            Arc::new(BrokenRepository),
        ));

        let (status, _, body) = send(&app, post_form("/token", "code=abc123")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, UNEXPECTED_ERROR);

        let token = BearerToken::issue("abc123").unwrap().encode();
        let (status, _, body) = send(&app, get_me(&token)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("disk"));

        let (status, _, _) = send(&app, get("/authorize?redirect_uri=/cb")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_panic_is_answered_generically() {
        let response = handle_panic(Box::new("boom"));
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(&body[..], UNEXPECTED_ERROR.as_bytes());
    }
}
