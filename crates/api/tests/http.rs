//! Black-box HTTP tests driven through the router with `tower::oneshot`.
//!
//! These use a lazy connection pool, so only paths that reject before
//! touching the database are exercised here. Database-backed paths are
//! covered by the repository layer against a real instance.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use portfolio_api::app;
use portfolio_api::config::{ApiConfig, MailConfig};
use portfolio_api::state::AppState;

fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("postgres://localhost/portfolio_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_allowed_origins: vec![],
        recaptcha_secret: None,
        admin_token: None,
        mail: MailConfig {
            host: "localhost".to_string(),
            port: 587,
            use_tls: true,
            username: None,
            password: None,
            from_address: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Router over a pool that never connects; handlers under test must reject
/// before reaching the database.
fn test_app(config: ApiConfig) -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/portfolio_test")
        .unwrap();
    app(AppState::new(config, pool))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn contact_request(payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_is_ok() {
    let response = test_app(test_config())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app(test_config())
        .oneshot(
            Request::builder()
                .uri("/api/nonsense")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_honeypot_is_rejected() {
    let response = test_app(test_config())
        .oneshot(contact_request(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hi",
            "message": "Hello",
            "honeypot": "gotcha"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["honeypot"], "Spam detected");
}

#[tokio::test]
async fn test_contact_missing_fields_report_each_error() {
    let response = test_app(test_config())
        .oneshot(contact_request(serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    for field in ["name", "email", "subject", "message"] {
        assert!(
            body["errors"][field].is_string(),
            "missing error for {field}: {body}"
        );
    }
}

#[tokio::test]
async fn test_contact_malformed_email_is_rejected() {
    let response = test_app(test_config())
        .oneshot(contact_request(serde_json::json!({
            "name": "Ada",
            "email": "not-an-email",
            "subject": "Hi",
            "message": "Hello"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["errors"]["email"].is_string());
}

#[tokio::test]
async fn test_message_admin_fails_closed_without_token_configured() {
    let response = test_app(test_config())
        .oneshot(
            Request::builder()
                .uri("/api/contact")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_message_admin_rejects_wrong_token() {
    let mut config = test_config();
    config.admin_token = Some(SecretString::from("sesame-open"));

    let response = test_app(config)
        .oneshot(
            Request::builder()
                .uri("/api/contact/1")
                .header(header::AUTHORIZATION, "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
