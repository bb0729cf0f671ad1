//! Route-level tests for the authentication gate and request validation
//!
//! These exercise the paths that complete before any store access: the
//! liveness probe, 401 short-circuits on missing/malformed/invalid bearer
//! credentials, and 400s from body validation. The pool is created lazily
//! and never connects.

use actix_web::{http::StatusCode, test, web, App};
use discussion_service::handlers;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use token_auth::test_utils::{issue_token, issue_token_with_expiry, TEST_SECRET};
use token_auth::TokenVerifier;
use uuid::Uuid;

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/number_discussion_test")
        .expect("valid connection string")
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(
                    TokenVerifier::new(TEST_SECRET).expect("test secret accepted"),
                ))
                .configure(handlers::configure),
        )
        .await
    };
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn health_is_open_and_fixed() {
    let app = test_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[actix_web::test]
async fn create_post_without_token_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn malformed_authorization_scheme_is_unauthorized() {
    let app = test_app!();
    let token = issue_token(TEST_SECRET, Uuid::new_v4(), "alice");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Token {}", token)))
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer("not.a.token"))
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn expired_token_is_unauthorized() {
    let app = test_app!();
    let token = issue_token_with_expiry(TEST_SECRET, Uuid::new_v4(), "alice", -3600);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({ "text": "hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn comment_and_node_routes_are_gated() {
    let app = test_app!();
    let post_id = Uuid::new_v4();

    let comment = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post_id))
        .set_json(serde_json::json!({ "text": "hi" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, comment).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let node = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/nodes", post_id))
        .set_json(serde_json::json!({ "parentIndex": 0, "op": "add", "rightOperand": 1 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, node).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn create_post_body_must_carry_exactly_one_field() {
    let app = test_app!();
    let token = issue_token(TEST_SECRET, Uuid::new_v4(), "alice");

    // Neither text nor startNumber: validation fails before the store.
    let neither = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({}))
        .to_request();
    assert_eq!(
        test::call_service(&app, neither).await.status(),
        StatusCode::BAD_REQUEST
    );

    let both = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({ "text": "hello", "startNumber": 5 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, both).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn invalid_op_is_rejected_at_deserialization() {
    let app = test_app!();
    let token = issue_token(TEST_SECRET, Uuid::new_v4(), "alice");

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/nodes", Uuid::new_v4()))
        .insert_header(bearer(&token))
        .set_json(serde_json::json!({ "parentIndex": 0, "op": "pow", "rightOperand": 2 }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
