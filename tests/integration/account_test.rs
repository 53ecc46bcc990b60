//! Integration tests for registration, login and account management.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "memory");
}

#[tokio::test]
async fn test_register_returns_account_and_token() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/accounts/register",
            Some(json!({ "handle": "alice", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["account"]["handle"], "alice");
    assert!(data["account"].get("password_hash").is_none());

    let id = data["account"]["id"].as_str().unwrap();
    let token = data["token"].as_str().unwrap();
    assert_eq!(app.tokens.validate(token).unwrap().to_string(), id);
}

#[tokio::test]
async fn test_register_weak_password_and_duplicate() {
    let app = TestApp::new();

    let weak = app
        .request(
            "POST",
            "/api/accounts/register",
            Some(json!({ "handle": "alice", "password": "password" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.body["error"], "WEAK_CREDENTIAL");

    app.register("alice").await;
    let duplicate = app
        .request(
            "POST",
            "/api/accounts/register",
            Some(json!({ "handle": "alice", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(app.accounts.len().await, 1);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/accounts/register",
            Some(json!({ "handle": "alice" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new();
    let (id, _) = app.register("alice").await;

    let ok = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(json!({ "handle": "alice", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["account"]["id"], id.as_str());

    let wrong = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(json!({ "handle": "alice", "password": "Wr0ng!pass" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(json!({ "handle": "nobody", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_account_requires_bearer() {
    let app = TestApp::new();
    let (id, token) = app.register("alice").await;
    let path = format!("/api/accounts/{id}");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let garbage = app.request("GET", &path, None, Some("not.a.token")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let ok = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["handle"], "alice");
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let app = TestApp::new();
    let (id, token) = app.register("alice").await;

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/accounts/{id}"))
        .header("Authorization", format!("Token {token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.send(req).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_account_id() {
    let app = TestApp::new();
    let (_, token) = app.register("alice").await;

    let response = app
        .request("GET", "/api/accounts/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_own_account() {
    let app = TestApp::new();
    let (id, token) = app.register("alice").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/accounts/{id}"),
            Some(json!({ "handle": "alice_2", "password": "N3w-pass!" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let login = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(json!({ "handle": "alice_2", "password": "N3w-pass!" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_gate_on_other_account() {
    let app = TestApp::new();
    let (alice, _) = app.register("alice").await;
    let (_, bob_token) = app.register("bobby").await;
    let path = format!("/api/accounts/{alice}");

    let update = app
        .request(
            "PUT",
            &path,
            Some(json!({ "handle": "pwned" })),
            Some(&bob_token),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = app.request("DELETE", &path, None, Some(&bob_token)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let anonymous = app.request("DELETE", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.accounts.len().await, 2);
}

#[tokio::test]
async fn test_owner_gate_malformed_id() {
    let app = TestApp::new();
    let (_, token) = app.register("alice").await;

    let response = app
        .request("DELETE", "/api/accounts/12345", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_account_then_token_finds_nothing() {
    let app = TestApp::new();
    let (id, token) = app.register("alice").await;
    let path = format!("/api/accounts/{id}");

    let delete = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let get = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let create = app
        .request(
            "POST",
            "/api/listings",
            Some(json!({
                "title": "Bike for sale",
                "body": "Barely used, great condition",
                "image_url": "http://x.test/a.jpg",
                "price": 150.0,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::NOT_FOUND);
}
