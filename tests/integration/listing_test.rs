//! Integration tests for listing endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

fn bike() -> Value {
    json!({
        "title": "Bike for sale",
        "body": "Barely used, great condition",
        "image_url": "http://x.test/a.jpg",
        "price": 150.0,
    })
}

#[tokio::test]
async fn test_create_then_duplicate_conflicts() {
    let app = TestApp::new();
    let (owner, token) = app.register("alice").await;

    let created = app
        .request("POST", "/api/listings", Some(bike()), Some(&token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let data = &created.body["data"];
    assert_eq!(data["owner_id"], owner.as_str());
    assert_eq!(data["owner_handle"], "alice");
    assert_eq!(data["is_owner"], true);

    let duplicate = app
        .request("POST", "/api/listings", Some(bike()), Some(&token))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(app.listings.len().await, 1);
}

#[tokio::test]
async fn test_create_requires_auth_and_valid_fields() {
    let app = TestApp::new();
    let anonymous = app.request("POST", "/api/listings", Some(bike()), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let (_, token) = app.register("alice").await;
    let mut bad_image = bike();
    bad_image["image_url"] = json!("http://x.test/a.gif");
    let response = app
        .request("POST", "/api/listings", Some(bad_image), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");

    let mut free = bike();
    free["price"] = json!(0);
    let response = app
        .request("POST", "/api/listings", Some(free), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.listings.len().await, 0);
}

#[tokio::test]
async fn test_get_listing_with_optional_auth() {
    let app = TestApp::new();
    let (_, alice) = app.register("alice").await;
    let (_, bob) = app.register("bobby").await;
    let id = app.create_listing(&alice, "Vintage lamp", 40.0).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/listings/{id}");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["data"]["is_owner"], false);
    assert_eq!(anonymous.body["data"]["owner_handle"], "alice");

    let owner = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(owner.body["data"]["is_owner"], true);

    let other = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(other.body["data"]["is_owner"], false);

    let bad_token = app.request("GET", &path, None, Some("garbage")).await;
    assert_eq!(bad_token.status, StatusCode::UNAUTHORIZED);

    let malformed = app.request("GET", "/api/listings/xyz", None, None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_by_owner_and_non_owner() {
    let app = TestApp::new();
    let (_, alice) = app.register("alice").await;
    let (_, bob) = app.register("bobby").await;
    let id = app.create_listing(&alice, "Vintage lamp", 40.0).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/listings/{id}");

    let forbidden = app
        .request("PUT", &path, Some(json!({ "price": 1.0 })), Some(&bob))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let unchanged = app.request("GET", &path, None, None).await;
    assert_eq!(unchanged.body["data"]["price"], 40.0);

    let edited = app
        .request("PUT", &path, Some(json!({ "price": 35.5 })), Some(&alice))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["data"]["price"], 35.5);
    assert_eq!(edited.body["data"]["title"], "Vintage lamp");

    let zero = app
        .request("PUT", &path, Some(json!({ "price": 0 })), Some(&alice))
        .await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let empty = app.request("PUT", &path, Some(json!({})), Some(&alice)).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_edit_into_duplicate_conflicts() {
    let app = TestApp::new();
    let (_, alice) = app.register("alice").await;
    app.create_listing(&alice, "Vintage lamp", 40.0).await;
    let id = app.create_listing(&alice, "Oak table", 90.0).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/listings/{id}"),
            Some(json!({
                "title": "Vintage lamp",
                "body": "Vintage lamp in good condition",
            })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_listing() {
    let app = TestApp::new();
    let (_, alice) = app.register("alice").await;
    let (_, bob) = app.register("bobby").await;
    let id = app.create_listing(&alice, "Vintage lamp", 40.0).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/listings/{id}");

    let forbidden = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(app.listings.len().await, 0);
}

#[tokio::test]
async fn test_list_filters_sorts_and_pages() {
    let app = TestApp::new();
    let (_, alice) = app.register("alice").await;
    for (n, price) in [5.0, 10.0, 50.0, 100.0, 150.0].into_iter().enumerate() {
        app.create_listing(&alice, &format!("Item number {n}"), price)
            .await;
    }

    let response = app
        .request(
            "GET",
            "/api/listings?page=1&page_size=2&sort=price%20ASC&min_price=10&max_price=100",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);
    assert_eq!(data["has_previous"], false);
    let prices: Vec<f64> = data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![10.0, 50.0]);
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let app = TestApp::new();
    for query in [
        "sort=color%20asc",
        "page=0",
        "page_size=0",
        "page_size=500",
        "page=9223372036854775807&page_size=100",
        "min_price=cheap",
    ] {
        let response = app
            .request("GET", &format!("/api/listings?{query}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
    }
}

#[tokio::test]
async fn test_list_by_owner() {
    let app = TestApp::new();
    let (alice_id, alice) = app.register("alice").await;
    let (_, bob) = app.register("bobby").await;
    app.create_listing(&alice, "Vintage lamp", 40.0).await;
    app.create_listing(&alice, "Oak table", 90.0).await;
    app.create_listing(&bob, "Road bike", 300.0).await;

    let response = app
        .request(
            "GET",
            &format!("/api/accounts/{alice_id}/listings"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["total_items"], 2);
    assert!(
        data["items"]
            .as_array()
            .unwrap()
            .iter()
            .all(|item| item["owner_handle"] == "alice" && item["is_owner"] == false)
    );

    let missing = app
        .request(
            "GET",
            "/api/accounts/00000000-0000-4000-8000-000000000000/listings",
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
