//! Trading and discussion flows that don't need a market data provider:
//! funding, validation rejections, history, and the message board.

mod common;

use axum::http::{Method, StatusCode};
use common::build_test_app;

#[tokio::test]
async fn add_funds_updates_the_balance_sheet() {
    let app = build_test_app().await;
    let token = app.register_and_login("alice", "a-password").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/trading/add-funds",
            Some(&token),
            Some(serde_json::json!({ "amount": 500.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Funds added successfully");
    assert_eq!(body["new_balance"], 500.0);

    // With no positions the sheet is just cash
    let (status, body) = app
        .request(Method::GET, "/api/trading/balance", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cash_balance"], 500.0);
    assert_eq!(body["total_value"], 500.0);
    assert_eq!(body["portfolio"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn add_funds_rejects_bad_amounts() {
    let app = build_test_app().await;
    let token = app.register_and_login("alice", "a-password").await;

    for payload in [
        serde_json::json!({ "amount": 0.0 }),
        serde_json::json!({ "amount": -25.0 }),
        serde_json::json!({}),
    ] {
        let (status, body) = app
            .request(
                Method::POST,
                "/api/trading/add-funds",
                Some(&token),
                Some(payload),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid amount");
    }
}

#[tokio::test]
async fn orders_reject_invalid_parameters() {
    let app = build_test_app().await;
    let token = app.register_and_login("alice", "a-password").await;

    // Missing symbol and non-positive shares never reach the quote provider
    for payload in [
        serde_json::json!({ "shares": 5 }),
        serde_json::json!({ "symbol": "AAPL" }),
        serde_json::json!({ "symbol": "AAPL", "shares": 0 }),
        serde_json::json!({ "symbol": "", "shares": 3 }),
    ] {
        let (status, body) = app
            .request(
                Method::POST,
                "/api/trading/buy",
                Some(&token),
                Some(payload),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request parameters");
    }
}

#[tokio::test]
async fn selling_unowned_shares_is_rejected_before_quoting() {
    let app = build_test_app().await;
    let token = app.register_and_login("alice", "a-password").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/trading/sell",
            Some(&token),
            Some(serde_json::json!({ "symbol": "TSLA", "shares": 1 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient shares");
}

#[tokio::test]
async fn discussion_board_round_trip() {
    let app = build_test_app().await;
    let alice = app.register_and_login("alice", "a-password").await;
    let bob = app.register_and_login("bob", "b-password").await;

    // The feed is gated
    let (status, _) = app.request(Method::GET, "/api/discussions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/discussions",
            Some(&alice),
            Some(serde_json::json!({ "content": "first post" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "first post");
    assert_eq!(body["username"], "alice");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/discussions",
            Some(&bob),
            Some(serde_json::json!({ "content": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message content is required");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/discussions",
            Some(&bob),
            Some(serde_json::json!({ "content": "a reply" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(Method::GET, "/api/discussions", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let feed = body.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["content"], "a reply");
    assert_eq!(feed[0]["username"], "bob");
    assert_eq!(feed[1]["content"], "first post");
}
