mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_router, send, StubProvider};
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::tempdir;

async fn register(app: &axum::Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": username, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(&tmp, StubProvider::default()).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/account", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = send(&app, Method::GET, "/api/v1/account", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_duplicate_username() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(&tmp, StubProvider::default()).await;

    register(&app, "Alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "another-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "ALICE", "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["tokenType"], "Bearer");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(&tmp, StubProvider::default()).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "bob", "password": "123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn buy_value_and_sell_through_the_api() {
    let tmp = tempdir().unwrap();
    let provider = StubProvider::default().with_price("AAPL", dec!(150.00));
    let app = build_test_router(&tmp, provider).await;
    let token = register(&app, "alice").await;

    let (status, account) = send(&app, Method::GET, "/api/v1/account", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["cash"].as_f64(), Some(100000.0));
    assert_eq!(account["valuationHistory"].as_array().unwrap().len(), 1);

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/v1/trades",
        Some(&token),
        Some(json!({ "ticker": "aapl", "amount": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["ticker"], "AAPL");
    assert_eq!(receipt["side"], "BUY");
    assert_eq!(receipt["cashAfter"].as_f64(), Some(98500.0));
    assert_eq!(receipt["sharesAfter"], 10);

    let (status, portfolio) =
        send(&app, Method::GET, "/api/v1/portfolio", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["totalValue"].as_f64(), Some(100000.0));
    assert_eq!(portfolio["holdings"].as_array().unwrap().len(), 1);

    // Selling more than held is a user error and changes nothing.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/trades",
        Some(&token),
        Some(json!({ "ticker": "AAPL", "amount": -11 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 422);

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/v1/trades",
        Some(&token),
        Some(json!({ "ticker": "AAPL", "amount": -10 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["sharesAfter"], 0);
    assert_eq!(receipt["cashAfter"].as_f64(), Some(100000.0));

    let (_, account) = send(&app, Method::GET, "/api/v1/account", Some(&token), None).await;
    assert!(account["holdings"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ticker_and_zero_amount() {
    let tmp = tempdir().unwrap();
    let app = build_test_router(&tmp, StubProvider::default()).await;
    let token = register(&app, "carol").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/trades",
        Some(&token),
        Some(json!({ "ticker": "NOPE", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/trades",
        Some(&token),
        Some(json!({ "ticker": "NOPE", "amount": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/api/v1/quotes/NOPE", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quotes_leaderboard_and_revaluation() {
    let tmp = tempdir().unwrap();
    let provider = StubProvider::default().with_price("MSFT", dec!(400.00));
    let app = build_test_router(&tmp, provider).await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (status, quote) = send(&app, Method::GET, "/api/v1/quotes/msft", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["symbol"], "MSFT");
    assert_eq!(quote["price"].as_f64(), Some(400.0));

    let (status, board) =
        send(&app, Method::GET, "/api/v1/leaderboard", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = board.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    // Equal values rank by name.
    assert_eq!(entries[0]["displayName"], "alice");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["displayName"], "bob");

    // Both accounts were valued at registration, so a sweep right now never
    // appends a second snapshot for today.
    let (status, report) = send(
        &app,
        Method::POST,
        "/api/v1/revaluations/run",
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["revalued"], 0);
    assert!(report["failed"].as_array().unwrap().is_empty());
}
