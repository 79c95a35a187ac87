mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_league().await?;
    let res = reqwest::get(server.url("/health")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_without_password_hash() -> Result<()> {
    let server = common::spawn_league().await?;
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({"username": "member", "password": common::MEMBER_PASSWORD}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert!(body["data"]["token"].is_string());
    assert_eq!(body["data"]["user"]["username"], "member");
    assert!(body["data"]["user"].get("password").is_none(), "hash leaked: {}", body);
    assert!(body.get("error").is_none());
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> Result<()> {
    let server = common::spawn_league().await?;
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({"username": "member", "password": "guess-again"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn token_works_as_header_and_cookie() -> Result<()> {
    let server = common::spawn_league().await?;
    let token = common::login(&server, "member", common::MEMBER_PASSWORD).await?;
    let client = reqwest::Client::new();

    let by_header = client.get(server.url("/api/auth/me")).bearer_auth(&token).send().await?;
    assert_eq!(by_header.status(), StatusCode::OK);

    let by_cookie = client
        .get(server.url("/api/auth/me"))
        .header(reqwest::header::COOKIE, format!("auth_token={}", token))
        .send()
        .await?;
    assert_eq!(by_cookie.status(), StatusCode::OK);
    assert_eq!(by_cookie.json::<Value>().await?["data"]["username"], "member");
    Ok(())
}

#[tokio::test]
async fn register_then_change_password() -> Result<()> {
    let server = common::spawn_league().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/auth/register"))
        .json(&json!({"username": "rookie", "password": "rookie-pass", "teamId": "4"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let token = res.json::<Value>().await?["data"]["token"]
        .as_str()
        .map(str::to_string)
        .expect("token");

    let res = client
        .put(server.url("/api/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({"currentPassword": "rookie-pass", "newPassword": "veteran-pass"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    common::login(&server, "rookie", "veteran-pass").await?;
    Ok(())
}
