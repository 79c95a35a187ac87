mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn admin_stats_requires_admin() -> Result<()> {
    let server = common::spawn_league().await?;
    let client = reqwest::Client::new();

    let anonymous = client.get(server.url("/api/admin/stats")).send().await?;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let member = common::login(&server, "member", common::MEMBER_PASSWORD).await?;
    let res = client.get(server.url("/api/admin/stats")).bearer_auth(member).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"success": false, "error": "Admin privileges required"}));

    let admin = common::login(&server, "commish", common::ADMIN_PASSWORD).await?;
    let res = client.get(server.url("/api/admin/stats")).bearer_auth(admin).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["totalUsers"], 2);
    assert_eq!(body["data"]["adminUsers"], 1);
    assert_eq!(body["data"]["pendingTrades"], 1);
    assert_eq!(body["data"]["totalWeeks"], 0);
    Ok(())
}

#[tokio::test]
async fn admin_can_promote_a_member() -> Result<()> {
    let server = common::spawn_league().await?;
    let client = reqwest::Client::new();
    let admin = common::login(&server, "commish", common::ADMIN_PASSWORD).await?;

    let users = client
        .get(server.url("/api/admin/users"))
        .bearer_auth(&admin)
        .send()
        .await?
        .json::<Value>()
        .await?;
    let member_id = users["data"]
        .as_array()
        .expect("users array")
        .iter()
        .find(|u| u["username"] == "member")
        .and_then(|u| u["id"].as_i64())
        .expect("member id");

    let res = client
        .put(server.url("/api/admin/users"))
        .bearer_auth(&admin)
        .json(&json!({"userId": member_id, "isAdmin": true}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Admin status is read from the token, so a fresh login picks it up
    let member = common::login(&server, "member", common::MEMBER_PASSWORD).await?;
    let res = client.get(server.url("/api/admin/stats")).bearer_auth(member).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
