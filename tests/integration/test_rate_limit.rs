use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};

use crate::helpers::{expect_status, json_request, read_json, send, spawn_app_with, unique_suffix};

const WRITE_BUDGET: u32 = 2;

/// Fresh address per run so counters from earlier runs on the same day never collide.
fn fresh_peer() -> SocketAddr {
    let suffix = unique_suffix();
    let n = u32::from_str_radix(&suffix[suffix.len() - 6..], 16).unwrap_or(1);
    SocketAddr::from(([10, (n >> 16) as u8, (n >> 8) as u8, n as u8], 50_000))
}

fn unique_ip() -> String {
    fresh_peer().ip().to_string()
}

fn tag_write_from(peer: SocketAddr, forwarded_for: Option<&str>) -> Request<Body> {
    let mut req = json_request(
        "POST",
        "/api/v1/tags",
        None,
        json!({ "phrase": "Best", "keyword": "Coffee" }),
    );
    if let Some(value) = forwarded_for {
        req.headers_mut().insert("x-forwarded-for", value.parse().unwrap());
    }
    req.extensions_mut().insert(ConnectInfo(peer));
    req
}

#[tokio::test]
async fn direct_client_over_budget_is_rejected() {
    let app = spawn_app_with(|config| config.rate_limit_writes_per_ip = WRITE_BUDGET).await;
    let peer = fresh_peer();

    for _ in 0..WRITE_BUDGET {
        expect_status(
            send(&app.app, tag_write_from(peer, None)).await,
            StatusCode::UNAUTHORIZED,
        )
        .await;
    }

    let res = expect_status(
        send(&app.app, tag_write_from(peer, None)).await,
        StatusCode::TOO_MANY_REQUESTS,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn spoofed_forwarded_for_does_not_reset_the_budget() {
    let app = spawn_app_with(|config| config.rate_limit_writes_per_ip = WRITE_BUDGET).await;
    let peer = fresh_peer();

    for _ in 0..WRITE_BUDGET {
        let spoofed = unique_ip();
        expect_status(
            send(&app.app, tag_write_from(peer, Some(&spoofed))).await,
            StatusCode::UNAUTHORIZED,
        )
        .await;
    }

    let spoofed = unique_ip();
    expect_status(
        send(&app.app, tag_write_from(peer, Some(&spoofed))).await,
        StatusCode::TOO_MANY_REQUESTS,
    )
    .await;
}

#[tokio::test]
async fn trusted_proxy_charges_the_forwarded_client() {
    let app = spawn_app_with(|config| {
        config.rate_limit_writes_per_ip = WRITE_BUDGET;
        config.trust_proxy_headers = true;
    })
    .await;
    let proxy = fresh_peer();

    for _ in 0..WRITE_BUDGET + 2 {
        let client = unique_ip();
        expect_status(
            send(&app.app, tag_write_from(proxy, Some(&client))).await,
            StatusCode::UNAUTHORIZED,
        )
        .await;
    }

    let client = unique_ip();
    for _ in 0..WRITE_BUDGET {
        send(&app.app, tag_write_from(proxy, Some(&client))).await;
    }
    expect_status(
        send(&app.app, tag_write_from(proxy, Some(&client))).await,
        StatusCode::TOO_MANY_REQUESTS,
    )
    .await;
}
