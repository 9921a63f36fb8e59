#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::DateTime;
use serde_json::Value;
use tower::ServiceExt;

use ecompulse_core::{RandomSource, ScriptedRandom, StdRandom};
use ecompulse_server::{app_state::AppState, config::AppConfig, router};

fn state_with(random: Box<dyn RandomSource>) -> AppState {
    AppState::with_random(AppConfig::default(), random).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let ctype = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, ctype, String::from_utf8(body.to_vec()).unwrap())
}

/// Value of an unlabelled sample line such as `ecom_orders_total 175`.
fn sample(exposition: &str, name: &str) -> f64 {
    exposition
        .lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| {
            let (n, v) = l.split_once(' ')?;
            (n == name).then(|| v.trim().parse::<f64>().unwrap())
        })
        .unwrap_or_else(|| panic!("sample {name} missing"))
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = router::build_router(state_with(Box::new(ScriptedRandom::new())));
    let (status, _, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["message"], "EcomPulse Backend API");
    assert_eq!(v["endpoints"]["api"], "/api/metrics (JSON format)");
    assert_eq!(v["endpoints"]["health"], "/health");
}

#[tokio::test]
async fn health_reports_increasing_timestamps() {
    let app = router::build_router(state_with(Box::new(ScriptedRandom::new())));

    let (status, _, first) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, _, second) = get(app, "/health").await;

    let a: Value = serde_json::from_str(&first).unwrap();
    let b: Value = serde_json::from_str(&second).unwrap();
    assert_eq!(a["status"], "healthy");
    assert_eq!(b["status"], "healthy");

    let ta = DateTime::parse_from_rfc3339(a["timestamp"].as_str().unwrap()).unwrap();
    let tb = DateTime::parse_from_rfc3339(b["timestamp"].as_str().unwrap()).unwrap();
    assert!(tb > ta);
    assert!(a["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn api_metrics_after_first_tick() {
    let rng = ScriptedRandom::new()
        .with_ints([5_000, 100, 150, 300, 11, 22, 33, 640, 0, 250, 0])
        .with_reals([2.345_6, 12.344, 56.789, 99.994]);
    let state = state_with(Box::new(rng));
    state.store().tick();

    let (status, ctype, body) = get(router::build_router(state), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ctype.unwrap().starts_with("application/json"));

    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["revenue"], 5_000);
    assert_eq!(v["orders"], 100);
    assert_eq!(v["conversionRate"], 2.35);
    assert_eq!(v["activeUsers"], 150);
    assert_eq!(v["trafficSources"]["social"], 22);
    assert_eq!(v["cpu"], 12.34);
    assert_eq!(v["failedRequests"], 0);
    assert_eq!(v["downtime"], 0);
}

#[tokio::test]
async fn api_metrics_reports_failure_when_values_cannot_serialize() {
    let state = state_with(Box::new(ScriptedRandom::new().with_reals([f64::NAN])));
    state.store().tick();

    let (status, ctype, body) = get(router::build_router(state), "/api/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(ctype.unwrap().starts_with("application/json"));

    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v, serde_json::json!({ "error": "Failed to fetch metrics" }));
}

#[tokio::test]
async fn scripted_tick_moves_api_counters_by_exact_draw() {
    let rng = ScriptedRandom::new().with_ints([2_000, 50]);
    let state = state_with(Box::new(rng));
    state.store().tick();
    let app = router::build_router(state.clone());

    let (_, _, before) = get(app.clone(), "/api/metrics").await;
    let before: Value = serde_json::from_str(&before).unwrap();

    // exhausted queues now serve range minimums
    state.store().tick();
    let (_, _, after) = get(app, "/api/metrics").await;
    let after: Value = serde_json::from_str(&after).unwrap();

    assert_eq!(
        after["revenue"].as_u64().unwrap() - before["revenue"].as_u64().unwrap(),
        2_000
    );
    assert_eq!(
        after["orders"].as_u64().unwrap() - before["orders"].as_u64().unwrap(),
        50
    );
}

#[tokio::test]
async fn exposition_agrees_with_json() {
    let state = state_with(Box::new(StdRandom::seeded(77)));
    for _ in 0..5 {
        state.store().tick();
    }
    let app = router::build_router(state);

    let (status, ctype, text) = get(app.clone(), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ctype.unwrap().starts_with("text/plain; version=0.0.4"));

    let (_, _, json) = get(app, "/api/metrics").await;
    let v: Value = serde_json::from_str(&json).unwrap();

    let pairs = [
        ("ecom_revenue_total", &v["revenue"]),
        ("ecom_orders_total", &v["orders"]),
        ("ecom_conversion_rate", &v["conversionRate"]),
        ("ecom_active_users", &v["activeUsers"]),
        ("ecom_sessions", &v["sessions"]),
        ("ecom_traffic_direct", &v["trafficSources"]["direct"]),
        ("ecom_traffic_social", &v["trafficSources"]["social"]),
        ("ecom_traffic_referral", &v["trafficSources"]["referral"]),
        ("ecom_server_cpu_usage", &v["cpu"]),
        ("ecom_server_memory_usage", &v["memory"]),
        ("ecom_server_disk_usage", &v["disk"]),
        ("ecom_server_network_mbps", &v["network"]),
        ("ecom_failed_requests_total", &v["failedRequests"]),
        ("ecom_request_latency_ms", &v["latency"]),
        ("ecom_downtime_minutes", &v["downtime"]),
    ];
    for (name, json_value) in pairs {
        let exported = sample(&text, name);
        let reported = json_value.as_f64().unwrap();
        assert!(
            (exported - reported).abs() <= 0.005 + 1e-9,
            "{name}: exposition {exported} vs json {reported}"
        );
    }
}

#[tokio::test]
async fn cors_is_open() {
    let app = router::build_router(state_with(Box::new(ScriptedRandom::new())));
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn default_state_uses_configured_listen() {
    let state = state_with(Box::new(ScriptedRandom::new()));
    assert_eq!(state.cfg().server.listen_addr().unwrap().port(), 5000);
}
