//! HTTP API tests driven through `tower::ServiceExt::oneshot`

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{date, CountingHolidays, ScriptedRequester};
use postcal::config::ServerConfig;
use postcal::engine::Engine;
use postcal::llm::{FailureKind, ModelRoster};
use postcal::models::Holiday;
use postcal::server::PostcalServer;

fn router(requester: Arc<ScriptedRequester>) -> Router {
    let holidays = CountingHolidays::new(vec![Holiday::new(date(2025, 12, 25), "Christmas Day")]);
    let engine = Engine::new(
        requester,
        Arc::new(holidays),
        ModelRoster::new(["A", "B"]).unwrap(),
    );

    PostcalServer::new(Arc::new(engine), ServerConfig::default())
        .unwrap()
        .build_router()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(router(Arc::new(ScriptedRequester::new())), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_api_index_lists_endpoints() {
    let (status, body) = send(router(Arc::new(ScriptedRequester::new())), get("/api")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/generate"));
}

#[tokio::test]
async fn test_generate_json() {
    let requester = Arc::new(ScriptedRequester::new());
    let (status, body) = send(
        router(requester.clone()),
        post_json(
            "/api/generate",
            json!({
                "startDate": "2025-12-24",
                "endDate": "2025-12-26",
                "companyName": "Acme",
                "services": "Consulting\n\nAudits\n",
                "hashtags": ["Acme"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["countryCode"], "US");
    assert_eq!(value["totalPosts"], 3);
    assert_eq!(value["dateRange"]["startDate"], "2025-12-24");
    assert_eq!(value["calendar"][1]["type"], "festival");
    assert_eq!(value["calendar"][1]["holiday"], "Christmas Day");
    assert_eq!(value["calendar"][0]["model"], "A");
    assert_eq!(value["summary"]["remotePosts"], 3);

    // Explicit hashtags: only the three post requests went out.
    assert_eq!(requester.calls().len(), 3);
    assert!(requester.prompts()[0].user.contains("Services: Consulting, Audits"));
}

#[tokio::test]
async fn test_generate_text() {
    let (status, body) = send(
        router(Arc::new(ScriptedRequester::failing())),
        post_json(
            "/api/generate",
            json!({
                "startDate": "2025-12-25",
                "endDate": "2025-12-25",
                "countryCode": "us",
                "format": "text",
                "hashtags": ["Acme"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("2025-12-25 (FESTIVAL)\n"));
    assert!(body.contains("🎄 Happy Christmas Day! 🎄"));
}

#[tokio::test]
async fn test_generate_requires_dates() {
    let (status, body) = send(
        router(Arc::new(ScriptedRequester::new())),
        post_json("/api/generate", json!({ "endDate": "2025-12-26" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("startDate and endDate are required"));
}

#[tokio::test]
async fn test_generate_rejects_bad_date() {
    let (status, _) = send(
        router(Arc::new(ScriptedRequester::new())),
        post_json(
            "/api/generate",
            json!({ "startDate": "12/24/2025", "endDate": "2025-12-26" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_rejects_oversized_range() {
    let requester = Arc::new(ScriptedRequester::new());
    let app = router(requester.clone());

    let (status, body) = send(
        app.clone(),
        post_json(
            "/api/generate",
            json!({ "startDate": "0001-01-01", "endDate": "9999-12-31" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("at most 366"));

    let (status, _) = send(
        app.clone(),
        post_json(
            "/api/generate",
            json!({ "startDate": "-200000-01-01", "endDate": "2025-01-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rejected before hashtags or posts are requested; the roster is untouched.
    assert!(requester.calls().is_empty());
    let (_, body) = send(app, get("/api/model-status")).await;
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["currentModel"], "A");
}

#[tokio::test]
async fn test_generate_ignores_unusable_services() {
    let requester = Arc::new(ScriptedRequester::new());
    let (status, body) = send(
        router(requester.clone()),
        post_json(
            "/api/generate",
            json!({
                "startDate": "2025-10-01",
                "endDate": "2025-10-01",
                "services": 42,
                "hashtags": ["Acme"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["totalPosts"], 1);
    assert!(requester.prompts()[0].user.contains("Services: \n"));
}

#[tokio::test]
async fn test_model_status_and_reset() {
    let requester = Arc::new(ScriptedRequester::new());
    requester.fail("A", FailureKind::RateLimit);
    let app = router(requester);

    let (_, _) = send(
        app.clone(),
        post_json(
            "/api/generate",
            json!({ "startDate": "2025-10-01", "endDate": "2025-10-01", "hashtags": ["X"] }),
        ),
    )
    .await;

    let (status, body) = send(app.clone(), get("/api/model-status")).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["currentModel"], "B");
    assert_eq!(value["currentIndex"], 1);
    assert_eq!(value["totalModels"], 2);
    assert_eq!(value["failures"]["A"], 1);

    let (status, body) = send(app.clone(), post_json("/api/reset-models", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["currentModel"], "A");

    let (_, body) = send(app, get("/api/model-status")).await;
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["failures"], json!({}));
}

#[tokio::test]
async fn test_improve_post() {
    let requester = Arc::new(ScriptedRequester::new());
    requester.reply("A", "EXPLANATION: Added a hook.\nIMPROVED_POST: New post");
    let app = router(requester);

    let (status, body) = send(
        app.clone(),
        post_json(
            "/api/improve-post",
            json!({ "currentPost": "Old post", "userRequest": "add a hook" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["explanation"], "Added a hook.");
    assert_eq!(value["improvedPost"], "New post");
    assert_eq!(value["originalPost"], "Old post");

    let (status, body) = send(app, post_json("/api/improve-post", json!({ "currentPost": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("currentPost and userRequest are required"));
}

#[tokio::test]
async fn test_improve_post_provider_failure() {
    let (status, body) = send(
        router(Arc::new(ScriptedRequester::failing())),
        post_json(
            "/api/improve-post",
            json!({ "currentPost": "Old post", "userRequest": "shorter" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Failed to improve post");
}

#[tokio::test]
async fn test_holidays_and_countries() {
    let app = router(Arc::new(ScriptedRequester::new()));

    let (status, body) = send(app.clone(), get("/api/holidays/2025/us")).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value[0]["name"], "Christmas Day");

    let (status, body) = send(app, get("/api/countries")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("United States"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let _ = postcal::metrics::init_metrics();
    let (status, _) = send(router(Arc::new(ScriptedRequester::new())), get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
}
