/// HTTP client tests against an in-process betting API
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use composer::{BetSubmission, PlayTypeCatalogEntry};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use terminal::config::ApiConfig;
use terminal::errors::ApiError;
use terminal::{BettingApi, HttpBettingApi};
use uuid::Uuid;

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct ServerState {
    bets: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn play_types(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "expired"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": "6a1f5a5e-0c1e-4a43-9a3f-6b1d2c3e4f01", "name": "Fijo", "code": "FIJO"},
            {"id": "6a1f5a5e-0c1e-4a43-9a3f-6b1d2c3e4f02", "name": "Corrido"}
        ])),
    )
}

async fn throws() -> Json<Value> {
    Json(json!([
        {"id": "t-1", "lotteryId": "florida", "name": "Florida noche", "closesAt": "2026-10-14T21:00:00Z"}
    ]))
}

async fn bets(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["throwId"] == "closed" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": "THROW_CLOSED", "message": "The throw is closed"})),
        );
    }
    if body["throwId"] == "limited" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "Limit exceeded for 25"})),
        );
    }
    state.bets.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({"ok": true})))
}

async fn start_server() -> (String, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/play-types", get(play_types))
        .route("/throws", get(throws))
        .route("/bets", post(bets))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/", addr), state)
}

fn client(base_url: &str, token: Option<&str>) -> HttpBettingApi {
    HttpBettingApi::new(&ApiConfig {
        base_url: base_url.to_string(),
        token: token.map(str::to_string),
        request_timeout_secs: 5,
    })
    .unwrap()
}

fn submission(throw_id: &str) -> BetSubmission {
    serde_json::from_value(json!({
        "throwId": throw_id,
        "date": Utc::now(),
        "betPlays": [{"moves": [{
            "playTypeId": Uuid::new_v4(),
            "moveDetails": [{"number": 25, "secondNumber": null, "amount": 1.5}]
        }]}]
    }))
    .unwrap()
}

#[tokio::test]
async fn test_catalogs_load() {
    let (url, _state) = start_server().await;
    let api = client(&url, Some(TOKEN));

    let types: Vec<PlayTypeCatalogEntry> = api.play_types().await.unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].code, "FIJO");
    assert_eq!(types[1].code, "");

    let throws = api.throws().await.unwrap();
    assert_eq!(throws[0].id, "t-1");
    assert_eq!(throws[0].lottery_id.as_deref(), Some("florida"));
}

#[tokio::test]
async fn test_missing_token_is_session_expired() {
    let (url, _state) = start_server().await;
    let api = client(&url, None);

    let err = api.play_types().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_submit_bet_posts_wire_format() {
    let (url, state) = start_server().await;
    let api = client(&url, Some(TOKEN));

    api.submit_bet(&submission("t-1")).await.unwrap();

    let bets = state.bets.lock().unwrap().clone();
    assert_eq!(bets.len(), 1);
    let detail = &bets[0]["betPlays"][0]["moves"][0]["moveDetails"][0];
    assert_eq!(detail["number"], 25);
    assert_eq!(detail["amount"], 1.5);
}

#[tokio::test]
async fn test_submit_bet_failures_are_classified() {
    let (url, state) = start_server().await;
    let api = client(&url, Some(TOKEN));

    let closed = api.submit_bet(&submission("closed")).await.unwrap_err();
    assert!(matches!(closed, ApiError::ThrowClosed(ref m) if m == "The throw is closed"));

    match api.submit_bet(&submission("limited")).await.unwrap_err() {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Limit exceeded for 25");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(state.bets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr), Some(TOKEN));
    let err = api.throws().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
