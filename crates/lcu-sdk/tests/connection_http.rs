use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use lcu_sdk::{Credentials, LcuConnection, LcuError};

#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Vec<String>>>,
    names: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn summoners(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        seen.auth.lock().unwrap().push(auth.to_string());
    }
    let name = query.get("name").cloned().unwrap_or_default();
    seen.names.lock().unwrap().push(name.clone());
    if name == "Faker#KR1" {
        (StatusCode::OK, Json(serde_json::json!({ "puuid": "abc" })))
    } else {
        (StatusCode::NOT_FOUND, Json(serde_json::json!({ "message": "nope" })))
    }
}

async fn launch(State(seen): State<Seen>, Json(body): Json<serde_json::Value>) -> StatusCode {
    seen.bodies.lock().unwrap().push(body);
    StatusCode::OK
}

async fn serve(seen: Seen) -> (LcuConnection, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/lol-summoner/v1/summoners", get(summoners))
        .route("/lol-spectator/v1/spectate/launch", post(launch))
        .with_state(seen);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let credentials = Credentials {
        process: "LeagueClient".into(),
        pid: 1,
        port,
        password: "pw".into(),
        protocol: "http".into(),
    };
    (LcuConnection::new(&credentials).unwrap(), server)
}

#[tokio::test]
async fn get_sends_basic_auth_and_keeps_encoded_query() {
    let seen = Seen::default();
    let (conn, server) = serve(seen.clone()).await;

    let res = conn
        .get("/lol-summoner/v1/summoners?name=Faker%23KR1")
        .await
        .unwrap();
    assert_eq!(res.status.as_u16(), 200);
    let body: serde_json::Value = res.json().unwrap();
    assert_eq!(body["puuid"], "abc");

    // riot:pw
    assert_eq!(seen.auth.lock().unwrap().as_slice(), ["Basic cmlvdDpwdw=="]);
    assert_eq!(seen.names.lock().unwrap().as_slice(), ["Faker#KR1"]);
    server.abort();
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() {
    let seen = Seen::default();
    let (conn, server) = serve(seen).await;

    let res = conn
        .get("/lol-summoner/v1/summoners?name=Nobody%23EUW")
        .await
        .unwrap();
    assert_eq!(res.status.as_u16(), 404);
    server.abort();
}

#[tokio::test]
async fn post_serializes_json_body() {
    let seen = Seen::default();
    let (conn, server) = serve(seen.clone()).await;

    let res = conn
        .post(
            "/lol-spectator/v1/spectate/launch",
            &serde_json::json!({ "puuid": "abc", "allowObserveMode": "ALL" }),
        )
        .await
        .unwrap();
    assert_eq!(res.status.as_u16(), 200);
    let bodies = seen.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["puuid"], "abc");
    server.abort();
}

#[tokio::test]
async fn unreachable_client_is_an_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let credentials = Credentials {
        process: "LeagueClient".into(),
        pid: 1,
        port,
        password: "pw".into(),
        protocol: "http".into(),
    };
    let conn = LcuConnection::new(&credentials).unwrap();
    let err = conn.get("/lol-summoner/v1/summoners?name=x").await.unwrap_err();
    assert!(matches!(err, LcuError::Http(_)));
}
