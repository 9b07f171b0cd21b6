//! End-to-end tests: a real server on a random port, driven over HTTP.

use std::time::Duration;

use rendezvous::prelude::*;
use reqwest::StatusCode;
use serde_json::{Value, json};

// =========================================================================
// Helpers
// =========================================================================

/// Cheap password hashing so the suite stays fast in debug builds.
fn fast_config() -> RegistryConfig {
    RegistryConfig {
        kdf: KdfParams {
            iterations: 1_000,
            output_len: 64,
        },
        ..RegistryConfig::default()
    }
}

/// Starts a server on a random port and returns its base URL.
async fn start_with(config: RegistryConfig) -> String {
    let server = RendezvousServer::builder()
        .bind("127.0.0.1:0")
        .registry_config(config)
        .build()
        .await
        .expect("server should build");

    let addr = server.local_addr().expect("should have local addr");

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    format!("http://{addr}")
}

async fn start() -> String {
    start_with(fast_config()).await
}

fn room_body(id: &str) -> Value {
    json!({
        "roomId": id,
        "roomName": "Friday night",
        "hostPlayer": "alice",
        "externalAddress": "203.0.113.5",
        "externalPort": 7777,
        "maxPlayers": 4
    })
}

async fn create(client: &reqwest::Client, base: &str, body: &Value) -> reqwest::Response {
    client
        .post(format!("{base}/rooms"))
        .json(body)
        .send()
        .await
        .expect("request should complete")
}

async fn list(client: &reqwest::Client, base: &str) -> Vec<Value> {
    let resp = client
        .get(format!("{base}/rooms"))
        .send()
        .await
        .expect("request should complete");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("list should be a JSON array")
}

async fn join(
    client: &reqwest::Client,
    base: &str,
    id: &str,
    password: Option<&str>,
) -> reqwest::Response {
    let req = client.post(format!("{base}/rooms/{id}/join"));
    let req = match password {
        Some(pw) => req.json(&json!({ "password": pw })),
        None => req,
    };
    req.send().await.expect("request should complete")
}

// =========================================================================
// Create + list
// =========================================================================

#[tokio::test]
async fn test_create_then_list() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, &room_body("r1")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let rooms = list(&client, &base).await;
    assert_eq!(rooms.len(), 1);
    let room = &rooms[0];
    assert_eq!(room["roomId"], "r1");
    assert_eq!(room["roomName"], "Friday night");
    assert_eq!(room["externalPort"], 7777);
    assert_eq!(room["currentPlayers"], 1);
    assert_eq!(room["upnpSucceeded"], false);
    assert_eq!(room["requiresPassword"], false);
}

#[tokio::test]
async fn test_create_without_room_id_is_400() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, &json!({})).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "roomId required" }));
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_create_with_empty_body_is_400() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = client.post(format!("{base}/rooms")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "roomId required");
}

#[tokio::test]
async fn test_create_with_malformed_json_is_400() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/rooms"))
        .header("content-type", "application/json")
        .body("{\"roomId\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_stores_metadata_exactly_as_sent() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = create(
        &client,
        &base,
        &json!({ "roomId": "a", "maxPlayers": -1, "externalPort": "7777" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    for body in [
        json!({ "roomId": "b", "externalPort": 70000 }),
        json!({ "roomId": "c", "currentPlayers": 2.5 }),
        json!({ "roomId": "d", "roomName": 42 }),
        json!({ "roomId": "e", "currentPlayers": null }),
    ] {
        let resp = create(&client, &base, &body).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT, "rejected {body}");
    }

    let rooms = list(&client, &base).await;
    assert_eq!(rooms.len(), 5);
    let by_id = |id: &str| {
        rooms
            .iter()
            .find(|r| r["roomId"] == id)
            .unwrap_or_else(|| panic!("room {id} missing"))
            .clone()
    };

    let a = by_id("a");
    assert_eq!(a["maxPlayers"], -1);
    assert_eq!(a["externalPort"], "7777");
    assert_eq!(a["currentPlayers"], 1);
    assert_eq!(by_id("b")["externalPort"], 70000);
    assert_eq!(by_id("c")["currentPlayers"], 2.5);
    assert_eq!(by_id("d")["roomName"], 42);

    let e = by_id("e");
    assert!(e.as_object().unwrap().contains_key("currentPlayers"));
    assert!(e["currentPlayers"].is_null());

    let info: Value = join(&client, &base, "a", None).await.json().await.unwrap();
    assert_eq!(info["externalPort"], "7777");
}

#[tokio::test]
async fn test_recreate_replaces_room() {
    let base = start().await;
    let client = reqwest::Client::new();

    create(&client, &base, &room_body("r1")).await;
    create(&client, &base, &json!({ "roomId": "r1", "maxPlayers": 12 })).await;

    let rooms = list(&client, &base).await;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["maxPlayers"], 12);
    assert!(rooms[0].get("roomName").is_none());
}

#[tokio::test]
async fn test_list_never_leaks_secrets() {
    let base = start().await;
    let client = reqwest::Client::new();

    let mut body = room_body("locked");
    body["password"] = json!("secret");
    create(&client, &base, &body).await;

    let rooms = list(&client, &base).await;
    let room = rooms[0].as_object().unwrap();
    assert_eq!(room["requiresPassword"], true);
    for key in ["lastSeen", "password", "passwordHash", "passwordSalt"] {
        assert!(!room.contains_key(key), "list leaked {key}");
    }
}

// =========================================================================
// Join
// =========================================================================

#[tokio::test]
async fn test_join_protected_room() {
    let base = start().await;
    let client = reqwest::Client::new();

    let mut body = room_body("locked");
    body["password"] = json!("secret");
    create(&client, &base, &body).await;

    let wrong = join(&client, &base, "locked", Some("wrong")).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let missing = join(&client, &base, "locked", None).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let ok = join(&client, &base, "locked", Some("secret")).await;
    assert_eq!(ok.status(), StatusCode::OK);
    let info: Value = ok.json().await.unwrap();
    assert_eq!(info["roomId"], "locked");
    assert_eq!(info["externalAddress"], "203.0.113.5");
    assert_eq!(info["externalPort"], 7777);
    assert_eq!(info["hostPlayer"], "alice");
    let obj = info.as_object().unwrap();
    assert!(obj.keys().all(|k| !k.to_lowercase().contains("password")));
}

#[tokio::test]
async fn test_join_open_room_with_or_without_password() {
    let base = start().await;
    let client = reqwest::Client::new();
    create(&client, &base, &room_body("open")).await;

    assert_eq!(join(&client, &base, "open", None).await.status(), StatusCode::OK);
    assert_eq!(join(&client, &base, "open", Some("")).await.status(), StatusCode::OK);
    assert_eq!(
        join(&client, &base, "open", Some("anything")).await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_join_unknown_room_is_404() {
    let base = start().await;
    let client = reqwest::Client::new();

    let resp = join(&client, &base, "ghost", None).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

// =========================================================================
// Heartbeat + delete
// =========================================================================

#[tokio::test]
async fn test_heartbeat_known_and_unknown() {
    let base = start().await;
    let client = reqwest::Client::new();
    create(&client, &base, &room_body("r1")).await;

    let ok = client.put(format!("{base}/rooms/r1/heartbeat")).send().await.unwrap();
    assert_eq!(ok.status(), StatusCode::NO_CONTENT);

    let missing = client.put(format!("{base}/rooms/ghost/heartbeat")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let base = start().await;
    let client = reqwest::Client::new();
    create(&client, &base, &room_body("r1")).await;

    let first = client.delete(format!("{base}/rooms/r1")).send().await.unwrap();
    let second = client.delete(format!("{base}/rooms/r1")).send().await.unwrap();

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NO_CONTENT);
    assert!(list(&client, &base).await.is_empty());
}

// =========================================================================
// Liveness
// =========================================================================

#[tokio::test]
async fn test_stale_room_disappears_from_list() {
    let base = start_with(RegistryConfig {
        heartbeat_timeout: Duration::from_millis(200),
        ..fast_config()
    })
    .await;
    let client = reqwest::Client::new();

    create(&client, &base, &room_body("quiet")).await;
    create(&client, &base, &room_body("chatty")).await;

    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let resp = client.put(format!("{base}/rooms/chatty/heartbeat")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let rooms = list(&client, &base).await;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["roomId"], "chatty");
}

// =========================================================================
// Health + shutdown
// =========================================================================

#[tokio::test]
async fn test_health_reports_room_count() {
    let base = start().await;
    let client = reqwest::Client::new();
    create(&client, &base, &room_body("a")).await;
    create(&client, &base, &room_body("b")).await;

    let resp = client.get(format!("{base}/health")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok", "rooms": 2 }));
}

#[tokio::test]
async fn test_run_until_stops_on_signal() {
    let server = RendezvousServer::builder()
        .bind("127.0.0.1:0")
        .registry_config(fast_config())
        .sweep_interval(None)
        .build()
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let task = tokio::spawn(server.run_until(async {
        let _ = rx.await;
    }));

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server should stop promptly")
        .expect("server task should not panic");
    assert!(result.is_ok());
}
