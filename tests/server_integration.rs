//! End-to-end tests over a real socket
//!
//! Runs the serving loop on an ephemeral port and talks to it with reqwest.

use profile_api::{config::Settings, server};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

struct RunningServer {
    base_url: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    async fn start(settings: Settings) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = server::create_app(&settings);
        let (shutdown, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(server::serve(
            listener,
            app,
            settings.server.idle_timeout,
            async move {
                let _ = rx.await;
            },
        ));

        Self {
            base_url: format!("http://{addr}/api"),
            shutdown,
            handle,
        }
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_crud_round_over_http() {
    let server = RunningServer::start(Settings::default()).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({"first_name": "Ada", "last_name": "Lovelace", "biography": "mathematician"}))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = client
        .put(format!("{}/users/{id}", server.base_url))
        .json(&json!({"first_name": "Ada", "last_name": "King", "biography": "countess"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched: Value = client
        .get(format!("{}/users/{id}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["data"]["last_name"], "King");

    let response = client
        .delete(format!("{}/users/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed: Value = client
        .get(format!("{}/users", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({"data": []}));

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_creates_over_http() {
    let server = RunningServer::start(Settings::default()).await;
    let client = reqwest::Client::new();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = format!("{}/users", server.base_url);
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({"first_name": format!("user{i}")}))
                .send()
                .await
                .unwrap()
                .status()
        })
    });
    for request in requests.collect::<Vec<_>>() {
        assert_eq!(request.await.unwrap(), StatusCode::CREATED);
    }

    let listed: Value = client
        .get(format!("{}/users", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["data"].as_array().unwrap().len(), 16);

    server.stop().await;
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = RunningServer::start(Settings::default()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/users", server.base_url))
        .header("x-request-id", "abc-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "abc-123");

    server.stop().await;
}

#[tokio::test]
async fn test_keep_alive_connection_reused_within_idle_timeout() {
    let mut settings = Settings::default();
    settings.server.idle_timeout = Duration::from_secs(5);
    let server = RunningServer::start(settings).await;
    let client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(30))
        .build()
        .unwrap();

    for _ in 0..3 {
        let response = client
            .get(format!("{}/users", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    server.stop().await;
}
