use std::time::Duration;

use character_forge::*;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// Answers exactly one HTTP request with `status` and `body`, and hands back
// the raw request it received.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("http://{}/api/characters", listener.local_addr().expect("addr"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request
    });
    (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = socket.read(&mut chunk).await.expect("read");
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&raw);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let body_len = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= head_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8(raw).expect("utf8 request")
}

fn gateway(url: &str) -> HttpGateway {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client");
    HttpGateway::with_client(client, url)
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("body separator");
    serde_json::from_str(body).expect("json body")
}

#[tokio::test]
async fn test_fetch_returns_body_records() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"statusCode": 200, "body": [{"selectedClass": "Bard"}, null]}"#,
    )
    .await;

    let records = gateway(&url).fetch().await.expect("fetch");
    assert_eq!(records, vec![json!({"selectedClass": "Bard"}), Value::Null]);

    let request = server.await.expect("server");
    assert!(request.starts_with("GET /api/characters HTTP/1.1"));
}

#[tokio::test]
async fn test_fetch_reports_error_status() {
    let (url, _server) = serve_once("500 Internal Server Error", "{}").await;

    let result = gateway(&url).fetch().await;
    assert!(matches!(
        result,
        Err(GatewayError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    ));
}

#[tokio::test]
async fn test_fetch_rejects_unparsable_body() {
    let (url, _server) = serve_once("200 OK", "<html>maintenance</html>").await;

    let result = gateway(&url).fetch().await;
    assert!(matches!(result, Err(GatewayError::Request(_))));
}

#[tokio::test]
async fn test_fetch_rejects_non_array_body() {
    let (url, _server) = serve_once("200 OK", r#"{"body": "not an array"}"#).await;

    let result = gateway(&url).fetch().await;
    assert!(matches!(result, Err(GatewayError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_push_posts_json_array() {
    let (url, server) = serve_once("201 Created", "").await;
    let ruleset = Ruleset::default();
    let barbarian = Character::new(&ruleset).cycle_class(&ruleset, Delta::Increment);
    let roster = vec![Character::new(&ruleset), barbarian.clone()];

    gateway(&url).push(&roster).await.expect("push");

    let request = server.await.expect("server");
    assert!(request.starts_with("POST /api/characters HTTP/1.1"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/json")
    );
    let body = request_body(&request);
    let records = body.as_array().expect("array body");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["selectedClass"], json!("Barbarian"));
    assert_eq!(normalize(&records[1], &ruleset), barbarian);
}

#[tokio::test]
async fn test_push_reports_error_status() {
    let (url, _server) = serve_once("503 Service Unavailable", "").await;

    let result = gateway(&url).push(&[]).await;
    assert!(matches!(
        result,
        Err(GatewayError::Status(StatusCode::SERVICE_UNAVAILABLE))
    ));
}

#[tokio::test]
async fn test_store_load_over_http() {
    let fixture = include_str!("dummy_remote_roster.json");
    let (url, _server) = serve_once("200 OK", fixture).await;
    let mut store = Store::new(Ruleset::default());

    store.load(&gateway(&url)).await.expect("load");

    assert_eq!(store.len(), 4);
    assert_eq!(store.status(), &SyncStatus::Idle);
    let first = &store.get_at(0).expect("first").character;
    assert_eq!(first.selected_class.as_deref(), Some("Barbarian"));
}

#[tokio::test]
async fn test_store_load_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("http://{}/api/characters", listener.local_addr().expect("addr"));
    drop(listener);

    let mut store = Store::new(Ruleset::default());
    store.add();
    let result = store.load(&gateway(&url)).await;

    assert!(matches!(result, Err(GatewayError::Request(_))));
    assert!(store.is_empty());
    assert!(matches!(store.status(), SyncStatus::Error(_)));
}
