use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use nova_transport::wire::ChatRequest;
use nova_transport::{
    ChatTransport, HttpChatTransport, SERVER_FALLBACK_MESSAGE, TransportError,
    UNEXPECTED_ERROR_MESSAGE,
};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

type Seen = Arc<Mutex<Vec<ChatRequest>>>;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat/")
}

fn recording_router(seen: Seen, status: StatusCode, body: Value) -> Router {
    Router::new()
        .route(
            "/chat/",
            post(
                move |State(seen): State<Seen>, Json(request): Json<ChatRequest>| {
                    let body = body.clone();
                    async move {
                        seen.lock().unwrap().push(request);
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(seen)
}

#[tokio::test]
async fn success_returns_response_field() {
    let seen = Seen::default();
    let endpoint = spawn_server(recording_router(
        seen.clone(),
        StatusCode::OK,
        json!({ "response": "hi there", "conversation_id": "ignored" }),
    ))
    .await;

    let transport = HttpChatTransport::new(&endpoint).unwrap();
    let reply = transport.send("hello", "session-1").await.unwrap();

    assert_eq!(reply, "hi there");
    let requests = seen.lock().unwrap().clone();
    assert_eq!(requests, vec![ChatRequest::user("hello", "session-1")]);
    assert_eq!(requests[0].role, "user");
}

#[tokio::test]
async fn server_error_detail_is_surfaced() {
    let endpoint = spawn_server(recording_router(
        Seen::default(),
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "detail": "rate limited" }),
    ))
    .await;

    let transport = HttpChatTransport::new(&endpoint).unwrap();
    let error = transport.send("x", "session-1").await.unwrap_err();

    assert!(matches!(
        error,
        TransportError::ServerStatus { status: 500, .. }
    ));
    assert_eq!(error.user_message(), "rate limited");
}

#[tokio::test]
async fn server_error_without_detail_falls_back() {
    let router = Router::new().route(
        "/chat/",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let endpoint = spawn_server(router).await;

    let transport = HttpChatTransport::new(&endpoint).unwrap();
    let error = transport.send("x", "session-1").await.unwrap_err();

    assert!(matches!(
        error,
        TransportError::ServerStatus {
            status: 502,
            detail: None,
            ..
        }
    ));
    assert_eq!(error.user_message(), SERVER_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn success_without_response_field_is_malformed() {
    let endpoint = spawn_server(recording_router(
        Seen::default(),
        StatusCode::OK,
        json!({ "answer": "wrong field" }),
    ))
    .await;

    let transport = HttpChatTransport::new(&endpoint).unwrap();
    let error = transport.send("x", "session-1").await.unwrap_err();

    assert!(matches!(error, TransportError::MalformedResponse { .. }));
    assert_eq!(error.user_message(), UNEXPECTED_ERROR_MESSAGE);
}

#[tokio::test]
async fn connection_refused_is_a_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpChatTransport::new(&format!("http://{addr}/chat/")).unwrap();
    let error = transport.send("y", "session-1").await.unwrap_err();

    assert!(matches!(error, TransportError::Network { .. }));
    assert_eq!(error.user_message(), UNEXPECTED_ERROR_MESSAGE);
}

/// Answers one request with `head` and an error body cut short of its
/// declared length, then closes the connection.
async fn spawn_truncating_server(head: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Drain the whole request so closing early does not reset the socket.
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.ends_with(b"}") {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(b"{\"detail\":").await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/chat/")
}

#[tokio::test]
async fn unreadable_error_body_falls_back_to_server_message() {
    let endpoint = spawn_truncating_server(
        "HTTP/1.1 500 Internal Server Error\r\n\
         content-type: application/json\r\n\
         content-length: 64\r\n\
         connection: close\r\n\r\n",
    )
    .await;

    let transport = HttpChatTransport::new(&endpoint).unwrap();
    let error = transport.send("x", "session-1").await.unwrap_err();

    assert!(matches!(
        error,
        TransportError::ServerStatus {
            status: 500,
            detail: None,
            ..
        }
    ));
    assert_eq!(error.user_message(), SERVER_FALLBACK_MESSAGE);
}
