//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use dashboard_gateway::config::GatewayConfig;
use dashboard_gateway::http::HttpServer;
use dashboard_gateway::lifecycle::Shutdown;
use futures_util::StreamExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::{client::IntoClientRequest, http::HeaderValue, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

pub type HostSocket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Start a gateway on an ephemeral port and return its address and shutdown handle.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, shutdown.clone());
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (addr, shutdown)
}

/// Open a host bridge presenting the given origin, consuming the fetch command.
pub async fn connect_host(addr: SocketAddr, origin: &str) -> (HostSocket, String) {
    let mut request = format!("ws://{}/host", addr).into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_str(origin).unwrap());

    let (mut socket, _) = tokio_tungstenite::connect_async(request).await.unwrap();
    let first = tokio::time::timeout(Duration::from_secs(2), socket.next())
        .await
        .expect("fetch command not received in time")
        .expect("bridge closed before fetch command")
        .unwrap();

    let command = match first {
        Message::Text(text) => text.as_str().to_string(),
        other => panic!("unexpected first frame: {:?}", other),
    };
    (socket, command)
}

/// Fetch `/context` as JSON.
pub async fn get_context(addr: SocketAddr) -> Value {
    reqwest::get(format!("http://{}/context", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// Poll `/context` until `predicate` holds or the deadline passes.
pub async fn wait_for_context<F>(addr: SocketAddr, predicate: F) -> Value
where
    F: Fn(&Value) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        let body = get_context(addr).await;
        if predicate(&body) || tokio::time::Instant::now() >= deadline {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
