//! HTTP front of the relay service.

use std::io::Read;
use std::net::TcpListener;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Handle;

use termfolio_application::{build_relay_service, RelayRequest, RelayService};
use termfolio_core::relay::RelayResponse;
use termfolio_infrastructure::ConfigService;

/// Request bodies larger than this are rejected unread.
const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn run(bind: Option<String>) -> Result<()> {
    let config = ConfigService::new()
        .get_config()
        .context("Failed to load configuration")?;
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;
    let service = build_relay_service(&config);

    let listener =
        TcpListener::bind(&bind_addr).with_context(|| format!("Failed to bind {}", bind_addr))?;
    let server = Arc::new(
        tiny_http::Server::from_listener(listener, None)
            .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))?,
    );
    tracing::info!("[Server] Relay listening on http://{}", bind_addr);

    let stopper = server.clone();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("[Server] Shutting down");
            stopper.unblock();
        }
    });

    serve(&server, service, runtime.handle());
    Ok(())
}

/// Accepts requests until the server is unblocked.
pub fn serve(server: &tiny_http::Server, service: RelayService, runtime: &Handle) {
    let service = Arc::new(service);
    for mut request in server.incoming_requests() {
        let relay_request = match read_request(&mut request) {
            Ok(relay_request) => relay_request,
            Err(response) => {
                respond(request, response);
                continue;
            }
        };
        tracing::debug!(
            "[Server] {} {}",
            relay_request.method,
            relay_request.path
        );

        let service = service.clone();
        runtime.spawn(async move {
            let response = service.dispatch(relay_request).await;
            let _ = tokio::task::spawn_blocking(move || respond(request, response)).await;
        });
    }
}

fn header(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn read_request(request: &mut tiny_http::Request) -> Result<RelayRequest, RelayResponse> {
    if request.body_length().is_some_and(|len| len as u64 > MAX_BODY_BYTES) {
        return Err(RelayResponse::message(413, "Request too large"));
    }

    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| {
            tracing::warn!("[Server] Failed to read request body: {}", e);
            RelayResponse::message(400, "Invalid request")
        })?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(RelayResponse::message(413, "Request too large"));
    }

    Ok(RelayRequest {
        method: request.method().as_str().to_uppercase(),
        path: route_path(request.url()).to_string(),
        body,
        user_agent: header(request, "User-Agent"),
        forwarded_for: header(request, "X-Forwarded-For"),
        peer_addr: request.remote_addr().map(|addr| addr.ip().to_string()),
    })
}

/// The path without query string or trailing slash.
fn route_path(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn respond(request: tiny_http::Request, response: RelayResponse) {
    let body = response.body.to_string().into_bytes();
    let mut http = tiny_http::Response::from_data(body)
        .with_status_code(tiny_http::StatusCode(response.status));
    if let Ok(content_type) =
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
    {
        http = http.with_header(content_type);
    }
    if let Err(e) = request.respond(http) {
        tracing::warn!("[Server] Failed to write response: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpStream;

    #[test]
    fn test_route_path_strips_query_and_slash() {
        assert_eq!(route_path("/api/ip?format=json"), "/api/ip");
        assert_eq!(route_path("/api/chat/"), "/api/chat");
        assert_eq!(route_path("/"), "/");
    }

    /// Sends one raw HTTP request and returns the raw response.
    fn roundtrip(addr: std::net::SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    #[test]
    fn test_server_routes_through_relay_service() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = Arc::new(tiny_http::Server::from_listener(listener, None).unwrap());

        let handle = runtime.handle().clone();
        let serving = server.clone();
        let thread = std::thread::spawn(move || serve(&serving, RelayService::new(), &handle));

        let bad_json = roundtrip(
            addr,
            "POST /api/chat HTTP/1.1\r\nHost: localhost\r\nContent-Length: 9\r\nConnection: close\r\n\r\n{not json",
        );
        assert!(bad_json.starts_with("HTTP/1.1 400"));
        assert!(bad_json.contains("Invalid request"));

        let ip = roundtrip(
            addr,
            "GET /api/ip HTTP/1.1\r\nHost: localhost\r\nX-Forwarded-For: 203.0.113.9\r\nConnection: close\r\n\r\n",
        );
        assert!(ip.starts_with("HTTP/1.1 200"));
        assert!(ip.contains("203.0.113.9"));

        let missing = roundtrip(
            addr,
            "POST /api/webhook HTTP/1.1\r\nHost: localhost\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
        );
        assert!(missing.starts_with("HTTP/1.1 404"));

        server.unblock();
        thread.join().unwrap();
    }
}
