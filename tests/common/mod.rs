//! Common test utilities for integration tests

use rami_cli::config::ResolvedConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Minimal canned-response HTTP server standing in for the upstream API.
///
/// Serves one scripted `(status, body)` response per connection, in order,
/// and records every raw request it received. Responses carry
/// `Connection: close` so each client call opens a fresh connection.
pub struct MockUpstream {
    pub base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl MockUpstream {
    /// Starts the server with a script of responses. The background task
    /// exits after serving exactly `responses.len()` connections.
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = tokio::spawn(async move {
            let mut captured = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.expect("accept connection");
                captured.push(read_request(&mut stream).await);

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    429 => "Too Many Requests",
                    500 => "Internal Server Error",
                    502 => "Bad Gateway",
                    503 => "Service Unavailable",
                    _ => "Response",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
                stream.shutdown().await.ok();
            }
            captured
        });

        Self { base_url, handle }
    }

    /// Waits for the script to finish and returns the raw requests seen.
    pub async fn finish(self) -> Vec<String> {
        self.handle.await.expect("mock upstream task")
    }
}

/// Reads one full HTTP request (headers plus Content-Length body).
async fn read_request(stream: &mut TcpStream) -> String {
    let mut data: Vec<u8> = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        if let Some(header_end) = find_subsequence(&data, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..header_end]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                return String::from_utf8_lossy(&data).to_string();
            }
        }

        let n = stream.read(&mut buf).await.expect("read request");
        if n == 0 {
            return String::from_utf8_lossy(&data).to_string();
        }
        data.extend_from_slice(&buf[..n]);
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Extracts the JSON body of a captured request.
#[allow(dead_code)]
pub fn request_body(raw: &str) -> serde_json::Value {
    let body = raw.split("\r\n\r\n").nth(1).expect("request has a body");
    serde_json::from_str(body).expect("request body is JSON")
}

/// Client configuration pointed at a mock upstream, with timings shrunk
/// so tests stay fast.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> ResolvedConfig {
    ResolvedConfig {
        base_url: base_url.to_string(),
        rate_limit_delay_ms: 0,
        request_timeout_secs: 5,
        max_retries: 3,
        retry_initial_delay_ms: 10,
        retry_max_delay_ms: 40,
        page_size: 100,
    }
}

/// A bare-array search response of `count` records with 1-based
/// sequential `MichrazID`s.
#[allow(dead_code)]
pub fn tender_records(count: usize) -> String {
    let records: Vec<serde_json::Value> = (1..=count as i64)
        .map(|id| serde_json::json!({"MichrazID": id, "MichrazName": format!("מכרז {id}")}))
        .collect();
    serde_json::to_string(&records).expect("serialize records")
}
