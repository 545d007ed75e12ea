// SPDX-License-Identifier: MPL-2.0
//! Loopback HTTP server for exercising the API client in tests.
//!
//! The server speaks just enough HTTP/1.1 for `reqwest`: it reads one
//! request per connection (fixed length or chunked body), records it, and
//! answers with the [`Reply`] chosen by the handler before closing the
//! connection.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// What the server answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Response {
        status: u16,
        content_type: &'static str,
        /// A single chunk is sent with `Content-Length`, several with
        /// chunked transfer encoding.
        chunks: Vec<Vec<u8>>,
        chunk_delay: Duration,
    },
    /// Close the connection without answering.
    Hangup,
}

impl Reply {
    pub fn text(status: u16, body: &str) -> Self {
        Reply::Response {
            status,
            content_type: "text/plain; charset=utf-8",
            chunks: vec![body.as_bytes().to_vec()],
            chunk_delay: Duration::ZERO,
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Reply::Response {
            status,
            content_type: "application/json",
            chunks: vec![body.to_string().into_bytes()],
            chunk_delay: Duration::ZERO,
        }
    }

    pub fn chunked(status: u16, chunks: Vec<Vec<u8>>) -> Self {
        Reply::Response {
            status,
            content_type: "text/plain; charset=utf-8",
            chunks,
            chunk_delay: Duration::from_millis(5),
        }
    }
}

type Handler = dyn Fn(&RecordedRequest) -> Reply + Send + Sync;

pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Starts a server answering every request through `handler`.
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve_connection(stream, handler, recorded).await;
                });
            }
        });

        Self { addr, requests }
    }

    /// Starts a server answering the n-th request with the n-th reply.
    /// The last reply is repeated once the list is exhausted.
    pub async fn sequence(replies: Vec<Reply>) -> Self {
        let next = AtomicUsize::new(0);
        Self::start(move |_| {
            let index = next.fetch_add(1, Ordering::SeqCst);
            replies
                .get(index)
                .or_else(|| replies.last())
                .cloned()
                .unwrap_or(Reply::Hangup)
        })
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

/// API client pointed at `server`, with the default retry count and a
/// short backoff.
pub fn test_client(server: &TestServer) -> crate::api::Client {
    crate::api::Client::with_policy(
        server.url(),
        crate::api::RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(5),
        },
    )
}

async fn serve_connection(
    stream: TcpStream,
    handler: Arc<Handler>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let header = |name: &str| {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    };

    let body = if header("transfer-encoding").is_some_and(|value| value.contains("chunked")) {
        read_chunked_body(&mut reader).await?
    } else {
        let length = header("content-length")
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(0);
        let mut body = vec![0; length];
        reader.read_exact(&mut body).await?;
        body
    };

    let request = RecordedRequest {
        method,
        target,
        headers,
        body,
    };
    let reply = handler(&request);
    recorded.lock().expect("requests lock").push(request);

    let mut stream = reader.into_inner();
    match reply {
        Reply::Hangup => {}
        Reply::Response {
            status,
            content_type,
            chunks,
            chunk_delay,
        } => {
            let mut head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nConnection: close\r\n",
                status,
                reason(status),
                content_type
            );
            if chunks.len() == 1 {
                head.push_str(&format!("Content-Length: {}\r\n\r\n", chunks[0].len()));
                stream.write_all(head.as_bytes()).await?;
                stream.write_all(&chunks[0]).await?;
            } else {
                head.push_str("Transfer-Encoding: chunked\r\n\r\n");
                stream.write_all(head.as_bytes()).await?;
                for chunk in chunks {
                    stream
                        .write_all(format!("{:x}\r\n", chunk.len()).as_bytes())
                        .await?;
                    stream.write_all(&chunk).await?;
                    stream.write_all(b"\r\n").await?;
                    stream.flush().await?;
                    tokio::time::sleep(chunk_delay).await;
                }
                stream.write_all(b"0\r\n\r\n").await?;
            }
            stream.flush().await?;
        }
    }
    stream.shutdown().await
}

async fn read_chunked_body(reader: &mut BufReader<TcpStream>) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).await?;
        let size_hex = size_line.trim().split(';').next().unwrap_or_default();
        let size = usize::from_str_radix(size_hex, 16).unwrap_or(0);
        let mut chunk = vec![0; size + 2];
        reader.read_exact(&mut chunk).await?;
        if size == 0 {
            return Ok(body);
        }
        body.extend_from_slice(&chunk[..size]);
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
