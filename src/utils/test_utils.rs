#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tokio::io::{AsyncReadExt, AsyncWriteExt};
#[cfg(test)]
use tokio::net::{TcpListener, TcpStream};
#[cfg(test)]
use tokio::sync::Mutex;

#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::config::Config;

/// A request as seen by [`HttpStub`].
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request line and headers, CRLF separated.
    pub head: String,
    pub body: String,
}

/// One-route HTTP/1.1 server answering every request with a canned response.
#[cfg(test)]
pub struct HttpStub {
    pub base_url: String,
    connections: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _task: tokio::task::JoinHandle<()>,
}

#[cfg(test)]
impl HttpStub {
    pub async fn spawn(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let task = {
            let connections = Arc::clone(&connections);
            let requests = Arc::clone(&requests);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    connections.fetch_add(1, Ordering::SeqCst);
                    let requests = Arc::clone(&requests);
                    let response = response.clone();
                    tokio::spawn(async move {
                        serve_one(stream, &response, &requests).await;
                    });
                }
            })
        };

        Self {
            base_url: format!("http://{addr}"),
            connections,
            requests,
            _task: task,
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

#[cfg(test)]
async fn serve_one(
    mut stream: TcpStream,
    response: &str,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> Option<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let (head_end, content_length) = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..pos]).to_string();
            break (pos + 4, content_length(&head));
        }
    };
    while buffer.len() < head_end + content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let head = String::from_utf8_lossy(&buffer[..head_end - 4]).to_string();
    let body = String::from_utf8_lossy(&buffer[head_end..]).to_string();
    // Record before answering so the client never observes a reply first.
    requests.lock().await.push(RecordedRequest { head, body });
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok()
}

#[cfg(test)]
fn content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Base URL of a local port nothing is listening on.
#[cfg(test)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new(&Config::default())
}

#[cfg(test)]
pub fn create_test_app_with_key(key: &str) -> App {
    let mut app = create_test_app();
    app.set_credential(key);
    app
}
