//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use spa_router::dispatch::MiddlewareError;
use spa_router::RouteMatch;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock template server on an ephemeral port.
///
/// `pages` maps a request path to `(status, body)`; unknown paths get 404.
#[allow(dead_code)]
pub async fn start_template_server(pages: Vec<(&'static str, u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let pages: Arc<HashMap<&'static str, (u16, &'static str)>> =
        Arc::new(pages.into_iter().map(|(path, status, body)| (path, (status, body))).collect());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let pages = pages.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let request = String::from_utf8_lossy(&buf);
                        let path = request.split_whitespace().nth(1).unwrap_or("/");
                        let (status, body) = pages.get(path).copied().unwrap_or((404, "Not Found"));
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\n\
                             Content-Type: text/html\r\n\
                             Content-Length: {}\r\n\
                             Connection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Ordered record of which middlewares and handlers ran.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl CallLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Middleware that logs `name` and fails if `fail` is set.
    pub fn middleware(
        &self,
        name: &'static str,
        fail: bool,
    ) -> impl Fn(&RouteMatch) -> Result<(), MiddlewareError> + Send + Sync + 'static {
        let log = self.0.clone();
        move |_: &RouteMatch| {
            log.lock().unwrap().push(name.to_string());
            if fail {
                Err(MiddlewareError::failed(format!("{name} failed")))
            } else {
                Ok(())
            }
        }
    }

    /// Handler that logs `name` along with the matched URL.
    pub fn handler(&self, name: &'static str) -> impl Fn(&RouteMatch) + Send + Sync + 'static {
        let log = self.0.clone();
        move |m: &RouteMatch| {
            log.lock().unwrap().push(format!("{name}:{}", m.url()));
        }
    }
}
