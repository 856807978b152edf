//! Raw TCP server that cuts a successful response short.

#![allow(dead_code)]

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one connection: answers `200 OK` announcing `declared_len` body
/// bytes, writes only `body`, then closes the socket.
pub struct TruncatedBodyServer {
    addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TruncatedBodyServer {
    pub async fn start(declared_len: usize, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind TCP listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };

            // Read the request head before answering.
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => received.extend_from_slice(&buf[..n]),
                }
            }

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {declared_len}\r\n\r\n"
            );
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(body.as_bytes()).await;
            let _ = stream.flush().await;
            let _ = stream.shutdown().await;
        });

        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }
}
