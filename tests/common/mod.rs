//! Common test utilities
//!
//! A minimal HTTP stub standing in for an ntfy server: it answers a fixed
//! sequence of status codes and records every JSON body it receives.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Stub ntfy relay bound to an ephemeral localhost port.
pub struct StubRelay {
    /// Base URL to hand to the client under test.
    pub url: String,
    /// JSON bodies of the requests received, in arrival order.
    pub requests: Receiver<serde_json::Value>,
}

impl StubRelay {
    /// Serve exactly `statuses.len()` requests, answering each with the
    /// paired status code.
    pub fn start(statuses: Vec<u16>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub relay");
        let addr = listener.local_addr().expect("stub relay address");
        let (body_sender, body_receiver) = channel();

        thread::spawn(move || {
            for status in statuses {
                match listener.accept() {
                    Ok((stream, _)) => {
                        if let Ok(body) = handle_request(stream, status) {
                            let _ = body_sender.send(body);
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        StubRelay {
            url: format!("http://{addr}"),
            requests: body_receiver,
        }
    }
}

fn handle_request(mut stream: TcpStream, status: u16) -> std::io::Result<serde_json::Value> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let reason = match status {
        200 => "OK",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response =
        format!("HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(response.as_bytes())?;
    stream.flush()?;

    Ok(serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
}
