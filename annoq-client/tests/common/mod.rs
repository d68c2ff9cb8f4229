//! One-shot HTTP server backing the client tests: binds an ephemeral local
//! port, serves a single canned response, and hands back what the client
//! sent.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Serve one request with the given status line (e.g. `"200 OK"`) and body.
/// Returns the base URL to point a client at, plus a channel carrying the
/// raw request once it arrives.
pub fn serve_once(status: &str, content_type: &str, body: &str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("listener addr"));
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let request = read_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
            let _ = sender.send(request);
        }
    });
    (base_url, receiver)
}

/// [`serve_once`] with a JSON content type.
pub fn serve_json(status: &str, body: &str) -> (String, Receiver<String>) {
    serve_once(status, "application/json", body)
}

/// Base URL nothing listens on. Operations that must fail before dispatch
/// are pointed here: reaching the socket at all turns the expected error
/// into a transport error, which the assertions would catch.
pub fn dead_endpoint() -> String {
    "http://127.0.0.1:9".to_string()
}

/// Drain the whole request, headers plus any `Content-Length` body, so the
/// client is never cut off mid-write.
fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) => return String::from_utf8_lossy(&data).into_owned(),
            Ok(n) => {
                data.extend_from_slice(&buf[..n]);
                if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
            }
            Err(_) => return String::from_utf8_lossy(&data).into_owned(),
        }
    };
    let head = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
    let content_length: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0);
    let mut missing = content_length.saturating_sub(data.len() - header_end - 4);
    while missing > 0 {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                data.extend_from_slice(&buf[..n]);
                missing = missing.saturating_sub(n);
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}
