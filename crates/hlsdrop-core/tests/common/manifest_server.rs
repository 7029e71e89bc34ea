//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed path -> (status, body) map for GET and records the path
//! and headers of every request it receives.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Header names lowercased.
    pub headers: HashMap<String, String>,
}

pub struct ManifestServer {
    /// Base URL ending in `/`, e.g. "http://127.0.0.1:12345/".
    pub base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ManifestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Starts a server in a background thread. Each route maps a path with query
/// (e.g. "/master.m3u8" or "/seg0.ts?sig=1") to `(status, body)`; unknown
/// paths get 404. The server runs until the process exits.
pub fn start(routes: &[(&str, u16, &str)]) -> ManifestServer {
    start_bytes(
        routes
            .iter()
            .map(|(p, s, b)| (p.to_string(), *s, b.as_bytes().to_vec()))
            .collect(),
    )
}

/// Like `start` with binary bodies.
pub fn start_bytes(routes: Vec<(String, u16, Vec<u8>)>) -> ManifestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, (u16, Vec<u8>)>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, s, b)| (p, (s, b)))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &routes, &recorded));
        }
    });
    ManifestServer {
        base: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, (u16, Vec<u8>)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let request = match std::str::from_utf8(&raw) {
        Ok(s) => s,
        Err(_) => return,
    };
    let Some((method, path, headers)) = parse_request(request) else {
        return;
    };
    recorded.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        headers,
    });

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    let (status, body): (u16, &[u8]) = match routes.get(&path) {
        Some((status, body)) => (*status, body.as_slice()),
        None => (404, b"not found"),
    };
    let reason = match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Returns (method, path-with-query, lowercased headers).
fn parse_request(request: &str) -> Option<(String, String, HashMap<String, String>)> {
    let mut lines = request.split("\r\n");
    let mut first = lines.next()?.split_whitespace();
    let method = first.next()?.to_string();
    let path = first.next()?.to_string();
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }
    Some((method, path, headers))
}
