//! One-shot local HTTP server for exercising outbound calls in tests

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// What the server received
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    /// e.g. `POST /v2/version HTTP/1.1`
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accepts a single connection and answers it with a canned response
pub(crate) struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<CapturedRequest>,
}

impl StubServer {
    pub fn respond(status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end_matches(['\r', '\n']);
                if line.is_empty() {
                    break;
                }
                let (name, value) = line.split_once(':').unwrap();
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }

            let captured = CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: Vec::new(),
            };
            let length = captured
                .header("content-length")
                .map(|v| v.parse::<usize>().unwrap())
                .unwrap_or(0);
            let mut body = vec![0; length];
            reader.read_exact(&mut body).unwrap();

            reader.get_mut().write_all(response.as_bytes()).unwrap();
            reader.get_mut().flush().unwrap();
            CapturedRequest { body, ..captured }
        });

        Self { addr, handle }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::respond(status, "application/json", body)
    }

    /// Full URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for the exchange to finish and return the captured request
    pub fn finish(self) -> CapturedRequest {
        self.handle.join().unwrap()
    }
}
