//! Blocking HTTP/1.1 request parsing and response writing.
//!
//! One request per connection. Chunked bodies are rejected, bodies need a
//! Content-Length, headers are capped at 32 KiB and bodies at 1 MiB.

use std::io::{self, Read, Write};

use serde::Serialize;

use crate::error::{DeployError, Result};

const MAX_HEADER_SIZE: usize = 32 * 1024;

const MAX_BODY_SIZE: usize = 1_048_576;

/// A parsed request.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    /// Path without the query string.
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response ready to be written.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// JSON response. Non-ASCII text is written as UTF-8, not escaped.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status,
            headers: vec![(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )],
            body,
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            headers: vec![
                (
                    "Content-Type".to_string(),
                    "text/html; charset=utf-8".to_string(),
                ),
                ("Cache-Control".to_string(), "no-store".to_string()),
            ],
            body: body.as_bytes().to_vec(),
        }
    }

    /// JSON error body `{"success": false, "error": ...}`.
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(
            status,
            &serde_json::json!({"success": false, "error": message}),
        )
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        403 => "Forbidden",
        405 => "Method Not Allowed",
        415 => "Unsupported Media Type",
        _ => "Unknown",
    }
}

fn bad_request(message: impl Into<String>) -> DeployError {
    DeployError::BadRequest {
        message: message.into(),
    }
}

/// Read the head byte by byte up to the blank line, so nothing of the
/// body is consumed early.
fn read_head(stream: &mut impl Read) -> Option<Result<Vec<u8>>> {
    let mut head = Vec::with_capacity(1024);
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) if head.is_empty() => return None,
            Ok(0) => return Some(Err(bad_request("client hung up before the end of the head"))),
            Ok(_) => head.push(byte[0]),
            Err(e) => return Some(Err(bad_request(format!("cannot read request: {e}")))),
        }
        if head.len() > MAX_HEADER_SIZE {
            return Some(Err(bad_request("request head too large")));
        }
    }
    Some(Ok(head))
}

/// Body of a POST, bounded by both Content-Length and [`MAX_BODY_SIZE`].
fn read_body(stream: &mut impl Read, declared: usize) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    stream
        .take(declared.min(MAX_BODY_SIZE + 1) as u64)
        .read_to_end(&mut body)
        .map_err(|e| bad_request(format!("cannot read body: {e}")))?;
    if body.len() > MAX_BODY_SIZE {
        return Err(bad_request("request body too large (limit 1 MiB)"));
    }
    Ok(body)
}

/// Read and parse one request.
///
/// `None` means the peer closed the connection before sending anything.
pub fn read_request(stream: &mut impl Read) -> Option<Result<HttpRequest>> {
    let head = match read_head(stream)? {
        Ok(head) => head,
        Err(e) => return Some(Err(e)),
    };
    Some(parse_head(&head).and_then(|(mut request, declared)| {
        if request.method == "POST" {
            let len = declared.ok_or_else(|| bad_request("POST needs a Content-Length header"))?;
            request.body = read_body(stream, len)?;
        }
        Ok(request)
    }))
}

/// Request line and headers; the body is filled in by the caller.
fn parse_head(head: &[u8]) -> Result<(HttpRequest, Option<usize>)> {
    let mut slots = [httparse::EMPTY_HEADER; 64];
    let mut parsed = httparse::Request::new(&mut slots);
    match parsed.parse(head) {
        Ok(httparse::Status::Complete(_)) => {}
        Ok(httparse::Status::Partial) => return Err(bad_request("truncated request head")),
        Err(e) => return Err(bad_request(format!("malformed request: {e}"))),
    }

    let target = parsed.path.unwrap_or("/");
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    };
    let headers: Vec<(String, String)> = parsed
        .headers
        .iter()
        .map(|h| (h.name.to_string(), String::from_utf8_lossy(h.value).into_owned()))
        .collect();

    let request = HttpRequest {
        method: parsed.method.unwrap_or_default().to_string(),
        path,
        query,
        headers,
        body: Vec::new(),
    };
    if request
        .header("Transfer-Encoding")
        .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"))
    {
        return Err(bad_request("chunked bodies are not supported"));
    }
    let declared = request
        .header("Content-Length")
        .and_then(|v| v.trim().parse().ok());
    Ok((request, declared))
}

/// Write a response and flush.
pub fn write_response(stream: &mut impl Write, response: &HttpResponse) -> io::Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    stream.write_all(head.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}
