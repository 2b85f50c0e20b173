use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::api::{ChatBackend, ChatError, ChatReply, ChatRequest, HttpBackend};

/// One request as seen by [`MockServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

/// Minimal HTTP/1.1 server answering one canned response per connection.
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<Result<Vec<CapturedRequest>, String>>,
}

impl MockServer {
    pub async fn start(responses: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");

        let handle = tokio::spawn(async move {
            let mut captured = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
                captured.push(read_http_request(&mut stream).await?);
                stream
                    .write_all(response.as_bytes())
                    .await
                    .map_err(|err| err.to_string())?;
                stream.shutdown().await.map_err(|err| err.to_string())?;
            }
            Ok(captured)
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Wait for every canned response to be served and return what was asked.
    pub async fn finish(self) -> Vec<CapturedRequest> {
        self.handle
            .await
            .expect("server task should not panic")
            .expect("server should serve every response")
    }
}

pub fn http_response(status: u16, headers: &[(&str, &str)], body: &str) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    let mut response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let mut header_end = None;
    while header_end.is_none() {
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        header_end = buffer
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .map(|index| index + 4);
    }

    let header_end = header_end.expect("header end should exist");
    let header_text =
        std::str::from_utf8(&buffer[..header_end]).map_err(|err| err.to_string())?;
    let mut lines = header_text.split("\r\n").filter(|line| !line.is_empty());
    let request_line = lines
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?
        .to_string();

    let mut headers = Vec::new();
    let mut content_length = 0_usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse::<usize>().map_err(|err| err.to_string())?;
        }
        headers.push((name.to_string(), value));
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest {
        request_line,
        headers,
        body,
    })
}

/// HTTP backend for tests: cookie store on, proxies ignored.
pub fn test_backend(base_url: &str) -> HttpBackend {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .no_proxy()
        .build()
        .expect("client should build");
    HttpBackend::with_client(client, base_url)
}

pub fn server_error() -> ChatError {
    ChatError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        summary: Some("boom".to_string()),
    }
}

/// Scripted in-process backend that records every request.
#[derive(Default)]
pub struct FakeBackend {
    history: Mutex<VecDeque<Result<String, ChatError>>>,
    replies: Mutex<VecDeque<Result<ChatReply, ChatError>>>,
    pub history_calls: Mutex<usize>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, result: Result<&str, ChatError>) -> Self {
        self.history
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
        self
    }

    pub fn with_reply(self, reply: &str, new_history: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ChatReply {
            reply: reply.to_string(),
            new_history: new_history.to_string(),
        }));
        self
    }

    pub fn with_chat_error(self, err: ChatError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> usize {
        *self.history_calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn fetch_history(&self) -> Result<String, ChatError> {
        *self.history_calls.lock().unwrap() += 1;
        self.history
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }
}
