use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ChatError, ChatReply, ChatRequest, HistoryResponse, CHAT_ENDPOINT, HISTORY_ENDPOINT};
use crate::utils::url::endpoint_url;

/// The remote side of a conversation.
///
/// Session identity is ambient: implementations carry whatever credential
/// the backend issued (for HTTP, a cookie) without the caller passing it.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetch the stored transcript for the current session.
    async fn fetch_history(&self) -> Result<String, ChatError>;

    /// Send one message along with the full transcript and get the reply
    /// plus the server's updated transcript.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

/// [`ChatBackend`] over HTTP with a per-process cookie jar.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("chatbox/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Use a preconfigured client. It should have a cookie store enabled or
    /// the backend will see every request as a new session.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T>(response: reqwest::Response) -> Result<T, ChatError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ChatError::from_status(status, &body));
        }
        response.json::<T>().await.map_err(ChatError::Decode)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn fetch_history(&self) -> Result<String, ChatError> {
        let url = endpoint_url(&self.base_url, HISTORY_ENDPOINT);
        debug!(%url, "fetching history");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ChatError::Network)?;
        let body: HistoryResponse = Self::read_json(response).await?;
        let history = body.history.unwrap_or_default();

        debug!(bytes = history.len(), "history received");
        Ok(history)
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = endpoint_url(&self.base_url, CHAT_ENDPOINT);
        debug!(
            %url,
            message_len = request.message.len(),
            history_len = request.history.len(),
            "sending chat message"
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(ChatError::Network)?;
        let reply: ChatReply = Self::read_json(response).await?;

        debug!(reply_len = reply.reply.len(), "chat reply received");
        Ok(reply)
    }
}
