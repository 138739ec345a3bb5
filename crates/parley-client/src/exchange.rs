//! One request/reply round trip with the chat endpoint

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    types::{ChatRequest, Reply},
};

/// A single exchange with the backend, without any retry
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Send `request` to `endpoint` and decode the reply
    async fn exchange(&self, endpoint: &str, request: &ChatRequest) -> Result<Reply>;
}

/// JSON-over-HTTP exchange
pub struct HttpExchange {
    client: reqwest::Client,
}

impl HttpExchange {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Exchange for HttpExchange {
    async fn exchange(&self, endpoint: &str, request: &ChatRequest) -> Result<Reply> {
        let response = self.client.post(endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status.as_u16(), body));
        }

        let body = response.text().await?;
        Reply::from_body(&body)
    }
}
