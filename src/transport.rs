use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::Result;
use crate::request::PreparedRequest;

/// Executes a prepared request and returns the raw response body
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<Bytes>;
}

/// `reqwest` backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<Bytes> {
        let method = request.method();
        let mut builder = self.client.request(method.into(), &request.url);
        if let Some(content_type) = request.content_type() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.into_body() {
            builder = builder.body(body);
        }

        debug!("Sending {:?} request to BigBlueButton", method);
        let res = builder.send().await?.error_for_status()?;
        info!("Response received with status: {}", res.status());

        Ok(res.bytes().await?)
    }
}
