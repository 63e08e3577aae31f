//! Synchronous client for callers without an async runtime.
//!
//! Each call blocks the current thread until the full response has been
//! read or the call's timeout expires. Must not be used from inside a
//! tokio runtime.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::client::{finish_call, prepare_call};
use crate::config::BbbConfig;
use crate::error::Result;
use crate::request::{ApiCall, PreparedRequest};
use crate::response::ApiResponse;

/// Blocking counterpart of [`crate::Transport`]
#[cfg_attr(test, mockall::automock)]
pub trait BlockingTransport: Send + Sync {
    fn execute(&self, request: PreparedRequest) -> Result<Vec<u8>>;
}

/// `reqwest::blocking` backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl BlockingTransport for HttpTransport {
    fn execute(&self, request: PreparedRequest) -> Result<Vec<u8>> {
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
        let res = builder.send()?.error_for_status()?;
        info!("Response received with status: {}", res.status());

        Ok(res.bytes()?.to_vec())
    }
}

pub struct BigBlueButtonClient<T: BlockingTransport = HttpTransport> {
    config: BbbConfig,
    transport: T,
}

impl BigBlueButtonClient<HttpTransport> {
    pub fn new(config: BbbConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BbbConfig::from_env()?))
    }
}

impl<T: BlockingTransport> BigBlueButtonClient<T> {
    pub fn with_transport(config: BbbConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &BbbConfig {
        &self.config
    }

    /// Blocking counterpart of [`crate::BigBlueButtonClient::get_xml`]
    pub fn get_xml(&self, call: &ApiCall) -> Result<ApiResponse> {
        let request = prepare_call(call, &self.config);
        let body = self.transport.execute(request)?;
        Ok(finish_call(call, &body))
    }
}
