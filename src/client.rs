use tracing::{info, warn};

use crate::config::BbbConfig;
use crate::error::Result;
use crate::request::{ApiCall, PreparedRequest};
use crate::response::{parse_response, ApiResponse};
use crate::transport::{HttpTransport, Transport};

/// Client for the BigBlueButton API
pub struct BigBlueButtonClient<T: Transport = HttpTransport> {
    config: BbbConfig,
    transport: T,
}

impl BigBlueButtonClient<HttpTransport> {
    pub fn new(config: BbbConfig) -> Self {
        Self::with_transport(config, HttpTransport::default())
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BbbConfig::from_env()?))
    }
}

impl<T: Transport> BigBlueButtonClient<T> {
    pub fn with_transport(config: BbbConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &BbbConfig {
        &self.config
    }

    /// Issue a call and parse the XML it returns.
    ///
    /// Transport failures are returned as errors. Anything wrong with the
    /// response itself comes back as [`ApiResponse::Absent`].
    pub async fn get_xml(&self, call: &ApiCall) -> Result<ApiResponse> {
        let request = prepare_call(call, &self.config);
        let body = self.transport.execute(request).await?;
        Ok(finish_call(call, &body))
    }
}

/// Sign a call for sending; shared with the blocking client
pub(crate) fn prepare_call(call: &ApiCall, config: &BbbConfig) -> PreparedRequest {
    let request = call.prepare(config);
    info!(
        "Calling BigBlueButton resource {} ({:?})",
        call.call,
        request.method()
    );
    request
}

/// Parse the body of a completed call
pub(crate) fn finish_call(call: &ApiCall, body: &[u8]) -> ApiResponse {
    let response = parse_response(body);
    if !response.is_success() {
        warn!("BigBlueButton call {} returned no result", call.call);
    }
    response
}
