//! Request building for BigBlueButton API calls.
//!
//! A call is turned into a [`PreparedRequest`] without touching the
//! network: the signed URL, the HTTP method and the optional XML body are
//! all decided here. Transports only execute what they are handed.

use std::time::Duration;

use ::xml::escape::escape_str_attribute;

use crate::auth::BbbAuth;
use crate::config::BbbConfig;

/// The only call that accepts a request body
pub const CREATE_CALL: &str = "create";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// A single API call: the resource name, its encoded query string and the
/// per-call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub call: String,
    /// Already URL-encoded `key=value` pairs joined by `&`
    pub query: String,
    /// Presentation to preload; only honoured by `create`
    pub pre_upload_slide: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    None,
    /// Preloaded presentation modules, sent as `application/xml`
    PreUpload(String),
}

/// A fully signed request, ready to be executed exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl ApiCall {
    pub fn new(call: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            call: call.into(),
            query: query.into(),
            pre_upload_slide: None,
            timeout: None,
        }
    }

    pub fn with_pre_upload_slide(mut self, url: impl Into<String>) -> Self {
        self.pre_upload_slide = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sign the call and decide how it goes over the wire
    pub fn prepare(&self, config: &BbbConfig) -> PreparedRequest {
        let signed_query = BbbAuth::sign_query(&self.call, &self.query, &config.secret);
        let url = format!("{}{}?{}", config.api_url, self.call, signed_query);

        let body = match (self.call.as_str(), &self.pre_upload_slide) {
            (CREATE_CALL, Some(slide)) => RequestBody::PreUpload(pre_upload_body(slide)),
            _ => RequestBody::None,
        };

        PreparedRequest {
            url,
            body,
            timeout: self.timeout.or(config.default_timeout),
        }
    }
}

impl PreparedRequest {
    pub fn method(&self) -> HttpMethod {
        match self.body {
            RequestBody::None => HttpMethod::Get,
            RequestBody::PreUpload(_) => HttpMethod::Post,
        }
    }

    /// `Content-Type` header to send, if the request has a body
    pub fn content_type(&self) -> Option<&'static str> {
        match self.body {
            RequestBody::None => None,
            RequestBody::PreUpload(_) => Some(XML_CONTENT_TYPE),
        }
    }

    pub fn into_body(self) -> Option<String> {
        match self.body {
            RequestBody::None => None,
            RequestBody::PreUpload(body) => Some(body),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// XML body that preloads a presentation into a new meeting
pub fn pre_upload_body(slide_url: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\n<modules><module name='presentation'><document url='{}'/></module></modules>",
        escape_str_attribute(slide_url)
    )
}
