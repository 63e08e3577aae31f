use thiserror::Error;
use tracing::debug;

use crate::document::{Element, XmlError};

pub const RETURN_CODE_FIELD: &str = "returncode";
pub const SUCCESS_CODE: &str = "SUCCESS";

/// Outcome of a BigBlueButton API call.
///
/// Every failure the server or the payload can produce (unparseable XML, a
/// missing `returncode`, a `FAILED` code) is folded into `Absent`. Callers
/// that need the reason have to look at the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    Document(Element),
    Absent,
}

/// Why a response was collapsed into `Absent`. Only used for logging.
#[derive(Debug, Error)]
enum Rejection {
    #[error("{0}")]
    Malformed(XmlError),
    #[error("no returncode field")]
    MissingReturnCode,
    #[error("returncode was {0:?}")]
    ReturnCode(String),
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Document(_))
    }

    pub fn document(&self) -> Option<&Element> {
        match self {
            ApiResponse::Document(document) => Some(document),
            ApiResponse::Absent => None,
        }
    }

    pub fn into_document(self) -> Option<Element> {
        match self {
            ApiResponse::Document(document) => Some(document),
            ApiResponse::Absent => None,
        }
    }

    /// Text of the first element matching `path`
    pub fn field_text(&self, path: &str) -> Option<&str> {
        self.document().and_then(|document| document.find_text(path))
    }

    /// See [`xml_match`]
    pub fn matches(&self, path: &str) -> bool {
        xml_match(self, path)
    }
}

impl From<Option<Element>> for ApiResponse {
    fn from(document: Option<Element>) -> Self {
        document.map_or(ApiResponse::Absent, ApiResponse::Document)
    }
}

/// Parse a raw response body. Never fails; see [`ApiResponse`].
pub fn parse_response(body: &[u8]) -> ApiResponse {
    match check_return_code(body) {
        Ok(document) => ApiResponse::Document(document),
        Err(rejection) => {
            debug!("Discarding BigBlueButton response: {}", rejection);
            ApiResponse::Absent
        }
    }
}

fn check_return_code(body: &[u8]) -> Result<Element, Rejection> {
    let document = Element::parse(body).map_err(Rejection::Malformed)?;

    let code = document
        .find(RETURN_CODE_FIELD)
        .ok_or(Rejection::MissingReturnCode)?
        .text()
        .unwrap_or_default();

    if code == SUCCESS_CODE {
        Ok(document)
    } else {
        Err(Rejection::ReturnCode(code.to_string()))
    }
}

/// Return whether the first element matching `path` has the text `"true"`.
///
/// An absent response or a path that matches nothing gives `false`.
pub fn xml_match(response: &ApiResponse, path: &str) -> bool {
    response.field_text(path) == Some("true")
}
