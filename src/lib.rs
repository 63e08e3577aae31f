//! BigBlueButton API client
//!
//! This library provides helpers for calling the HTTP/XML API of a
//! BigBlueButton conferencing server: checksum signing, request building,
//! and parsing of the XML answers.
//!
//! # Modules
//!
//! - `auth`: checksum computation and query signing
//! - `request`: turns an [`ApiCall`] into a signed [`PreparedRequest`]
//! - `client`: async [`BigBlueButtonClient`] on top of a [`Transport`]
//! - `blocking`: synchronous client (`blocking` feature, on by default)
//! - `response`: [`ApiResponse`] and the `returncode` check
//!
//! # Authentication
//!
//! Every call carries `checksum=sha1(call + query + secret)` as its last
//! query parameter. The secret is the server's shared "salt" and is never
//! sent over the wire.
//!
//! # Example
//!
//! ```no_run
//! use bbb_client::{ApiCall, BbbConfig, BigBlueButtonClient};
//!
//! # async fn example() -> bbb_client::Result<()> {
//! let client = BigBlueButtonClient::new(BbbConfig::new(
//!     "https://bbb.example.com/bigbluebutton/api/",
//!     "shared-secret",
//! ));
//!
//! let response = client
//!     .get_xml(&ApiCall::new("isMeetingRunning", "meetingID=standup"))
//!     .await?;
//! println!("running: {}", response.matches("running"));
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(feature = "blocking")]
pub mod blocking;


// Re-export the main API types for ease of use
pub use auth::BbbAuth;
pub use client::BigBlueButtonClient;
pub use config::BbbConfig;
pub use document::{Element, XmlError};
pub use error::{BbbError, Result};
pub use request::{pre_upload_body, ApiCall, HttpMethod, PreparedRequest, RequestBody};
pub use response::{parse_response, xml_match, ApiResponse};
pub use transport::{HttpTransport, Transport};
