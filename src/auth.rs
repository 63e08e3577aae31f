use sha1::{Digest, Sha1};
use tracing::trace;

/// Checksum utilities for the BigBlueButton API
pub struct BbbAuth;

impl BbbAuth {
    /// Compute the request checksum for a call.
    ///
    /// The digest input is the call name, the query string and the shared
    /// secret concatenated in that order with no separators. The result is a
    /// lowercase 40 character SHA-1 hex string.
    pub fn checksum(call: &str, query: &str, secret: &str) -> String {
        trace!("Checksum input: {}{}<secret>", call, query);

        let mut hasher = Sha1::new();
        hasher.update(call.as_bytes());
        hasher.update(query.as_bytes());
        hasher.update(secret.as_bytes());

        hex::encode(hasher.finalize())
    }

    /// Append `&checksum=<sha1>` to the query string
    pub fn sign_query(call: &str, query: &str, secret: &str) -> String {
        let checksum = Self::checksum(call, query, secret);
        format!("{}&checksum={}", query, checksum)
    }
}
