//! Metadata lookup against the external book service

mod http;

pub use http::HttpLookupClient;

use crate::types::{BookMetadata, Isbn};
use async_trait::async_trait;

/// Outcome of a single metadata lookup.
///
/// Every failure mode is normalized into this union; implementations never
/// propagate raw transport errors, so callers need no defensive error
/// handling around the call.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// The service resolved the identifier to a record with a usable title
    Success(BookMetadata),

    /// The service answered but has no data for this identifier
    NotFound,

    /// The service could not be reached, answered with a failure status, or
    /// returned a body that could not be decoded
    TransportError { detail: String },
}

/// Resolves an identifier to book metadata.
///
/// One request per call; no caching, no retries. Retry/backoff policy
/// belongs to the transport, not here.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(&self, isbn: &Isbn) -> LookupResult;
}
