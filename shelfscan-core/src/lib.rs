//! Shelfscan Core Library
//!
//! Barcode-to-metadata acquisition pipeline for the Shelfscan reading
//! tracker: raw scan/typed input is normalized into a canonical ISBN,
//! duplicate rapid-fire scan events are suppressed, the identifier is
//! resolved to book metadata through the external lookup service, and the
//! result is merged into the editable book draft.

pub mod acquire;
pub mod dedup;
pub mod error;
pub mod lookup;
pub mod types;

pub use acquire::{Acquisition, NoticeLevel, ScanUi, SCAN_FETCH_DELAY};
pub use dedup::{ScanDeduplicator, Verdict, SCAN_COOLDOWN};
pub use error::{InvalidIsbn, RejectReason};
pub use lookup::{HttpLookupClient, LookupResult, MetadataLookup};
pub use types::{
    format_isbn, normalize, BookDraft, BookMetadata, DecodeFailure, Isbn, RawScanEvent,
};
