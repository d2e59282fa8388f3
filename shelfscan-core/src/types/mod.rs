//! Core types for the acquisition pipeline

mod event;
mod identifier;
mod metadata;

pub use event::{DecodeFailure, RawScanEvent};
pub use identifier::{format_isbn, normalize, Isbn};
pub use metadata::{BookDraft, BookMetadata};
