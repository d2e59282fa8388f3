//! Acquisition orchestration
//!
//! Single coordinating entry point for both acquisition paths: decoded scan
//! events and manual fetch requests on a typed-in identifier. Drives the
//! deduplicator, invokes the lookup client, signals the UI side-channel, and
//! merges resolved metadata into the caller-owned draft.

use crate::dedup::{ScanDeduplicator, Verdict};
use crate::lookup::{LookupResult, MetadataLookup};
use crate::types::{normalize, BookDraft, DecodeFailure, Isbn, RawScanEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Delay between an admitted scan and its lookup request.
///
/// Gives the user immediate scan feedback before the network round-trip
/// starts, and keeps trailing near-simultaneous decode events (already
/// filtered by the cooldown gate) from racing the fetch.
pub const SCAN_FETCH_DELAY: Duration = Duration::from_millis(1_500);

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// The UI side-channel the orchestrator signals.
///
/// Implemented by the presentation layer; the orchestrator only promises
/// ordering: for one attempt, loading is shown before the lookup runs, the
/// terminal notification fires before loading is cleared, and loading is
/// cleared on every exit path.
pub trait ScanUi: Send + Sync {
    fn notify(&self, message: &str, level: NoticeLevel);
    fn show_loading(&self);
    fn clear_loading(&self);
}

/// Orchestrates acquisition attempts against one draft.
///
/// Each instance owns its own deduplication window, so separate sessions do
/// not interfere. Shared behind an `Arc`: the scan path spawns a deferred
/// lookup task that outlives the event handler.
pub struct Acquisition {
    lookup: Arc<dyn MetadataLookup>,
    ui: Arc<dyn ScanUi>,
    draft: Arc<Mutex<BookDraft>>,
    dedup: Mutex<ScanDeduplicator>,
    manual_in_flight: AtomicBool,
    scan_fetch_delay: Duration,
}

impl Acquisition {
    pub fn new(
        lookup: Arc<dyn MetadataLookup>,
        ui: Arc<dyn ScanUi>,
        draft: Arc<Mutex<BookDraft>>,
    ) -> Self {
        Self {
            lookup,
            ui,
            draft,
            dedup: Mutex::new(ScanDeduplicator::new()),
            manual_in_flight: AtomicBool::new(false),
            scan_fetch_delay: SCAN_FETCH_DELAY,
        }
    }

    /// Override the scan fetch delay (tests)
    pub fn with_scan_fetch_delay(mut self, delay: Duration) -> Self {
        self.scan_fetch_delay = delay;
        self
    }

    /// Handle a decoded scan event.
    ///
    /// Rejected payloads are dropped silently: on the scan path a payload
    /// that does not look like an ISBN means the decoder misread the frame,
    /// and the user corrects by scanning again, not by reading a warning.
    /// Admitted scans write the identifier into the draft, confirm the scan
    /// to the user, and schedule the lookup after [`SCAN_FETCH_DELAY`].
    pub async fn handle_scan(self: &Arc<Self>, event: RawScanEvent) {
        let isbn = match normalize(&event.payload) {
            Ok(isbn) => isbn,
            Err(e) => {
                tracing::debug!(payload = %e.raw, reason = %e.reason, "Ignoring unscannable payload");
                return;
            }
        };

        let verdict = self.dedup.lock().await.admit(&isbn, Instant::now());
        if verdict == Verdict::Suppressed {
            tracing::debug!(isbn = %isbn, "Suppressed repeat scan");
            return;
        }

        tracing::info!(isbn = %isbn, observed_at = %event.observed_at, "Admitted scan");

        self.draft.lock().await.isbn = Some(isbn.as_str().to_string());
        self.ui.notify(
            &format!("Scanned ISBN {}", isbn.hyphenated()),
            NoticeLevel::Success,
        );

        // Deferred fetch; deliberately not cancellable. A superseding scan
        // lets both lookups resolve, last write wins on the draft.
        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(this.scan_fetch_delay).await;
            this.run_lookup(&isbn).await;
        });
    }

    /// Handle a decode failure reported by the scanning subsystem.
    ///
    /// Frames without a readable code arrive constantly while the camera is
    /// open and mean nothing; only a genuine decoder error reaches the user.
    pub async fn handle_decode_failure(&self, failure: DecodeFailure) {
        match failure {
            DecodeFailure::NoCodeInFrame => {
                tracing::trace!("No code in frame");
            }
            DecodeFailure::DecoderError(reason) => {
                tracing::warn!(reason = %reason, "Barcode decoder error");
                self.ui
                    .notify(&format!("Scanner error: {}", reason), NoticeLevel::Warning);
            }
        }
    }

    /// Handle a manual fetch request on the identifier field (a button press
    /// or an Enter-key submission, both equivalent).
    ///
    /// The manual path never deduplicates, validates loudly, and fetches
    /// immediately. A second trigger while a manual lookup is in flight is
    /// ignored.
    pub async fn handle_manual_fetch(&self, raw: &str) {
        if raw.trim().is_empty() {
            self.ui
                .notify("Enter an ISBN to look up first", NoticeLevel::Warning);
            return;
        }

        let isbn = match normalize(raw) {
            Ok(isbn) => isbn,
            Err(e) => {
                self.ui.notify(
                    &format!("\"{}\" is not a valid ISBN: {}", e.raw, e.reason),
                    NoticeLevel::Warning,
                );
                return;
            }
        };

        if self.manual_in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(isbn = %isbn, "Ignoring manual fetch while a lookup is in flight");
            return;
        }

        self.run_lookup(&isbn).await;
        self.manual_in_flight.store(false, Ordering::SeqCst);
    }

    /// Run one lookup attempt: loading shown, lookup, terminal notification,
    /// loading cleared.
    ///
    /// The lookup result union is exhaustive and the client never panics or
    /// returns raw errors, so every path reaches `clear_loading`. On any
    /// non-success outcome the draft stays untouched; partial merges do not
    /// exist.
    async fn run_lookup(&self, isbn: &Isbn) {
        self.ui.show_loading();

        match self.lookup.lookup(isbn).await {
            LookupResult::Success(metadata) => {
                self.draft.lock().await.merge(&metadata);
                self.ui.notify(
                    &format!("Found \"{}\"", metadata.title),
                    NoticeLevel::Success,
                );
            }
            LookupResult::NotFound => {
                self.ui.notify(
                    &format!("No book data found for ISBN {}", isbn.hyphenated()),
                    NoticeLevel::Error,
                );
            }
            LookupResult::TransportError { detail } => {
                self.ui.notify(
                    &format!("Book lookup failed: {}", detail),
                    NoticeLevel::Error,
                );
            }
        }

        self.ui.clear_loading();
    }

    /// The draft this orchestrator writes into
    pub fn draft(&self) -> Arc<Mutex<BookDraft>> {
        Arc::clone(&self.draft)
    }
}
