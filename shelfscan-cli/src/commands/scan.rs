//! Scan command implementation
//!
//! USB barcode scanners present themselves as keyboards, so every scan
//! arrives as one line on stdin. Each line is fed through the full
//! acquisition pipeline: normalization, deduplication, deferred lookup, and
//! the draft merge.

use anyhow::{Context, Result};
use shelfscan_core::acquire::{Acquisition, NoticeLevel, ScanUi, SCAN_FETCH_DELAY};
use shelfscan_core::lookup::HttpLookupClient;
use shelfscan_core::types::{BookDraft, RawScanEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

/// Terminal implementation of the UI side-channel
struct TerminalUi;

impl ScanUi for TerminalUi {
    fn notify(&self, message: &str, level: NoticeLevel) {
        match level {
            NoticeLevel::Success => println!("{}", message),
            NoticeLevel::Warning => eprintln!("warning: {}", message),
            NoticeLevel::Error => eprintln!("error: {}", message),
        }
    }

    fn show_loading(&self) {
        println!("Looking up book data...");
    }

    fn clear_loading(&self) {}
}

/// Read scan events from stdin until EOF and run them through the pipeline
pub async fn scan(server: &str) -> Result<()> {
    let client = HttpLookupClient::new(server).context("Failed to build HTTP client")?;

    let draft = Arc::new(Mutex::new(BookDraft::default()));
    let acquisition = Arc::new(Acquisition::new(
        Arc::new(client),
        Arc::new(TerminalUi),
        Arc::clone(&draft),
    ));

    eprintln!("Scan a barcode (or type an ISBN), Ctrl-D to finish");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        acquisition.handle_scan(RawScanEvent::new(line)).await;
    }

    // Deferred lookups have no cancellation handle; give any still pending
    // one debounce window plus slack to settle before printing the draft.
    tokio::time::sleep(SCAN_FETCH_DELAY + Duration::from_millis(500)).await;

    let draft = draft.lock().await;
    if let Some(title) = &draft.title {
        println!();
        println!("Draft:");
        println!("  Title:     {}", title);
        if !draft.authors.is_empty() {
            println!("  Authors:   {}", draft.authors.join(", "));
        }
        if let Some(isbn) = &draft.isbn {
            println!("  ISBN:      {}", isbn);
        }
        if let Some(publisher) = &draft.publisher {
            println!("  Publisher: {}", publisher);
        }
        if let Some(pages) = draft.page_count {
            println!("  Pages:     {}", pages);
        }
    }

    Ok(())
}
