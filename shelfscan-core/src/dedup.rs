//! Scan deduplication
//!
//! Physical barcode scanners decode continuously from camera frames, so a
//! single physical scan frequently arrives as several identical events in
//! quick succession. Without this gate, one user action would trigger
//! multiple network lookups and duplicate notifications.

use crate::types::Isbn;
use std::time::Duration;
use tokio::time::Instant;

/// How long repeated scans of the same identifier are suppressed
pub const SCAN_COOLDOWN: Duration = Duration::from_millis(10_000);

/// Verdict on whether a scan proceeds downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    Suppressed,
}

/// A rolling one-entry cooldown window over admitted scans.
///
/// Owned by an orchestrator instance, never shared process-wide, so multiple
/// sessions (or tests) do not interfere with each other. The window is
/// rolling: it never needs an explicit reset.
#[derive(Debug, Default)]
pub struct ScanDeduplicator {
    last: Option<(Isbn, Instant)>,
}

impl ScanDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit or suppress a scan of `isbn` observed at `now`.
    ///
    /// Suppression requires the identical identifier within the cooldown; a
    /// different identifier is admitted no matter how recent the last scan
    /// was. Suppressed calls mutate nothing; admitted calls become the new
    /// window entry.
    pub fn admit(&mut self, isbn: &Isbn, now: Instant) -> Verdict {
        if let Some((last_isbn, last_at)) = &self.last {
            if last_isbn == isbn && now.duration_since(*last_at) < SCAN_COOLDOWN {
                return Verdict::Suppressed;
            }
        }

        self.last = Some((isbn.clone(), now));
        Verdict::Admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::normalize;

    fn isbn(s: &str) -> Isbn {
        normalize(s).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn first_scan_is_admitted() {
        let mut dedup = ScanDeduplicator::new();
        assert_eq!(dedup.admit(&isbn("9780596520687"), Instant::now()), Verdict::Admitted);
    }

    #[tokio::test(start_paused = true)]
    async fn repeat_within_cooldown_is_suppressed() {
        let mut dedup = ScanDeduplicator::new();
        let id = isbn("9780596520687");

        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Admitted);

        tokio::time::advance(Duration::from_millis(5_000)).await;
        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Suppressed);
    }

    #[tokio::test(start_paused = true)]
    async fn repeat_after_cooldown_is_admitted() {
        let mut dedup = ScanDeduplicator::new();
        let id = isbn("9780596520687");

        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Admitted);

        tokio::time::advance(Duration::from_millis(10_001)).await;
        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Admitted);
    }

    #[tokio::test(start_paused = true)]
    async fn different_identifier_is_never_suppressed() {
        let mut dedup = ScanDeduplicator::new();

        assert_eq!(dedup.admit(&isbn("9780596520687"), Instant::now()), Verdict::Admitted);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(dedup.admit(&isbn("0439708184"), Instant::now()), Verdict::Admitted);
    }

    #[tokio::test(start_paused = true)]
    async fn suppressed_scan_does_not_extend_the_window() {
        let mut dedup = ScanDeduplicator::new();
        let id = isbn("9780596520687");

        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Admitted);

        // A suppressed repeat at t+9s must not push the window forward:
        // the original entry expires at t+10s regardless.
        tokio::time::advance(Duration::from_millis(9_000)).await;
        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Suppressed);

        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(dedup.admit(&id, Instant::now()), Verdict::Admitted);
    }
}
