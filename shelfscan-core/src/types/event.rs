//! Events delivered by the scan-decoding collaborator

use chrono::{DateTime, Utc};

/// A single decoded barcode event from the scanning subsystem or a manual
/// form submission. Consumed once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScanEvent {
    /// The raw decoded payload, exactly as delivered
    pub payload: String,

    /// When the decode was observed
    pub observed_at: DateTime<Utc>,
}

impl RawScanEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            observed_at: Utc::now(),
        }
    }
}

/// A decode failure reported by the scanning subsystem.
///
/// Camera decoders emit a failure for every frame without a readable code,
/// so "nothing found yet" must stay distinguishable from a genuine decoder
/// error; the collaborator tags which one it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// No recognizable code in the frame; routine, ignored silently
    NoCodeInFrame,

    /// The decoder itself failed; surfaced to the user as a warning
    DecoderError(String),
}
