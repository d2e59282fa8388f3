//! Validate command implementation

use anyhow::{bail, Result};
use shelfscan_core::types::normalize;

/// Validate a raw ISBN string
pub fn validate(input: &str) -> Result<()> {
    match normalize(input) {
        Ok(isbn) => {
            let kind = if isbn.as_str().len() == 10 {
                "ISBN-10"
            } else {
                "ISBN-13"
            };
            println!("Valid {}", kind);
            println!("  Canonical: {}", isbn);
            println!("  Display:   {}", isbn.hyphenated());
            Ok(())
        }
        Err(e) => {
            eprintln!("Invalid ISBN {:?}: {}", e.raw, e.reason);
            bail!("Validation failed for {}", input);
        }
    }
}
