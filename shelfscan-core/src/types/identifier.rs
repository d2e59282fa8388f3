//! ISBN validation and display formatting

use crate::error::{InvalidIsbn, RejectReason};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated canonical book identifier: 10 or 13 characters, digits only,
/// except that an ISBN-10 may end in the check character `X`.
///
/// Instances can only be created through [`normalize`], so holding an `Isbn`
/// means format validation already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// The canonical (unhyphenated) form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hyphenated display form
    pub fn hyphenated(&self) -> String {
        hyphenate(&self.0)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate and canonicalize a raw scanned or typed string into an [`Isbn`].
///
/// Hyphens, whitespace, and any stray symbols a barcode symbology may inject
/// are stripped before validation; only digits and `X`/`x` survive into the
/// candidate, and a lowercase `x` is canonicalized to `X`. The candidate must
/// then be exactly 9 digits plus a digit or `X` (ISBN-10) or 13 digits
/// (ISBN-13).
///
/// On rejection the error carries the original input verbatim, so callers can
/// echo what was actually attempted instead of failing hard.
pub fn normalize(raw: &str) -> Result<Isbn, InvalidIsbn> {
    let candidate: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let reason = match candidate.len() {
        0 => RejectReason::Empty,
        10 => {
            let bytes = candidate.as_bytes();
            let body_ok = bytes[..9].iter().all(u8::is_ascii_digit);
            let check_ok = bytes[9].is_ascii_digit() || bytes[9] == b'X';
            if body_ok && check_ok {
                return Ok(Isbn(candidate));
            }
            RejectReason::MisplacedCheckCharacter
        }
        13 => {
            if candidate.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(Isbn(candidate));
            }
            RejectReason::MisplacedCheckCharacter
        }
        n => RejectReason::BadLength(n),
    };

    Err(InvalidIsbn {
        raw: raw.to_string(),
        reason,
    })
}

/// Render an identifier in hyphenated display form.
///
/// Group sizes are 1-3-5-1 for ISBN-10 and 3-1-4-4-1 for ISBN-13. Input that
/// does not normalize to a valid identifier is returned unchanged.
pub fn format_isbn(s: &str) -> String {
    match normalize(s) {
        Ok(isbn) => hyphenate(isbn.as_str()),
        Err(_) => s.to_string(),
    }
}

fn hyphenate(canonical: &str) -> String {
    let groups: &[usize] = match canonical.len() {
        10 => &[1, 3, 5, 1],
        _ => &[3, 1, 4, 4, 1],
    };

    let mut out = String::with_capacity(canonical.len() + groups.len() - 1);
    let mut rest = canonical;
    for (i, &len) in groups.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        let (group, tail) = rest.split_at(len);
        out.push_str(group);
        rest = tail;
    }
    out
}
