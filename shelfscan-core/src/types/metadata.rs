//! Book metadata and draft types

use serde::{Deserialize, Serialize};

/// Descriptive metadata for a book, as returned by the lookup service.
///
/// Only the title is guaranteed present on a successful lookup; everything
/// else depends on how complete the service's record is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookMetadata {
    /// Book title
    pub title: String,

    /// Authors
    #[serde(default)]
    pub authors: Vec<String>,

    /// Canonical ISBN the record was resolved from
    pub isbn: Option<String>,

    /// Description/summary
    pub description: Option<String>,

    /// Publisher name
    pub publisher: Option<String>,

    /// Language code (ISO 639-1)
    pub language: Option<String>,

    /// Physical format (hardcover, paperback, ...)
    pub format: Option<String>,

    /// URL of a cover image
    pub cover_url: Option<String>,

    /// Publication date as reported by the service (free-form)
    pub published_date: Option<String>,

    /// Page count
    pub page_count: Option<u32>,

    /// Average reader rating
    pub average_rating: Option<f32>,

    /// Number of ratings behind the average
    pub ratings_count: Option<u32>,
}

/// The in-progress, editable book record the acquisition pipeline populates.
///
/// Owned by the UI layer; the orchestrator only writes into it field-by-field
/// on a successful lookup, never on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub format: Option<String>,
    pub cover_url: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub average_rating: Option<f32>,
    pub ratings_count: Option<u32>,
}

impl BookDraft {
    /// Overwrite draft fields with every non-empty field of `metadata`.
    ///
    /// Fields the service did not return are left as the user typed them;
    /// returned fields win unconditionally.
    pub fn merge(&mut self, metadata: &BookMetadata) {
        if !metadata.title.is_empty() {
            self.title = Some(metadata.title.clone());
        }
        if !metadata.authors.is_empty() {
            self.authors = metadata.authors.clone();
        }

        merge_text(&mut self.isbn, &metadata.isbn);
        merge_text(&mut self.description, &metadata.description);
        merge_text(&mut self.publisher, &metadata.publisher);
        merge_text(&mut self.language, &metadata.language);
        merge_text(&mut self.format, &metadata.format);
        merge_text(&mut self.cover_url, &metadata.cover_url);
        merge_text(&mut self.published_date, &metadata.published_date);

        if let Some(pages) = metadata.page_count {
            self.page_count = Some(pages);
        }
        if let Some(rating) = metadata.average_rating {
            self.average_rating = Some(rating);
        }
        if let Some(count) = metadata.ratings_count {
            self.ratings_count = Some(count);
        }
    }
}

fn merge_text(field: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        if !value.is_empty() {
            *field = Some(value.clone());
        }
    }
}
