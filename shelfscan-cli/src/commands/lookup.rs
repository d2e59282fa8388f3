//! Lookup command implementation

use anyhow::{bail, Context, Result};
use shelfscan_core::lookup::{HttpLookupClient, LookupResult, MetadataLookup};
use shelfscan_core::types::{normalize, BookMetadata};

/// Look up metadata for a single ISBN and print it
pub async fn lookup(raw: &str, server: &str, json: bool) -> Result<()> {
    let isbn = normalize(raw).with_context(|| format!("Not a valid ISBN: {}", raw))?;

    let client = HttpLookupClient::new(server).context("Failed to build HTTP client")?;

    match client.lookup(&isbn).await {
        LookupResult::Success(metadata) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                print_metadata(&metadata);
            }
            Ok(())
        }
        LookupResult::NotFound => {
            bail!("No book data found for ISBN {}", isbn.hyphenated());
        }
        LookupResult::TransportError { detail } => {
            bail!("Book lookup failed: {}", detail);
        }
    }
}

fn print_metadata(metadata: &BookMetadata) {
    println!("Title:       {}", metadata.title);
    if !metadata.authors.is_empty() {
        println!("Authors:     {}", metadata.authors.join(", "));
    }
    if let Some(isbn) = &metadata.isbn {
        println!("ISBN:        {}", isbn);
    }
    if let Some(publisher) = &metadata.publisher {
        println!("Publisher:   {}", publisher);
    }
    if let Some(date) = &metadata.published_date {
        println!("Published:   {}", date);
    }
    if let Some(language) = &metadata.language {
        println!("Language:    {}", language);
    }
    if let Some(format) = &metadata.format {
        println!("Format:      {}", format);
    }
    if let Some(pages) = metadata.page_count {
        println!("Pages:       {}", pages);
    }
    if let (Some(rating), Some(count)) = (metadata.average_rating, metadata.ratings_count) {
        println!("Rating:      {:.1} ({} ratings)", rating, count);
    }
    if let Some(description) = &metadata.description {
        println!("Description: {}", description);
    }
}
