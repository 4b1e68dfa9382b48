// src/specs/mod.rs
//! # Page "specs"
//!
//! A spec knows *where the ground truth lives in a page's HTML* and how to
//! lift it into a [`ProductRecord`]. It does not decide which pages to visit,
//! what to skip, or how to export.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_products → ProductExtractor::extract(url)
//!                                   ↘ PageFetcher::fetch + specs::product_page::parse_page
//!                                   ↘ AssetStore::download (images)
//! ```
//!
//! ## Conventions
//! - Text fields are whitespace-collapsed and trimmed here, never later. The
//!   schema layer compares attribute names byte for byte.
//! - An empty product name means "not a product page": return
//!   `ExtractError::Incomplete` and let the pipeline skip it.
//! - Parsing is offline-testable: `parse_page` takes the page text directly.

pub mod product_page;

use crate::error::SourceError;
use crate::product::ProductRecord;

/// Turns one source address into a product, or a reason to skip it.
///
/// Called from several worker threads at once.
pub trait ProductExtractor: Sync {
    fn extract(&self, url: &str) -> Result<ProductRecord, SourceError>;
}
