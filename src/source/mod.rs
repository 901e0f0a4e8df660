//! Format decoder boundary.
//!
//! Provides a trait-based interface for page-oriented document access,
//! isolating the concrete PDF library (lopdf) from the profiling and
//! classification logic. The extractor and profiler only ever see
//! [`DocumentSource`], so tests can substitute in-memory sources.

mod lopdf_source;

pub use lopdf_source::{LopdfSource, LIBRARY_VERSION};

use crate::error::Result;
use crate::model::{OutlineEntry, PageBlock};

/// Raw document metadata as exposed by the decoder.
///
/// All fields are plain strings; absent entries stay empty. Date fields
/// carry the document's own date strings verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMetadata {
    pub title: String,
    pub author: String,
    pub creator: String,
    pub subject: String,
    pub keywords: String,
    pub creation_date: String,
    pub modification_date: String,
}

/// Abstract interface for a paginated document.
///
/// Implementations expose the page count, per-page block structures, the
/// embedded bookmark table, and document-level metadata — without leaking
/// any concrete PDF library types.
pub trait DocumentSource {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Document-level metadata key/values.
    fn metadata(&self) -> SourceMetadata;

    /// Decode the blocks of one page (1-based). Each call decodes afresh;
    /// the caller releases the returned blocks to bound peak memory.
    fn page_blocks(&self, page_num: u32) -> Result<Vec<PageBlock>>;

    /// The embedded bookmark table, flattened in document order.
    fn bookmarks(&self) -> Result<Vec<OutlineEntry>>;

    /// Version tag of the decoding library, recorded in processing metadata.
    fn library_version(&self) -> String;
}
