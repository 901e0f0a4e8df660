//! Typography profiling.
//!
//! Samples a bounded prefix of pages to derive adaptive classification
//! thresholds from the document's own font sizes, so heading detection
//! works without assuming any particular font convention.

use serde::{Deserialize, Serialize};

use crate::model::PageBlock;
use crate::source::DocumentSource;

/// Number of pages sampled by default.
pub const DEFAULT_SAMPLE_PAGES: u32 = 5;

/// Per-document font-size statistics and derived thresholds.
///
/// Derived once per document and immutable thereafter; passed explicitly
/// into the classifier rather than held as shared state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStatistics {
    /// Arithmetic mean of all sampled span sizes
    pub average_size: f32,
    /// Largest sampled span size
    pub max_size: f32,
    /// Sizes at or above this are level-2 headings (average × 1.2)
    pub heading_threshold: f32,
    /// Sizes at or above this are level-1 headings (average × 1.5)
    pub large_heading_threshold: f32,
}

impl FontStatistics {
    /// Fixed fallback for documents with no sampled spans.
    pub const DEFAULT: FontStatistics = FontStatistics {
        average_size: 12.0,
        max_size: 12.0,
        heading_threshold: 14.0,
        large_heading_threshold: 16.0,
    };

    /// Derive statistics from an average and maximum size.
    pub fn from_sizes(average_size: f32, max_size: f32) -> Self {
        Self {
            average_size,
            max_size,
            heading_threshold: average_size * 1.2,
            large_heading_threshold: average_size * 1.5,
        }
    }

    /// Profile a document by sampling its first pages.
    ///
    /// Samples `min(sample_pages, page_count)` pages and records every span
    /// size. A page that fails to decode is skipped; profiling itself never
    /// fails. With zero sampled spans the fixed default is returned.
    pub fn profile(source: &dyn DocumentSource, sample_pages: u32) -> Self {
        let sample_pages = sample_pages.min(source.page_count());

        let mut sizes: Vec<f32> = Vec::new();
        for page_num in 1..=sample_pages {
            let blocks = match source.page_blocks(page_num) {
                Ok(blocks) => blocks,
                Err(e) => {
                    log::warn!("Skipping page {} while profiling: {}", page_num, e);
                    continue;
                }
            };
            for block in &blocks {
                if let PageBlock::Text(text) = block {
                    sizes.extend(text.spans().map(|s| s.size));
                }
            }
        }

        if sizes.is_empty() {
            return Self::DEFAULT;
        }

        let average = sizes.iter().sum::<f32>() / sizes.len() as f32;
        let max = sizes.iter().fold(f32::MIN, |acc, &s| acc.max(s));
        Self::from_sizes(average, max)
    }
}

impl Default for FontStatistics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::{BBox, OutlineEntry, TextBlock, TextLine, TextSpan};
    use crate::source::SourceMetadata;

    struct FakeSource {
        pages: Vec<Result<Vec<PageBlock>>>,
    }

    impl FakeSource {
        fn with_sizes(pages: &[&[f32]]) -> Self {
            let pages = pages
                .iter()
                .map(|sizes| {
                    let spans = sizes
                        .iter()
                        .map(|&s| TextSpan::new("x", s, "Helvetica"))
                        .collect();
                    Ok(vec![PageBlock::Text(TextBlock::new(
                        vec![TextLine::from_spans(spans)],
                        BBox::default(),
                    ))])
                })
                .collect();
            Self { pages }
        }
    }

    impl DocumentSource for FakeSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn metadata(&self) -> SourceMetadata {
            SourceMetadata::default()
        }

        fn page_blocks(&self, page_num: u32) -> Result<Vec<PageBlock>> {
            match &self.pages[(page_num - 1) as usize] {
                Ok(blocks) => Ok(blocks.clone()),
                Err(_) => Err(Error::PdfParse("bad page".to_string())),
            }
        }

        fn bookmarks(&self) -> Result<Vec<OutlineEntry>> {
            Ok(Vec::new())
        }

        fn library_version(&self) -> String {
            "fake".to_string()
        }
    }

    #[test]
    fn test_thresholds_exact() {
        let source = FakeSource::with_sizes(&[&[10.0, 10.0, 10.0, 10.0]]);
        let stats = FontStatistics::profile(&source, DEFAULT_SAMPLE_PAGES);
        assert_eq!(stats.average_size, 10.0);
        assert_eq!(stats.heading_threshold, 12.0);
        assert_eq!(stats.large_heading_threshold, 15.0);
        assert_eq!(stats.max_size, 10.0);
    }

    #[test]
    fn test_empty_document_falls_back_to_default() {
        let source = FakeSource { pages: Vec::new() };
        let stats = FontStatistics::profile(&source, DEFAULT_SAMPLE_PAGES);
        assert_eq!(stats, FontStatistics::DEFAULT);
        assert_eq!(stats.average_size, 12.0);
        assert_eq!(stats.heading_threshold, 14.0);
        assert_eq!(stats.large_heading_threshold, 16.0);
    }

    #[test]
    fn test_sample_is_capped_at_page_count() {
        // Only one page exists; requesting five must not panic
        let source = FakeSource::with_sizes(&[&[12.0, 24.0]]);
        let stats = FontStatistics::profile(&source, 5);
        assert_eq!(stats.average_size, 18.0);
        assert_eq!(stats.max_size, 24.0);
    }

    #[test]
    fn test_failing_page_is_skipped() {
        let mut source = FakeSource::with_sizes(&[&[10.0, 10.0]]);
        source.pages.push(Err(Error::PdfParse("boom".to_string())));
        let stats = FontStatistics::profile(&source, DEFAULT_SAMPLE_PAGES);
        assert_eq!(stats.average_size, 10.0);
    }
}
