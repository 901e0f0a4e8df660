//! Per-document extraction driver.
//!
//! Runs one document end to end: profiling, page iteration, block
//! classification, and outline extraction. Extraction never fails; every
//! internal failure is captured into the result's processing metadata so
//! the batch layer always receives a well-formed artifact per input.

use std::path::Path;
use std::time::Instant;

use crate::classify::classify_block;
use crate::model::{DocumentMetadata, DocumentResult};
use crate::profile::{FontStatistics, DEFAULT_SAMPLE_PAGES};
use crate::source::{DocumentSource, LopdfSource, LIBRARY_VERSION};

/// Extract the structure of a PDF file.
///
/// On open failure this returns the canonical minimal result: zero pages,
/// empty element and outline sequences, and the error captured in the
/// processing metadata.
pub fn extract_file<P: AsRef<Path>>(path: P) -> DocumentResult {
    let path = path.as_ref();
    let start = Instant::now();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match LopdfSource::open(path) {
        Ok(source) => extract_with_start(&source, &filename, start),
        Err(e) => {
            log::error!("Failed to open {}: {}", filename, e);
            let mut result = DocumentResult::failure(&filename, e.to_string());
            finalize(&mut result, start, LIBRARY_VERSION.to_string());
            result
        }
    }
}

/// Extract the structure of an already-opened document source.
pub fn extract_source(source: &dyn DocumentSource, filename: &str) -> DocumentResult {
    extract_with_start(source, filename, Instant::now())
}

fn extract_with_start(
    source: &dyn DocumentSource,
    filename: &str,
    start: Instant,
) -> DocumentResult {
    let mut result = DocumentResult::new(filename);

    result.metadata = build_metadata(source, filename);

    // Profile typography once, before any page iteration
    let stats = FontStatistics::profile(source, DEFAULT_SAMPLE_PAGES);

    // Outline failure is non-fatal; the outline just stays empty
    match source.bookmarks() {
        Ok(outline) => result.structure.outline = outline,
        Err(e) => log::warn!("Could not extract outline from {}: {}", filename, e),
    }

    let page_count = source.page_count();
    for page_num in 1..=page_count {
        // Blocks are decoded per page and dropped at the end of each
        // iteration, bounding peak memory on large documents.
        let blocks = match source.page_blocks(page_num) {
            Ok(blocks) => blocks,
            Err(e) => {
                log::error!("Error processing page {} of {}: {}", page_num, filename, e);
                continue;
            }
        };
        for block in &blocks {
            if let Some(element) = classify_block(block, page_num, &stats) {
                result.structure.elements.push(element);
            }
        }
    }

    finalize(&mut result, start, source.library_version());
    log::info!(
        "Processed {} in {:.2}s ({} elements)",
        filename,
        result.processing_info.processing_time,
        result.processing_info.total_elements
    );
    result
}

fn build_metadata(source: &dyn DocumentSource, filename: &str) -> DocumentMetadata {
    let raw = source.metadata();
    let title = if raw.title.is_empty() {
        // Fall back to the filename stem
        Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.to_string())
    } else {
        raw.title
    };

    DocumentMetadata {
        title,
        author: raw.author,
        creator: raw.creator,
        subject: raw.subject,
        keywords: raw.keywords,
        page_count: source.page_count(),
        creation_date: raw.creation_date,
        modification_date: raw.modification_date,
    }
}

fn finalize(result: &mut DocumentResult, start: Instant, library_version: String) {
    let info = &mut result.processing_info;
    info.processing_time = (start.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
    info.timestamp = chrono::Utc::now().to_rfc3339();
    info.library_version = library_version;
    info.total_elements = result.structure.elements.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::{
        BBox, ElementKind, OutlineEntry, PageBlock, TextBlock, TextLine, TextSpan,
    };
    use crate::source::SourceMetadata;

    #[derive(Default)]
    struct MockSource {
        metadata: SourceMetadata,
        pages: Vec<Option<Vec<PageBlock>>>,
        outline: Option<Vec<OutlineEntry>>,
    }

    impl MockSource {
        fn paragraph_page(text: &str) -> Vec<PageBlock> {
            vec![PageBlock::Text(TextBlock::new(
                vec![TextLine::from_spans(vec![TextSpan::new(
                    text,
                    12.0,
                    "Helvetica",
                )])],
                BBox(0.0, 0.0, 100.0, 20.0),
            ))]
        }
    }

    impl DocumentSource for MockSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn metadata(&self) -> SourceMetadata {
            self.metadata.clone()
        }

        fn page_blocks(&self, page_num: u32) -> Result<Vec<PageBlock>> {
            match &self.pages[(page_num - 1) as usize] {
                Some(blocks) => Ok(blocks.clone()),
                None => Err(Error::PdfParse("page decode failed".to_string())),
            }
        }

        fn bookmarks(&self) -> Result<Vec<OutlineEntry>> {
            match &self.outline {
                Some(entries) => Ok(entries.clone()),
                None => Err(Error::Outline("damaged outline".to_string())),
            }
        }

        fn library_version(&self) -> String {
            "mock 1.0".to_string()
        }
    }

    #[test]
    fn test_open_failure_yields_minimal_result() {
        let result = extract_file("/nonexistent/missing.pdf");
        assert_eq!(result.filename, "missing.pdf");
        assert_eq!(result.metadata.page_count, 0);
        assert!(result.structure.elements.is_empty());
        assert!(result.structure.outline.is_empty());
        assert!(result.processing_info.error.is_some());
        assert!(!result.processing_info.timestamp.is_empty());
    }

    #[test]
    fn test_title_falls_back_to_filename_stem() {
        let source = MockSource {
            pages: vec![Some(MockSource::paragraph_page("body"))],
            outline: Some(Vec::new()),
            ..Default::default()
        };
        let result = extract_source(&source, "report-2024.pdf");
        assert_eq!(result.metadata.title, "report-2024");
        assert_eq!(result.metadata.page_count, 1);
    }

    #[test]
    fn test_explicit_title_is_kept() {
        let source = MockSource {
            metadata: SourceMetadata {
                title: "Annual Report".to_string(),
                author: "Jane".to_string(),
                ..Default::default()
            },
            pages: vec![Some(MockSource::paragraph_page("body"))],
            outline: Some(Vec::new()),
        };
        let result = extract_source(&source, "report.pdf");
        assert_eq!(result.metadata.title, "Annual Report");
        assert_eq!(result.metadata.author, "Jane");
    }

    #[test]
    fn test_page_failure_keeps_prior_elements() {
        let source = MockSource {
            pages: vec![
                Some(MockSource::paragraph_page("first")),
                None, // this page fails to decode
                Some(MockSource::paragraph_page("third")),
            ],
            outline: Some(Vec::new()),
            ..Default::default()
        };
        let result = extract_source(&source, "doc.pdf");
        assert!(result.processing_info.error.is_none());
        assert_eq!(result.structure.elements.len(), 2);
        assert_eq!(result.structure.elements[0].content, "first");
        assert_eq!(result.structure.elements[0].page, 1);
        assert_eq!(result.structure.elements[1].content, "third");
        assert_eq!(result.structure.elements[1].page, 3);
    }

    #[test]
    fn test_outline_failure_is_non_fatal() {
        let source = MockSource {
            pages: vec![Some(MockSource::paragraph_page("body"))],
            outline: None, // bookmarks() fails
            ..Default::default()
        };
        let result = extract_source(&source, "doc.pdf");
        assert!(result.processing_info.error.is_none());
        assert!(result.structure.outline.is_empty());
        assert_eq!(result.structure.elements.len(), 1);
    }

    #[test]
    fn test_outline_is_kept_verbatim() {
        let source = MockSource {
            pages: vec![Some(MockSource::paragraph_page("body"))],
            outline: Some(vec![
                OutlineEntry::new("Chapter 1", 1, 1),
                OutlineEntry::new("Section 1.1", 2, 1),
            ]),
            ..Default::default()
        };
        let result = extract_source(&source, "doc.pdf");
        assert_eq!(result.structure.outline.len(), 2);
        assert_eq!(result.structure.outline[0].title, "Chapter 1");
        assert_eq!(result.structure.outline[1].level, 2);
    }

    #[test]
    fn test_degenerate_document_completes_without_error() {
        let source = MockSource {
            pages: Vec::new(),
            outline: Some(Vec::new()),
            ..Default::default()
        };
        let result = extract_source(&source, "empty.pdf");
        assert!(result.processing_info.error.is_none());
        assert_eq!(result.metadata.page_count, 0);
        assert_eq!(result.processing_info.total_elements, 0);
    }

    #[test]
    fn test_element_ordering_and_classification() {
        // Page one carries a large heading followed by body text; the
        // profiler samples these same spans.
        let heading = TextBlock::new(
            vec![TextLine::from_spans(vec![TextSpan::new(
                "Title",
                24.0,
                "Helvetica-Bold",
            )])],
            BBox(0.0, 700.0, 200.0, 724.0),
        );
        let body_spans: Vec<TextSpan> = (0..20)
            .map(|i| TextSpan::new(format!("word{}", i), 10.0, "Helvetica"))
            .collect();
        let body = TextBlock::new(
            vec![TextLine::from_spans(body_spans)],
            BBox(0.0, 600.0, 400.0, 690.0),
        );

        let source = MockSource {
            pages: vec![Some(vec![
                PageBlock::Text(heading),
                PageBlock::Text(body),
            ])],
            outline: Some(Vec::new()),
            ..Default::default()
        };
        let result = extract_source(&source, "doc.pdf");

        assert_eq!(result.structure.elements.len(), 2);
        assert_eq!(
            result.structure.elements[0].kind,
            ElementKind::Heading { level: 1 }
        );
        assert_eq!(result.structure.elements[1].kind, ElementKind::Paragraph);
        assert_eq!(result.processing_info.total_elements, 2);
        assert_eq!(result.processing_info.library_version, "mock 1.0");
    }
}
