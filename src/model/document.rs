//! Per-document result aggregate and its serialized form.

use serde::{Deserialize, Serialize};

use super::StructuralElement;
use crate::error::Result;

/// An entry from the document's embedded bookmark table.
///
/// Taken verbatim from the document; independent of, and never reconciled
/// with, the inferred headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Bookmark title
    pub title: String,
    /// Nesting level (1 = top level)
    pub level: u32,
    /// Target page number (1-based; 0 if unresolved)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(title: impl Into<String>, level: u32, page: u32) -> Self {
        Self {
            title: title.into(),
            level,
            page,
        }
    }
}

/// Document-level metadata. Missing fields default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title (falls back to the filename stem when absent)
    pub title: String,
    /// Document author
    pub author: String,
    /// Creator application
    pub creator: String,
    /// Document subject
    pub subject: String,
    /// Keywords
    pub keywords: String,
    /// Total number of pages
    #[serde(rename = "pageCount")]
    pub page_count: u32,
    /// Raw creation date string (e.g., "D:20240115103045")
    #[serde(rename = "creationDate")]
    pub creation_date: String,
    /// Raw modification date string
    #[serde(rename = "modificationDate")]
    pub modification_date: String,
}

/// The reconstructed logical structure of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Classified elements, ordered by page then block encounter order
    pub elements: Vec<StructuralElement>,
    /// Embedded bookmark outline, in document order
    pub outline: Vec<OutlineEntry>,
}

/// Metadata about the extraction run itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    /// Elapsed time in seconds, rounded to milliseconds
    pub processing_time: f64,
    /// RFC 3339 timestamp of when extraction finished
    pub timestamp: String,
    /// Version tag of the underlying decoder library
    pub library_version: String,
    /// Total number of classified elements
    pub total_elements: usize,
    /// Error message if the document could not be fully processed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// The complete extraction result for one document.
///
/// Constructed once per document, immutable once returned, serialized
/// exactly once to `<stem>.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Input file name (base name, not the full path)
    pub filename: String,
    /// Document metadata
    pub metadata: DocumentMetadata,
    /// Reconstructed structure
    pub structure: DocumentStructure,
    /// Processing metadata
    pub processing_info: ProcessingInfo,
}

impl DocumentResult {
    /// Create an empty result for the given file name.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// The universal fallback shape for a top-level failure: zero pages,
    /// empty sequences, and the error captured in the processing metadata.
    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        let mut result = Self::new(filename);
        result.processing_info.error = Some(error.into());
        result
    }

    /// Number of classified elements.
    pub fn element_count(&self) -> usize {
        self.structure.elements.len()
    }

    /// Serialize to indented JSON, the per-document output artifact.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, ElementKind, FontDescriptor};

    #[test]
    fn test_failure_shape() {
        let result = DocumentResult::failure("broken.pdf", "unreadable");
        assert_eq!(result.metadata.page_count, 0);
        assert!(result.structure.elements.is_empty());
        assert!(result.structure.outline.is_empty());
        assert_eq!(result.processing_info.error.as_deref(), Some("unreadable"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut result = DocumentResult::new("doc.pdf");
        result.metadata.title = "Doc".to_string();
        result.metadata.page_count = 3;
        result.structure.elements.push(StructuralElement::new(
            ElementKind::Heading { level: 1 },
            "Title",
            1,
            BBox(0.0, 0.0, 100.0, 20.0),
            FontDescriptor::new("Helvetica-Bold", 18.0, 16),
        ));
        result
            .structure
            .outline
            .push(OutlineEntry::new("Chapter 1", 1, 2));
        result.processing_info.total_elements = 1;
        result.processing_info.library_version = "lopdf 0.34".to_string();

        let json = result.to_json().unwrap();
        let back: DocumentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_metadata_field_casing() {
        let mut result = DocumentResult::new("doc.pdf");
        result.metadata.page_count = 7;
        result.metadata.creation_date = "D:2024".to_string();

        let json = result.to_json().unwrap();
        assert!(json.contains("\"pageCount\": 7"));
        assert!(json.contains("\"creationDate\": \"D:2024\""));
        // No error field when extraction succeeded
        assert!(!json.contains("\"error\""));
    }
}
