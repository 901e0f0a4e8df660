//! # pdfstruct
//!
//! Structural extraction of PDF documents for Rust.
//!
//! This library reads PDF files and classifies their content into a
//! typed structural outline — headings, paragraphs, footnotes, and image
//! placements — serialized as one JSON artifact per document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfstruct::extract_file;
//!
//! let result = extract_file("document.pdf");
//! for element in &result.structure.elements {
//!     println!("p{} {:?}: {}", element.page, element.kind, element.content);
//! }
//! println!("{}", result.to_json().unwrap());
//! ```
//!
//! Batch processing of a directory, with a bounded worker pool:
//!
//! ```no_run
//! use std::path::Path;
//! use pdfstruct::{run_batch, BatchOptions};
//!
//! let summary = run_batch(
//!     Path::new("input"),
//!     Path::new("output"),
//!     &BatchOptions::default(),
//! ).unwrap();
//! println!("{}/{} succeeded", summary.succeeded, summary.total);
//! ```
//!
//! ## Features
//!
//! - **Typography profiling**: heading thresholds derived per document
//! - **Structural classification**: headings, paragraphs, footnotes, images
//! - **Outline extraction**: embedded bookmark tables, flattened in order
//! - **Fault isolation**: a corrupt page or document never fails the batch
//! - **Parallel batches**: bounded Rayon pool with a sequential fallback

pub mod batch;
pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod profile;
pub mod source;

// Re-export commonly used types
pub use batch::{discover_inputs, run_batch, BatchOptions, BatchSummary};
pub use classify::classify_block;
pub use error::{Error, Result};
pub use extract::{extract_file, extract_source};
pub use model::{
    BBox, DocumentMetadata, DocumentResult, DocumentStructure, ElementKind, FontDescriptor,
    ImageBlock, OutlineEntry, PageBlock, ProcessingInfo, StructuralElement, TextBlock, TextLine,
    TextSpan,
};
pub use profile::FontStatistics;
pub use source::{DocumentSource, LopdfSource, SourceMetadata};
