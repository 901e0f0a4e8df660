//! Data model for structural extraction.

mod block;
mod document;
mod element;

pub use block::{BBox, ImageBlock, PageBlock, TextBlock, TextLine, TextSpan};
pub use document::{
    DocumentMetadata, DocumentResult, DocumentStructure, OutlineEntry, ProcessingInfo,
};
pub use element::{ElementKind, FontDescriptor, StructuralElement};
