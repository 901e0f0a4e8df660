//! Structural elements inferred from page blocks.

use serde::{Deserialize, Serialize};

use super::BBox;

/// The structural type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// A heading with its inferred level
    Heading {
        /// Heading level (1 = main heading, 2 = subheading)
        level: u8,
    },
    /// A body paragraph
    Paragraph,
    /// A footnote (noticeably smaller than body text)
    Footnote,
    /// An image region
    Image,
}

/// Representative font of a block: taken from its primary span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font name (e.g., "Helvetica-Bold")
    pub name: String,
    /// Font size in points
    pub size: f32,
    /// Style flags bitmask (bold = 16, italic = 2)
    pub flags: u32,
    /// Text color; not derivable from this signal set, fixed to 0
    pub color: u32,
}

impl FontDescriptor {
    /// Descriptor for a text block's primary span.
    pub fn new(name: impl Into<String>, size: f32, flags: u32) -> Self {
        Self {
            name: name.into(),
            size,
            flags,
            color: 0,
        }
    }

    /// Sentinel descriptor for image blocks.
    pub fn image() -> Self {
        Self::new("image", 0.0, 0)
    }
}

/// A classified element of the document structure.
///
/// Created from exactly one page block, never mutated afterwards. Elements
/// are ordered by page, then by block encounter order within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    /// Structural type and heading level
    #[serde(flatten)]
    pub kind: ElementKind,

    /// Concatenated text content, or a synthesized image description
    pub content: String,

    /// Page number (1-based)
    pub page: u32,

    /// Bounding box of the source block
    pub bbox: BBox,

    /// Font of the block's primary span
    pub font: FontDescriptor,
}

impl StructuralElement {
    /// Create a new element.
    pub fn new(
        kind: ElementKind,
        content: impl Into<String>,
        page: u32,
        bbox: BBox,
        font: FontDescriptor,
    ) -> Self {
        Self {
            kind,
            content: content.into(),
            page,
            bbox,
            font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_serde_tag() {
        let el = StructuralElement::new(
            ElementKind::Heading { level: 2 },
            "Introduction",
            1,
            BBox(10.0, 20.0, 200.0, 40.0),
            FontDescriptor::new("Helvetica-Bold", 16.0, 16),
        );

        let json = serde_json::to_string(&el).unwrap();
        assert!(json.contains("\"type\":\"heading\""));
        assert!(json.contains("\"level\":2"));

        let back: StructuralElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_image_sentinel_font() {
        let font = FontDescriptor::image();
        assert_eq!(font.name, "image");
        assert_eq!(font.size, 0.0);
        assert_eq!(font.flags, 0);
        assert_eq!(font.color, 0);
    }
}
