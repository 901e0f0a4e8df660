//! Page-level block types produced by the format decoder.
//!
//! A page is a sequence of blocks; a block is either a group of text lines
//! or a single image region. These are transient inputs to the classifier,
//! released as soon as a page has been processed.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box `(x0, y0, x1, y1)` in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox(pub f32, pub f32, pub f32, pub f32);

impl BBox {
    /// Expand this box to cover another.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox(
            self.0.min(other.0),
            self.1.min(other.1),
            self.2.max(other.2),
            self.3.max(other.3),
        )
    }
}

/// A contiguous run of uniformly-styled text within a line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Whether the font appears to be italic
    pub is_italic: bool,
}

impl TextSpan {
    /// Create a new span, inferring style flags from the font name.
    pub fn new(text: impl Into<String>, size: f32, font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let is_bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let is_italic = lower.contains("italic") || lower.contains("oblique");

        Self {
            text: text.into(),
            size,
            font_name,
            is_bold,
            is_italic,
        }
    }

    /// Style flags as a bitmask (bold = 16, italic = 2).
    pub fn style_flags(&self) -> u32 {
        let mut flags = 0;
        if self.is_bold {
            flags |= 16;
        }
        if self.is_italic {
            flags |= 2;
        }
        flags
    }
}

/// A line of spans sharing one baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    /// The spans in this line, in reading order
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a line from spans.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }
}

/// A page region grouping text lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    /// The lines in this block, in reading order
    pub lines: Vec<TextLine>,
    /// Bounding box of the block
    pub bbox: BBox,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(lines: Vec<TextLine>, bbox: BBox) -> Self {
        Self { lines, bbox }
    }

    /// Iterate over all spans across all lines in encounter order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.lines.iter().flat_map(|line| line.spans.iter())
    }

    /// Trimmed span texts joined by single spaces, in encounter order.
    pub fn text(&self) -> String {
        self.spans()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The span with the strictly largest size; ties keep the earliest.
    /// Whitespace-only spans carry no visible text and never qualify.
    pub fn primary_span(&self) -> Option<&TextSpan> {
        let mut primary: Option<&TextSpan> = None;
        for span in self.spans() {
            if span.text.trim().is_empty() {
                continue;
            }
            match primary {
                Some(p) if span.size > p.size => primary = Some(span),
                None => primary = Some(span),
                _ => {}
            }
        }
        primary
    }
}

/// A single image region on a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBlock {
    /// Bounding box of the placed image
    pub bbox: BBox,
    /// Pixel width of the image
    pub width: u32,
    /// Pixel height of the image
    pub height: u32,
}

/// A block on a page: either a group of text lines or a single image.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBlock {
    /// A text block
    Text(TextBlock),
    /// An image block
    Image(ImageBlock),
}
