//! Block classification.
//!
//! Decides the structural type of each page block against the document's
//! typography profile. Pure and deterministic: identical inputs always
//! produce identical elements, and classification itself cannot fail.

use crate::model::{
    ElementKind, FontDescriptor, ImageBlock, PageBlock, StructuralElement, TextBlock,
};
use crate::profile::FontStatistics;

/// Classify one block into a structural element.
///
/// Text blocks whose concatenated, trimmed text is empty produce no
/// element; this is intentional, not an error. Image blocks always
/// produce exactly one `Image` element regardless of the statistics.
pub fn classify_block(
    block: &PageBlock,
    page: u32,
    stats: &FontStatistics,
) -> Option<StructuralElement> {
    match block {
        PageBlock::Text(text) => classify_text_block(text, page, stats),
        PageBlock::Image(image) => Some(classify_image_block(image, page)),
    }
}

fn classify_text_block(
    block: &TextBlock,
    page: u32,
    stats: &FontStatistics,
) -> Option<StructuralElement> {
    let content = block.text();
    if content.is_empty() {
        return None;
    }

    // The primary span characterizes the whole block, even when the content
    // mixes styles. text() being non-empty guarantees at least one span.
    let primary = block.primary_span()?;
    let size = primary.size;
    let bold = primary.is_bold;

    // Order matters: the bold-escalation rule is checked only after the
    // level-1 threshold fails and before the footnote/paragraph split, so a
    // bold, slightly-larger-than-average span reads as a subheading rather
    // than a paragraph.
    let kind = if size >= stats.large_heading_threshold {
        ElementKind::Heading { level: 1 }
    } else if size >= stats.heading_threshold || (size > stats.average_size && bold) {
        ElementKind::Heading { level: 2 }
    } else if size < stats.average_size * 0.8 {
        ElementKind::Footnote
    } else {
        ElementKind::Paragraph
    };

    let font = FontDescriptor::new(primary.font_name.clone(), size, primary.style_flags());

    Some(StructuralElement::new(kind, content, page, block.bbox, font))
}

fn classify_image_block(block: &ImageBlock, page: u32) -> StructuralElement {
    StructuralElement::new(
        ElementKind::Image,
        format!("[Image: width={}, height={}]", block.width, block.height),
        page,
        block.bbox,
        FontDescriptor::image(),
    )
}
