//! Concrete [`DocumentSource`] backed by lopdf.
//!
//! Interprets page content streams to recover positioned text spans with
//! font size and style, groups them into lines and blocks, and resolves
//! image placements, the bookmark tree, and the Info dictionary.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::{DocumentSource, SourceMetadata};
use crate::error::{Error, Result};
use crate::model::{BBox, ImageBlock, OutlineEntry, PageBlock, TextBlock, TextLine, TextSpan};

/// Version tag recorded in processing metadata.
pub const LIBRARY_VERSION: &str = concat!("pdfstruct ", env!("CARGO_PKG_VERSION"), " (lopdf)");

/// PDF document source backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Wrap an already-loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        Self { doc }
    }

    /// Get the raw (decompressed) content stream bytes for a page.
    /// A page without a Contents entry is an empty page, not an error.
    fn page_content(&self, page_id: ObjectId) -> Result<Option<Vec<u8>>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(c) => c,
            Err(_) => return Ok(None),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    let data = s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()))?;
                    return Ok(Some(data));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(Some(content))
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Map XObject resource names to image pixel dimensions for a page.
    fn page_image_xobjects(&self, page_id: ObjectId) -> HashMap<Vec<u8>, (u32, u32)> {
        let mut images = HashMap::new();

        let Ok(page_dict) = self.doc.get_dictionary(page_id) else {
            return images;
        };
        let Ok(res) = page_dict.get(b"Resources") else {
            return images;
        };
        let res_dict = match res {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        };
        let Some(res_dict) = res_dict else {
            return images;
        };
        let Ok(xobjects) = res_dict.get(b"XObject") else {
            return images;
        };
        let xobj_dict = match xobjects {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        };
        let Some(xobj_dict) = xobj_dict else {
            return images;
        };

        for (name, obj) in xobj_dict.iter() {
            let Ok(obj_ref) = obj.as_reference() else {
                continue;
            };
            let Ok(Object::Stream(stream)) = self.doc.get_object(obj_ref) else {
                continue;
            };
            let is_image = stream
                .dict
                .get(b"Subtype")
                .ok()
                .and_then(|s| s.as_name().ok())
                .map(|n| n == b"Image")
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            let width = stream
                .dict
                .get(b"Width")
                .ok()
                .and_then(|w| w.as_i64().ok())
                .unwrap_or(0) as u32;
            let height = stream
                .dict
                .get(b"Height")
                .ok()
                .and_then(|h| h.as_i64().ok())
                .unwrap_or(0) as u32;
            images.insert(name.to_vec(), (width, height));
        }

        images
    }

    /// Walk the content stream, collecting positioned spans and image
    /// placements.
    fn interpret_content(
        &self,
        page_id: ObjectId,
        content: &[u8],
    ) -> Result<(Vec<PositionedSpan>, Vec<ImageBlock>)> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();
        let mut base_names: HashMap<Vec<u8>, String> = HashMap::new();
        for (name, font) in &fonts {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            base_names.insert(name.clone(), base);
        }

        let images = self.page_image_xobjects(page_id);

        let mut spans = Vec::new();
        let mut image_blocks = Vec::new();

        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font = String::new();
        let mut current_font_size: f32 = 12.0;
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;

        let mut ctm = Matrix::identity();
        let mut ctm_stack: Vec<Matrix> = Vec::new();

        for op in content.operations {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(m) = ctm_stack.pop() {
                        ctm = m;
                    }
                }
                "cm" => {
                    if op.operands.len() >= 6 {
                        let m = Matrix::from_operands(&op.operands);
                        ctm = m.multiply(&ctm);
                    }
                }
                "Do" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        if let Some(&(width, height)) = images.get(name.as_slice()) {
                            image_blocks.push(ImageBlock {
                                bbox: ctm.unit_square_bbox(),
                                width,
                                height,
                            });
                        }
                    }
                }
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = base_names
                                .get(font_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(font_name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let text = self.decode_shown_text(page_id, &current_font_name, &op);
                        if !text.trim().is_empty() {
                            let (x, y) = text_matrix.position();
                            let size = current_font_size * text_matrix.scale();
                            spans.push(PositionedSpan::new(text, x, y, size, &current_font));
                        }
                    }
                }
                "'" | "\"" => {
                    text_matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text = self.decode_bytes(page_id, &current_font_name, bytes);
                            if !text.trim().is_empty() {
                                let (x, y) = text_matrix.position();
                                let size = current_font_size * text_matrix.scale();
                                spans.push(PositionedSpan::new(text, x, y, size, &current_font));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok((spans, image_blocks))
    }

    /// Decode the text shown by a Tj or TJ operation.
    fn decode_shown_text(
        &self,
        page_id: ObjectId,
        font_name: &[u8],
        op: &lopdf::content::Operation,
    ) -> String {
        if op.operator == "TJ" {
            // TJ mixes strings with kerning adjustments in 1/1000 text space
            // units; large negative adjustments stand in for word spaces.
            let Some(Object::Array(arr)) = op.operands.first() else {
                return String::new();
            };
            let space_threshold = 200.0;
            let mut combined = String::new();
            for item in arr {
                match item {
                    Object::String(bytes, _) => {
                        combined.push_str(&self.decode_bytes(page_id, font_name, bytes));
                    }
                    Object::Integer(n) => {
                        if -(*n as f32) > space_threshold && needs_space(&combined) {
                            combined.push(' ');
                        }
                    }
                    Object::Real(n) => {
                        if -n > space_threshold && needs_space(&combined) {
                            combined.push(' ');
                        }
                    }
                    _ => {}
                }
            }
            combined
        } else {
            match op.operands.first() {
                Some(Object::String(bytes, _)) => self.decode_bytes(page_id, font_name, bytes),
                _ => String::new(),
            }
        }
    }

    /// Decode a text byte sequence using the font's encoding, with a
    /// simple fallback when the encoding is unavailable.
    fn decode_bytes(&self, page_id: ObjectId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page_id) {
            if let Some(font_dict) = fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Resolve the page id for a 1-based page number.
    fn page_id(&self, page_num: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))
    }

    /// Flatten the outline tree into entries, document order.
    fn walk_outline(
        &self,
        item_ref: ObjectId,
        level: u32,
        entries: &mut Vec<OutlineEntry>,
        visited: &mut HashSet<ObjectId>,
    ) {
        let mut current = Some(item_ref);
        while let Some(id) = current {
            // cycle guard
            if !visited.insert(id) {
                break;
            }
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };

            let title = get_string_from_dict(dict, b"Title").unwrap_or_default();
            let page = self.outline_destination(dict).unwrap_or(0);
            entries.push(OutlineEntry::new(title, level, page));

            if let Ok(first) = dict.get(b"First") {
                if let Ok(first_ref) = first.as_reference() {
                    self.walk_outline(first_ref, level + 1, entries, visited);
                }
            }

            current = dict.get(b"Next").ok().and_then(|n| n.as_reference().ok());
        }
    }

    /// Get the destination page number for an outline item.
    fn outline_destination(&self, item_dict: &lopdf::Dictionary) -> Option<u32> {
        if let Ok(dest) = item_dict.get(b"Dest") {
            return self.resolve_destination(dest);
        }

        if let Ok(action) = item_dict.get(b"A") {
            let action_dict = match action {
                Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
                Object::Dictionary(d) => Some(d),
                _ => None,
            };
            if let Some(action_dict) = action_dict {
                if let Ok(dest) = action_dict.get(b"D") {
                    return self.resolve_destination(dest);
                }
            }
        }

        None
    }

    /// Resolve a destination array to a 1-based page number.
    fn resolve_destination(&self, dest: &Object) -> Option<u32> {
        let pages = self.doc.get_pages();
        if let Ok(dest_array) = dest.as_array() {
            if let Some(first) = dest_array.first() {
                if let Ok(page_ref) = first.as_reference() {
                    for (num, id) in pages.iter() {
                        if *id == page_ref {
                            return Some(*num);
                        }
                    }
                }
            }
        }
        None
    }
}

impl DocumentSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn metadata(&self) -> SourceMetadata {
        let mut metadata = SourceMetadata::default();

        if let Ok(info) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    let get = |key: &[u8]| get_string_from_dict(info_dict, key).unwrap_or_default();
                    metadata.title = get(b"Title");
                    metadata.author = get(b"Author");
                    metadata.creator = get(b"Creator");
                    metadata.subject = get(b"Subject");
                    metadata.keywords = get(b"Keywords");
                    metadata.creation_date = get(b"CreationDate");
                    metadata.modification_date = get(b"ModDate");
                }
            }
        }

        metadata
    }

    fn page_blocks(&self, page_num: u32) -> Result<Vec<PageBlock>> {
        let page_id = self.page_id(page_num)?;

        let Some(content) = self.page_content(page_id)? else {
            return Ok(Vec::new());
        };

        let (spans, images) = self.interpret_content(page_id, &content)?;

        let lines = group_spans_into_lines(spans);
        let mut blocks: Vec<PageBlock> = group_lines_into_blocks(lines)
            .into_iter()
            .map(PageBlock::Text)
            .collect();
        blocks.extend(images.into_iter().map(PageBlock::Image));

        // Reading order: top edge first (PDF Y grows upward)
        blocks.sort_by(|a, b| {
            let top = |block: &PageBlock| match block {
                PageBlock::Text(t) => t.bbox.3,
                PageBlock::Image(i) => i.bbox.3,
            };
            top(b).partial_cmp(&top(a)).unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(blocks)
    }

    fn bookmarks(&self) -> Result<Vec<OutlineEntry>> {
        let mut entries = Vec::new();

        let catalog = self
            .doc
            .catalog()
            .map_err(|e| Error::Outline(e.to_string()))?;
        if let Ok(outlines) = catalog.get(b"Outlines") {
            if let Ok(outlines_ref) = outlines.as_reference() {
                if let Ok(outlines_dict) = self.doc.get_dictionary(outlines_ref) {
                    if let Ok(first) = outlines_dict.get(b"First") {
                        if let Ok(first_ref) = first.as_reference() {
                            let mut visited = HashSet::new();
                            self.walk_outline(first_ref, 1, &mut entries, &mut visited);
                        }
                    }
                }
            }
        }

        Ok(entries)
    }

    fn library_version(&self) -> String {
        LIBRARY_VERSION.to_string()
    }
}

/// A span with its baseline position, before line grouping.
#[derive(Debug, Clone)]
struct PositionedSpan {
    span: TextSpan,
    x: f32,
    y: f32,
    width: f32,
}

impl PositionedSpan {
    fn new(text: String, x: f32, y: f32, size: f32, font_name: &str) -> Self {
        // Width estimate: half the font size per character
        let width = text.chars().count() as f32 * size * 0.5;
        Self {
            span: TextSpan::new(text, size, font_name),
            x,
            y,
            width,
        }
    }

    fn bbox(&self) -> BBox {
        // Approximate descender/ascender from font size
        BBox(
            self.x,
            self.y - self.span.size * 0.2,
            self.x + self.width,
            self.y + self.span.size * 0.8,
        )
    }
}

/// A grouped line, before block grouping.
struct PositionedLine {
    spans: Vec<PositionedSpan>,
    y: f32,
    x: f32,
    font_size: f32,
}

impl PositionedLine {
    fn from_spans(mut spans: Vec<PositionedSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.span.text.len()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.span.size * s.span.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            spans.first().map(|s| s.span.size).unwrap_or(0.0)
        };

        let y = spans.first().map(|s| s.y).unwrap_or(0.0);
        let x = spans.first().map(|s| s.x).unwrap_or(0.0);

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }
}

/// Group spans into lines by baseline Y, top to bottom.
fn group_spans_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<PositionedLine> {
    if spans.is_empty() {
        return Vec::new();
    }

    // PDF Y is bottom-up: sort descending Y, then ascending X
    spans.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.span.size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            Some(_) => {
                lines.push(PositionedLine::from_spans(std::mem::take(&mut current)));
                current_y = Some(span.y);
                current.push(span);
            }
            None => {
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(PositionedLine::from_spans(current));
    }

    lines
}

/// Group lines into blocks by vertical spacing, size change, and indent.
fn group_lines_into_blocks(lines: Vec<PositionedLine>) -> Vec<TextBlock> {
    if lines.is_empty() {
        return Vec::new();
    }

    let avg_spacing = average_line_spacing(&lines);

    let mut blocks = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();

    for line in lines {
        let break_block = current.last().map(|prev| {
            let spacing = (prev.y - line.y).abs();
            spacing > avg_spacing * 1.5
                || (prev.font_size - line.font_size).abs() > 1.0
                || (prev.x - line.x).abs() > 20.0
        });

        if break_block == Some(true) {
            blocks.push(build_text_block(std::mem::take(&mut current)));
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(build_text_block(current));
    }

    blocks
}

fn build_text_block(lines: Vec<PositionedLine>) -> TextBlock {
    let mut bbox: Option<BBox> = None;
    for span in lines.iter().flat_map(|l| l.spans.iter()) {
        let sb = span.bbox();
        bbox = Some(match bbox {
            Some(b) => b.union(&sb),
            None => sb,
        });
    }

    let lines = lines
        .into_iter()
        .map(|l| TextLine::from_spans(l.spans.into_iter().map(|p| p.span).collect()))
        .collect();

    TextBlock::new(lines, bbox.unwrap_or_default())
}

fn average_line_spacing(lines: &[PositionedLine]) -> f32 {
    if lines.len() < 2 {
        return 12.0;
    }
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();
    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn needs_space(text: &str) -> bool {
    !text.is_empty() && !text.ends_with(' ') && !text.ends_with('\u{00A0}')
}

/// 2-D affine transform `[a b c d e f]`.
#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    fn from_operands(operands: &[Object]) -> Self {
        Self {
            a: get_number(&operands[0]).unwrap_or(1.0),
            b: get_number(&operands[1]).unwrap_or(0.0),
            c: get_number(&operands[2]).unwrap_or(0.0),
            d: get_number(&operands[3]).unwrap_or(1.0),
            e: get_number(&operands[4]).unwrap_or(0.0),
            f: get_number(&operands[5]).unwrap_or(0.0),
        }
    }

    /// `self × other` (PDF concatenation order: cm pre-multiplies the CTM).
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn transform(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Bounding box of the unit square under this transform. Image XObjects
    /// are placed in the unit square scaled by the CTM.
    fn unit_square_bbox(&self) -> BBox {
        let corners = [
            self.transform(0.0, 0.0),
            self.transform(1.0, 0.0),
            self.transform(0.0, 1.0),
            self.transform(1.0, 1.0),
        ];
        let mut bbox = BBox(corners[0].0, corners[0].1, corners[0].0, corners[0].1);
        for &(x, y) in &corners[1..] {
            bbox.0 = bbox.0.min(x);
            bbox.1 = bbox.1.min(y);
            bbox.2 = bbox.2.max(x);
            bbox.3 = bbox.3.max(y);
        }
        bbox
    }
}

/// Text matrix for tracking position within a text object.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading; TL is not tracked
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}
