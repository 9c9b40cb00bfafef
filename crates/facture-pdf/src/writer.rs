//! Primitive tree → PDF content streams.
//!
//! ## Coordinate Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  logical space (renderer)            PDF page space                     │
//! │  origin top-left, y down             origin bottom-left, y up           │
//! │  width 800                           A4: 595 × 842 pt                   │
//! │                                                                         │
//! │  px = x · s          s = 595 / 800                                      │
//! │  py = 842 − (y − page_offset) · s                                       │
//! │                                                                         │
//! │  Inside a transformed group the flip moves into the coordinate          │
//! │  computation (px = x·s, py = −y·s) so the group's `cm` matrix carries   │
//! │  only rotation and scale and glyphs are never mirrored.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every page replays the full tree at its own vertical offset; content
//! belonging to other pages lands outside the media box and is clipped.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use facture_core::types::Invoice;
use facture_render::style::{self, FontId};
use facture_render::tree::{
    DocumentTree, GroupPrim, ImagePrim, LinePrim, Primitive, RectPrim, TextPrim,
};

use crate::error::ExportError;
use crate::images::{add_xobject, DecodedImage};
use crate::paginate::{logical_page_height, page_count, page_stamp, A4_HEIGHT_PT, A4_WIDTH_PT};

/// Footer stamp baseline, points from the bottom edge.
const STAMP_BASELINE_PT: f64 = 24.0;
const STAMP_SIZE_PT: f64 = 9.0;

// =============================================================================
// Document Assembly
// =============================================================================

/// Encodes the rendered tree as a finished PDF.
///
/// `images` maps slot reference strings to their decoded bytes; slots with
/// no entry draw nothing. Returns the PDF bytes and the page count.
pub fn write_document(
    tree: &DocumentTree,
    invoice: &Invoice,
    images: &HashMap<String, DecodedImage>,
) -> Result<(Vec<u8>, usize), ExportError> {
    let scale = A4_WIDTH_PT / tree.width;
    let page_height = logical_page_height(tree.width);
    let total_pages = page_count(tree.height, page_height);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    // Embed images once; every page references the same XObjects. Sorted
    // for a stable name assignment.
    let mut embedded = HashMap::new();
    let mut xobjects = Dictionary::new();
    let mut sources: Vec<&String> = images.keys().collect();
    sources.sort();
    for (i, source) in sources.into_iter().enumerate() {
        let decoded = &images[source];
        let id = add_xobject(&mut doc, decoded)?;
        let name = format!("Im{}", i);
        xobjects.set(name.clone(), Object::Reference(id));
        embedded.insert(
            source.clone(),
            EmbeddedImage {
                name,
                width: decoded.width,
                height: decoded.height,
            },
        );
    }

    // One ExtGState per group, in emission (pre-)order.
    let mut gstates = Dictionary::new();
    for (i, opacity) in collect_group_opacities(&tree.primitives).iter().enumerate() {
        let id = doc.add_object(dictionary! {
            "Type" => "ExtGState",
            "ca" => *opacity,
            "CA" => *opacity,
        });
        gstates.set(format!("Gs{}", i), Object::Reference(id));
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_regular),
            "F2" => Object::Reference(font_bold),
        },
        "XObject" => xobjects,
        "ExtGState" => gstates,
    });

    let mut kids = Vec::with_capacity(total_pages);
    for page in 0..total_pages {
        let mut writer = PageWriter {
            scale,
            images: &embedded,
            ops: Vec::new(),
            gs_index: 0,
        };
        writer.clip_to_media_box();
        writer.emit_all(
            &tree.primitives,
            Frame::Page {
                y_offset: page as f64 * page_height,
            },
        );
        writer.stamp(page + 1, total_pages);

        let content = Content {
            operations: writer.ops,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "MediaBox" => vec![0.into(), 0.into(), A4_WIDTH_PT.into(), A4_HEIGHT_PT.into()],
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => total_pages as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(metadata(invoice));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok((bytes, total_pages))
}

/// Document information dictionary, mirroring what the preview's header
/// shows.
fn metadata(invoice: &Invoice) -> Dictionary {
    let title = if invoice.number.is_empty() {
        "Facture".to_string()
    } else {
        format!("Facture {}", invoice.number)
    };
    dictionary! {
        "Title" => Object::string_literal(title),
        "Subject" => Object::string_literal(format!("Facture pour {}", invoice.client.name)),
        "Author" => Object::string_literal(invoice.company.name.clone()),
        "Creator" => Object::string_literal("Facture"),
        "Keywords" => Object::string_literal(format!("facture, invoice, {}", invoice.number)),
    }
}

fn collect_group_opacities(primitives: &[Primitive]) -> Vec<f64> {
    fn walk(primitives: &[Primitive], out: &mut Vec<f64>) {
        for primitive in primitives {
            if let Primitive::Group(group) = primitive {
                out.push(group.opacity);
                walk(&group.children, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(primitives, &mut out);
    out
}

// =============================================================================
// Page Emission
// =============================================================================

struct EmbeddedImage {
    name: String,
    width: u32,
    height: u32,
}

/// Which coordinate frame the current primitives live in.
#[derive(Clone, Copy)]
enum Frame {
    /// Top-level page flow at a vertical page offset.
    Page { y_offset: f64 },
    /// Inside a group's `cm`: origin at the group anchor, flip baked into
    /// the coordinates.
    Local,
}

struct PageWriter<'a> {
    scale: f64,
    images: &'a HashMap<String, EmbeddedImage>,
    ops: Vec<Operation>,
    gs_index: usize,
}

impl PageWriter<'_> {
    fn map(&self, frame: Frame, x: f64, y: f64) -> (f64, f64) {
        match frame {
            Frame::Page { y_offset } => {
                (x * self.scale, A4_HEIGHT_PT - (y - y_offset) * self.scale)
            }
            Frame::Local => (x * self.scale, -y * self.scale),
        }
    }

    fn clip_to_media_box(&mut self) {
        self.op("re", vec![0.into(), 0.into(), A4_WIDTH_PT.into(), A4_HEIGHT_PT.into()]);
        self.op("W", vec![]);
        self.op("n", vec![]);
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn emit_all(&mut self, primitives: &[Primitive], frame: Frame) {
        for primitive in primitives {
            match primitive {
                Primitive::Text(text) => self.emit_text(text, frame),
                Primitive::Line(line) => self.emit_line(line, frame),
                Primitive::Rect(rect) => self.emit_rect(rect, frame),
                Primitive::Image(image) => self.emit_image(image, frame),
                Primitive::Group(group) => self.emit_group(group, frame),
            }
        }
    }

    fn emit_text(&mut self, text: &TextPrim, frame: Frame) {
        let (px, py) = self.map(frame, text.x, text.y);
        let font = match text.font {
            FontId::Regular => "F1",
            FontId::Bold => "F2",
        };
        self.op("BT", vec![]);
        self.op("Tf", vec![font.into(), (text.size * self.scale).into()]);
        self.op(
            "rg",
            vec![
                (text.color.r as f64).into(),
                (text.color.g as f64).into(),
                (text.color.b as f64).into(),
            ],
        );
        self.op("Td", vec![px.into(), py.into()]);
        self.op(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&text.content),
                StringFormat::Literal,
            )],
        );
        self.op("ET", vec![]);
    }

    fn emit_line(&mut self, line: &LinePrim, frame: Frame) {
        let (x1, y1) = self.map(frame, line.x1, line.y1);
        let (x2, y2) = self.map(frame, line.x2, line.y2);
        self.op("w", vec![(line.width * self.scale).into()]);
        self.op(
            "RG",
            vec![
                (line.color.r as f64).into(),
                (line.color.g as f64).into(),
                (line.color.b as f64).into(),
            ],
        );
        self.op("m", vec![x1.into(), y1.into()]);
        self.op("l", vec![x2.into(), y2.into()]);
        self.op("S", vec![]);
    }

    fn emit_rect(&mut self, rect: &RectPrim, frame: Frame) {
        // `re` wants the lower-left corner; that is the logical bottom edge.
        let (llx, lly) = self.map(frame, rect.x, rect.y + rect.h);
        let (w, h) = (rect.w * self.scale, rect.h * self.scale);

        if let Some(fill) = rect.fill {
            self.op(
                "rg",
                vec![
                    (fill.r as f64).into(),
                    (fill.g as f64).into(),
                    (fill.b as f64).into(),
                ],
            );
        }
        if let Some((width, color)) = rect.stroke {
            self.op("w", vec![(width * self.scale).into()]);
            self.op(
                "RG",
                vec![
                    (color.r as f64).into(),
                    (color.g as f64).into(),
                    (color.b as f64).into(),
                ],
            );
        }
        self.op("re", vec![llx.into(), lly.into(), w.into(), h.into()]);
        let paint = match (rect.fill.is_some(), rect.stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            _ => "S",
        };
        self.op(paint, vec![]);
    }

    fn emit_image(&mut self, image: &ImagePrim, frame: Frame) {
        // No resolved bytes for this reference: the slot stays empty.
        let Some(embedded) = self.images.get(image.source.as_str()) else {
            return;
        };

        let (dx, dy, dw, dh) = fit_contain(
            (image.x, image.y, image.w, image.h),
            (embedded.width, embedded.height),
        );
        let (llx, lly) = self.map(frame, dx, dy + dh);

        self.op("q", vec![]);
        self.op(
            "cm",
            vec![
                (dw * self.scale).into(),
                0.into(),
                0.into(),
                (dh * self.scale).into(),
                llx.into(),
                lly.into(),
            ],
        );
        self.op("Do", vec![embedded.name.as_str().into()]);
        self.op("Q", vec![]);
    }

    fn emit_group(&mut self, group: &GroupPrim, frame: Frame) {
        let name = format!("Gs{}", self.gs_index);
        self.gs_index += 1;

        let (ex, ey) = self.map(frame, group.tx, group.ty);
        // Positive logical rotation is clockwise on screen, which is a
        // negative angle in PDF's y-up space.
        let phi = (-group.rotation_deg).to_radians();
        let (a, b) = (group.scale * phi.cos(), group.scale * phi.sin());

        self.op("q", vec![]);
        self.op("gs", vec![name.as_str().into()]);
        self.op(
            "cm",
            vec![a.into(), b.into(), (-b).into(), a.into(), ex.into(), ey.into()],
        );
        self.emit_all(&group.children, Frame::Local);
        self.op("Q", vec![]);
    }

    fn stamp(&mut self, page: usize, total: usize) {
        let text = page_stamp(page, total);
        let width = style::text_width(&text, STAMP_SIZE_PT, FontId::Regular);
        let gray = style::STAMP_GRAY;

        self.op("BT", vec![]);
        self.op("Tf", vec!["F1".into(), STAMP_SIZE_PT.into()]);
        self.op(
            "rg",
            vec![
                (gray.r as f64).into(),
                (gray.g as f64).into(),
                (gray.b as f64).into(),
            ],
        );
        self.op(
            "Td",
            vec![((A4_WIDTH_PT - width) / 2.0).into(), STAMP_BASELINE_PT.into()],
        );
        self.op(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&text),
                StringFormat::Literal,
            )],
        );
        self.op("ET", vec![]);
    }
}

/// Largest centered box with the image's aspect ratio that fits the slot.
fn fit_contain(slot: (f64, f64, f64, f64), intrinsic: (u32, u32)) -> (f64, f64, f64, f64) {
    let (x, y, w, h) = slot;
    let (iw, ih) = (intrinsic.0.max(1) as f64, intrinsic.1.max(1) as f64);
    let ratio = (w / iw).min(h / ih);
    let (dw, dh) = (iw * ratio, ih * ratio);
    (x + (w - dw) / 2.0, y + (h - dh) / 2.0, dw, dh)
}

// =============================================================================
// Text Encoding
// =============================================================================

/// Encodes text as WinAnsi (CP-1252) bytes for the base-14 fonts.
///
/// Latin-1 covers the French invoice strings; a handful of CP-1252
/// specials are mapped explicitly and anything unrepresentable becomes
/// `?` rather than corrupting the byte stream.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0000}'..='\u{007F}' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'œ' => 0x9C,
            'Œ' => 0x8C,
            _ => b'?',
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_encode_win_ansi_french_strings() {
        assert_eq!(encode_win_ansi("FACTURE"), b"FACTURE".to_vec());
        assert_eq!(encode_win_ansi("Échéance"), vec![0xC9, b'c', b'h', 0xE9, b'a', b'n', b'c', b'e']);
        assert_eq!(encode_win_ansi("N°"), vec![b'N', 0xB0]);
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
        assert_eq!(encode_win_ansi("日本"), vec![b'?', b'?']);
    }

    #[test]
    fn test_fit_contain_centers_and_preserves_ratio() {
        // Wide image in a square slot: full width, vertically centered.
        let (x, y, w, h) = fit_contain((0.0, 0.0, 100.0, 100.0), (200, 100));
        assert_eq!((x, y, w, h), (0.0, 25.0, 100.0, 50.0));

        // Tall image in a wide slot: full height, horizontally centered.
        let (x, y, w, h) = fit_contain((10.0, 10.0, 100.0, 50.0), (100, 200));
        assert_eq!((x, y, w, h), (47.5, 10.0, 25.0, 50.0));
    }

    #[test]
    fn test_fit_contain_survives_zero_dimension() {
        let (_, _, w, h) = fit_contain((0.0, 0.0, 100.0, 100.0), (0, 0));
        assert!(w.is_finite() && h.is_finite());
    }

    #[test]
    fn test_write_document_produces_pdf_with_page_count() {
        let invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let tree = facture_render::render(&invoice, &Default::default());
        let (bytes, pages) = write_document(&tree, &invoice, &HashMap::new()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(pages, 1);
    }

    #[test]
    fn test_tall_tree_paginates() {
        let invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let mut tree = facture_render::render(&invoice, &Default::default());
        tree.height = logical_page_height(tree.width) * 2.0 + 1.0;
        let (_, pages) = write_document(&tree, &invoice, &HashMap::new()).unwrap();
        assert_eq!(pages, 3);
    }
}
