//! # Document Renderer
//!
//! Assembles one immutable visual representation of an [`Invoice`] under
//! the current [`InvoiceSettings`], suitable for the on-screen preview and
//! for export.
//!
//! ## Section Order (fixed)
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ header   (company block | title/№/dates)   │
//! │ client   ("Facturer à:")                   │
//! │ items    (table, or "Aucun article")       │
//! │ totals   (Sous-total / TVA / Total)        │
//! │ footer   (label : value | label : value)   │
//! │ signature (right-aligned slot)             │
//! │ watermark (overlay group, always last)     │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The renderer is total: an image reference that later fails to resolve
//! just leaves its slot empty; nothing here can error. Output is
//! deterministic — no clocks, no randomness, no ambient state beyond the
//! two inputs.

use facture_core::totals::{format_amount, line_amount, Totals};
use facture_core::types::{Invoice, InvoiceItem, InvoiceSettings, LogoPosition};
use facture_core::watermark::{self, WatermarkContent};
use facture_core::{EXPORT_RENDER_WIDTH, WATERMARK_VIEWPORT_HEIGHT, WATERMARK_VIEWPORT_WIDTH};

use crate::style::{
    self, text_width, FontId, Rgb, CARD_BACKGROUND, DIVIDER, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::tree::{
    DocumentTree, GroupPrim, ImagePrim, ImageSlot, LinePrim, Primitive, RectPrim, TextPrim,
};

/// Outer page padding, logical units.
const PAD: f64 = 40.0;
/// Vertical gap between sections.
const SECTION_GAP: f64 = 32.0;
/// Body line height.
const LINE_H: f64 = 16.0;
/// Items table row height.
const ROW_H: f64 = 24.0;
/// Logo slot (height matches the preview's fixed max height).
const LOGO_W: f64 = 160.0;
const LOGO_H: f64 = 64.0;
/// Signature slot (fixed max width, right-aligned).
const SIGNATURE_W: f64 = 200.0;
const SIGNATURE_H: f64 = 80.0;
/// Single-mode image watermark box: 50% of the watermark viewport.
const WATERMARK_IMAGE_BOX: f64 = WATERMARK_VIEWPORT_WIDTH / 2.0;

/// Date display format: day/month/4-digit-year.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Renders the invoice into a primitive tree at the fixed export width.
pub fn render(invoice: &Invoice, settings: &InvoiceSettings) -> DocumentTree {
    let width = EXPORT_RENDER_WIDTH;
    let accent = Rgb::parse(&settings.appearance.border_color);

    let mut body = Vec::new();
    let mut y = PAD;

    y = header_section(&mut body, invoice, accent, y, width);
    y += SECTION_GAP;
    y = client_section(&mut body, invoice, y, width);
    y += SECTION_GAP;
    y = items_section(&mut body, invoice, y, width);
    y += SECTION_GAP;
    y = totals_section(&mut body, invoice, accent, y, width);
    y += SECTION_GAP;
    y = footer_section(&mut body, invoice, y, width);
    y = signature_section(&mut body, invoice, y, width);

    let height = y + PAD;

    let mut primitives = Vec::with_capacity(body.len() + 2);
    if settings.appearance.border_width > 0 {
        let bw = settings.appearance.border_width as f64;
        primitives.push(Primitive::Rect(RectPrim {
            x: bw / 2.0,
            y: bw / 2.0,
            w: width - bw,
            h: height - bw,
            stroke: Some((bw, Rgb::parse(&settings.appearance.border_color))),
            fill: None,
        }));
    }
    primitives.extend(body);
    if let Some(group) = watermark_overlay(settings, width, height) {
        // Overlay z-order: the watermark always draws above the content.
        primitives.push(Primitive::Group(group));
    }

    DocumentTree {
        width,
        height,
        primitives,
    }
}

// =============================================================================
// Sections
// =============================================================================

fn header_section(
    out: &mut Vec<Primitive>,
    invoice: &Invoice,
    accent: Rgb,
    top: f64,
    width: f64,
) -> f64 {
    let inner_left = PAD + 24.0;
    let inner_right = width - PAD - 24.0;

    let has_logo = invoice
        .company
        .logo
        .as_ref()
        .map(|logo| !logo.url.is_empty())
        .unwrap_or(false);

    // Heights are analytic so the background rect can be placed first
    // (lowest in the band's z-order).
    let left_lines = 5.0; // street, postal/city, phone, email, TVA
    let left_h =
        24.0 + if has_logo { LOGO_H + 16.0 } else { 0.0 } + 20.0 + left_lines * LINE_H + 24.0;
    let right_h = 24.0 + 36.0 + 16.0 + 3.0 * LINE_H + 24.0;
    let header_h = left_h.max(right_h);

    out.push(Primitive::Rect(RectPrim {
        x: PAD,
        y: top,
        w: width - 2.0 * PAD,
        h: header_h,
        stroke: None,
        fill: Some(CARD_BACKGROUND),
    }));

    // Left column: logo, company identity.
    let mut y = top + 24.0;
    if let Some(logo) = invoice.company.logo.as_ref().filter(|l| !l.url.is_empty()) {
        let x = match logo.position {
            LogoPosition::Left => inner_left,
            LogoPosition::Center => (width - LOGO_W) / 2.0,
            LogoPosition::Right => inner_right - LOGO_W,
        };
        out.push(Primitive::Image(ImagePrim {
            x,
            y,
            w: LOGO_W,
            h: LOGO_H,
            source: logo.url.clone(),
            slot: ImageSlot::Logo,
        }));
        y += LOGO_H + 16.0;
    }

    y += 16.0;
    out.push(text(inner_left, y, 16.0, FontId::Bold, TEXT_PRIMARY, &invoice.company.name));
    y += 20.0;

    let company = &invoice.company;
    let lines = [
        company.address.street.clone(),
        format!("{} {}", company.address.postal_code, company.address.city),
        company.contact.phone.clone(),
        company.contact.email.clone(),
        format!("TVA: {}", company.vat_number),
    ];
    for content in lines {
        out.push(text(inner_left, y, 11.0, FontId::Regular, TEXT_SECONDARY, &content));
        y += LINE_H;
    }

    // Right column: effective title, number, dates.
    let mut ry = top + 24.0 + 28.0;
    out.push(text_right(
        inner_right,
        ry,
        32.0,
        FontId::Bold,
        accent,
        invoice.effective_title(),
    ));
    ry += 36.0 + 16.0;

    let right_lines = [
        (FontId::Bold, format!("N° {}", invoice.number)),
        (
            FontId::Regular,
            format!("Date: {}", invoice.issue_date.format(DATE_FORMAT)),
        ),
        (
            FontId::Regular,
            format!("Échéance: {}", invoice.due_date.format(DATE_FORMAT)),
        ),
    ];
    for (font, content) in right_lines {
        out.push(text_right(inner_right, ry, 11.0, font, TEXT_SECONDARY, &content));
        ry += LINE_H;
    }

    top + header_h
}

fn client_section(out: &mut Vec<Primitive>, invoice: &Invoice, top: f64, width: f64) -> f64 {
    let card_h = 24.0 + 20.0 + 18.0 + 2.0 * LINE_H + 16.0;
    out.push(Primitive::Rect(RectPrim {
        x: PAD,
        y: top,
        w: width - 2.0 * PAD,
        h: card_h,
        stroke: Some((1.0, DIVIDER)),
        fill: None,
    }));

    let x = PAD + 24.0;
    let mut y = top + 24.0;
    out.push(text(x, y, 14.0, FontId::Bold, TEXT_PRIMARY, "Facturer à:"));
    y += 20.0;
    out.push(text(x, y, 13.0, FontId::Bold, TEXT_PRIMARY, &invoice.client.name));
    y += 18.0;
    out.push(text(
        x,
        y,
        11.0,
        FontId::Regular,
        TEXT_SECONDARY,
        &invoice.client.billing_address.street,
    ));
    y += LINE_H;
    out.push(text(
        x,
        y,
        11.0,
        FontId::Regular,
        TEXT_SECONDARY,
        &format!(
            "{} {}",
            invoice.client.billing_address.postal_code, invoice.client.billing_address.city
        ),
    ));

    top + card_h
}

fn items_section(out: &mut Vec<Primitive>, invoice: &Invoice, top: f64, width: f64) -> f64 {
    let left = PAD + 8.0;
    let col_qty = 460.0;
    let col_price = 570.0;
    let col_vat = 640.0;
    let col_amount = width - PAD - 8.0;

    let mut y = top + LINE_H;
    out.push(text(left, y, 11.0, FontId::Bold, TEXT_PRIMARY, "Description"));
    out.push(text_right(col_qty, y, 11.0, FontId::Bold, TEXT_PRIMARY, "Quantité"));
    out.push(text_right(col_price, y, 11.0, FontId::Bold, TEXT_PRIMARY, "Prix unitaire"));
    out.push(text_right(col_vat, y, 11.0, FontId::Bold, TEXT_PRIMARY, "TVA"));
    out.push(text_right(col_amount, y, 11.0, FontId::Bold, TEXT_PRIMARY, "Montant"));
    y += 8.0;
    out.push(divider(PAD, y, width - PAD, 1.0));

    if invoice.items.is_empty() {
        // Explicit placeholder instead of an empty table body.
        y += ROW_H;
        out.push(text_centered(
            width / 2.0,
            y,
            11.0,
            FontId::Regular,
            TEXT_SECONDARY,
            "Aucun article",
        ));
        y += 12.0;
        out.push(divider(PAD, y, width - PAD, 1.0));
        return y;
    }

    for item in &invoice.items {
        y += ROW_H;
        out.push(text(left, y, 11.0, FontId::Regular, TEXT_PRIMARY, &item.description));
        out.push(text_right(
            col_qty,
            y,
            11.0,
            FontId::Regular,
            TEXT_PRIMARY,
            &format_quantity(item),
        ));
        out.push(text_right(
            col_price,
            y,
            11.0,
            FontId::Regular,
            TEXT_PRIMARY,
            &format_amount(item.unit_price),
        ));
        out.push(text_right(
            col_vat,
            y,
            11.0,
            FontId::Regular,
            TEXT_PRIMARY,
            item.vat_rate.label(),
        ));
        out.push(text_right(
            col_amount,
            y,
            11.0,
            FontId::Bold,
            TEXT_PRIMARY,
            &format_amount(line_amount(item)),
        ));
        y += 8.0;
        out.push(divider(PAD, y, width - PAD, 0.5));
    }

    y
}

fn totals_section(
    out: &mut Vec<Primitive>,
    invoice: &Invoice,
    accent: Rgb,
    top: f64,
    width: f64,
) -> f64 {
    let totals = Totals::of(&invoice.items);
    let card_w = 300.0;
    let card_x = width - PAD - card_w;
    let card_h = 16.0 + 3.0 * 22.0 + 12.0 + 16.0;

    out.push(Primitive::Rect(RectPrim {
        x: card_x,
        y: top,
        w: card_w,
        h: card_h,
        stroke: Some((1.0, DIVIDER)),
        fill: None,
    }));

    let label_x = card_x + 16.0;
    let value_x = card_x + card_w - 16.0;
    let mut y = top + 16.0 + 11.0;

    out.push(text(label_x, y, 11.0, FontId::Regular, TEXT_SECONDARY, "Sous-total:"));
    out.push(text_right(
        value_x,
        y,
        11.0,
        FontId::Regular,
        TEXT_SECONDARY,
        &format_amount(totals.subtotal),
    ));
    y += 22.0;
    out.push(text(label_x, y, 11.0, FontId::Regular, TEXT_SECONDARY, "TVA:"));
    out.push(text_right(
        value_x,
        y,
        11.0,
        FontId::Regular,
        TEXT_SECONDARY,
        &format_amount(totals.tax),
    ));
    y += 10.0;
    out.push(divider(label_x, y, value_x, 1.0));
    y += 22.0;
    // The grand total stands out: bold, accent-colored value.
    out.push(text(label_x, y, 13.0, FontId::Bold, TEXT_PRIMARY, "Total:"));
    out.push(text_right(
        value_x,
        y,
        13.0,
        FontId::Bold,
        accent,
        &format_amount(totals.total),
    ));

    top + card_h
}

fn footer_section(out: &mut Vec<Primitive>, invoice: &Invoice, top: f64, width: f64) -> f64 {
    let mut y = top;
    out.push(divider(PAD, y, width - PAD, 1.0));
    y += 24.0;

    if invoice.footer_fields.is_empty() {
        return y;
    }

    // `label : value`, label prefix omitted when empty, separated by short
    // vertical dividers, centered as one strip.
    let texts: Vec<String> = invoice
        .footer_fields
        .iter()
        .map(|field| {
            if field.label.is_empty() {
                field.value.clone()
            } else {
                format!("{} : {}", field.label, field.value)
            }
        })
        .collect();

    const GAP: f64 = 16.0;
    let widths: Vec<f64> = texts
        .iter()
        .map(|t| text_width(t, 10.0, FontId::Regular))
        .collect();
    let total_w: f64 =
        widths.iter().sum::<f64>() + (texts.len() as f64 - 1.0) * (2.0 * GAP + 1.0);

    let mut x = (width - total_w) / 2.0;
    let baseline = y + 10.0;
    for (i, content) in texts.iter().enumerate() {
        out.push(text(x, baseline, 10.0, FontId::Regular, TEXT_SECONDARY, content));
        x += widths[i];
        if i + 1 < texts.len() {
            x += GAP;
            out.push(Primitive::Line(LinePrim {
                x1: x,
                y1: baseline - 10.0,
                x2: x,
                y2: baseline + 2.0,
                width: 1.0,
                color: DIVIDER,
            }));
            x += 1.0 + GAP;
        }
    }

    baseline + LINE_H
}

fn signature_section(out: &mut Vec<Primitive>, invoice: &Invoice, top: f64, width: f64) -> f64 {
    // In the editable view this slot shows an "add a signature" affordance;
    // for rendering, no signature simply means nothing in the slot.
    let Some(signature) = invoice.signature.as_ref().filter(|s| !s.is_empty()) else {
        return top;
    };

    let y = top + 24.0;
    out.push(Primitive::Image(ImagePrim {
        x: width - PAD - SIGNATURE_W,
        y,
        w: SIGNATURE_W,
        h: SIGNATURE_H,
        source: signature.clone(),
        slot: ImageSlot::Signature,
    }));
    y + SIGNATURE_H
}

// =============================================================================
// Watermark Overlay
// =============================================================================

/// Converts the watermark engine's geometry into one overlay group.
///
/// The anchor is expressed in the engine's fixed 500×500 viewport and maps
/// proportionally onto the page; tile offsets stay in absolute units, so a
/// mosaic grid is the same physical size on every page, exactly like the
/// live preview.
fn watermark_overlay(settings: &InvoiceSettings, width: f64, height: f64) -> Option<GroupPrim> {
    let layout = watermark::layout(&settings.watermark);
    let content = layout.content.as_ref()?;
    if layout.placements.is_empty() {
        return None;
    }

    let mut children = Vec::with_capacity(layout.placements.len());
    for placement in &layout.placements {
        match placement.size {
            // Mosaic tile: content sized to the tile slot.
            Some((tile_w, tile_h)) => match content {
                WatermarkContent::Text {
                    text: wm_text,
                    color,
                    font_size,
                } => {
                    let tw = text_width(wm_text, *font_size, FontId::Bold);
                    children.push(text(
                        placement.offset.x + (tile_w - tw) / 2.0,
                        placement.offset.y + tile_h / 2.0 + font_size * 0.35,
                        *font_size,
                        FontId::Bold,
                        Rgb::parse(color),
                        wm_text,
                    ));
                }
                WatermarkContent::Image { url } => {
                    children.push(Primitive::Image(ImagePrim {
                        x: placement.offset.x,
                        y: placement.offset.y,
                        w: tile_w,
                        h: tile_h,
                        source: url.clone(),
                        slot: ImageSlot::Watermark,
                    }));
                }
            },
            // Single placement: the element's own center sits on the anchor.
            None => match content {
                WatermarkContent::Text {
                    text: wm_text,
                    color,
                    font_size,
                } => {
                    let tw = text_width(wm_text, *font_size, FontId::Bold);
                    children.push(text(
                        -tw / 2.0,
                        font_size * 0.35,
                        *font_size,
                        FontId::Bold,
                        Rgb::parse(color),
                        wm_text,
                    ));
                }
                WatermarkContent::Image { url } => {
                    children.push(Primitive::Image(ImagePrim {
                        x: -WATERMARK_IMAGE_BOX / 2.0,
                        y: -WATERMARK_IMAGE_BOX / 2.0,
                        w: WATERMARK_IMAGE_BOX,
                        h: WATERMARK_IMAGE_BOX,
                        source: url.clone(),
                        slot: ImageSlot::Watermark,
                    }));
                }
            },
        }
    }

    Some(GroupPrim {
        tx: layout.anchor.x / WATERMARK_VIEWPORT_WIDTH * width,
        ty: layout.anchor.y / WATERMARK_VIEWPORT_HEIGHT * height,
        rotation_deg: layout.rotation_deg as f64,
        scale: layout.scale,
        opacity: layout.opacity,
        children,
    })
}

// =============================================================================
// Primitive Helpers
// =============================================================================

fn text(x: f64, y: f64, size: f64, font: FontId, color: Rgb, content: &str) -> Primitive {
    Primitive::Text(TextPrim {
        x,
        y,
        size,
        font,
        color,
        content: content.to_string(),
    })
}

fn text_right(right: f64, y: f64, size: f64, font: FontId, color: Rgb, content: &str) -> Primitive {
    text(right - text_width(content, size, font), y, size, font, color, content)
}

fn text_centered(
    center: f64,
    y: f64,
    size: f64,
    font: FontId,
    color: Rgb,
    content: &str,
) -> Primitive {
    text(
        center - text_width(content, size, font) / 2.0,
        y,
        size,
        font,
        color,
        content,
    )
}

fn divider(x1: f64, y: f64, x2: f64, width: f64) -> Primitive {
    Primitive::Line(LinePrim {
        x1,
        y1: y,
        x2,
        y2: y,
        width,
        color: style::DIVIDER,
    })
}

/// Quantities display without a forced decimal tail ("2", "1.5").
fn format_quantity(item: &InvoiceItem) -> String {
    if item.quantity.fract() == 0.0 {
        format!("{}", item.quantity as i64)
    } else {
        format!("{}", item.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use facture_core::types::{ImageRef, VatRate};

    fn sample_invoice() -> Invoice {
        let mut invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        invoice.number = "2024-001".to_string();
        invoice.company.name = "Atlas Conseil".to_string();
        invoice.client.name = "Client SARL".to_string();
        invoice.items = vec![
            InvoiceItem {
                description: "Conseil".to_string(),
                quantity: 2.0,
                unit: "jour".to_string(),
                unit_price: 100.0,
                vat_rate: VatRate::STANDARD,
                discount: None,
            },
            InvoiceItem {
                description: "Livraison".to_string(),
                quantity: 1.0,
                unit: "unité".to_string(),
                unit_price: 50.0,
                vat_rate: VatRate::ZERO,
                discount: None,
            },
        ];
        invoice
    }

    fn all_text(tree: &DocumentTree) -> Vec<String> {
        fn walk(prims: &[Primitive], out: &mut Vec<String>) {
            for prim in prims {
                match prim {
                    Primitive::Text(t) => out.push(t.content.clone()),
                    Primitive::Group(g) => walk(&g.children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&tree.primitives, &mut out);
        out
    }

    #[test]
    fn test_render_is_deterministic() {
        let invoice = sample_invoice();
        let settings = InvoiceSettings::default();
        assert_eq!(render(&invoice, &settings), render(&invoice, &settings));
    }

    #[test]
    fn test_totals_embedded_from_calculator() {
        let tree = render(&sample_invoice(), &InvoiceSettings::default());
        let texts = all_text(&tree);
        // 2×100 @20% + 1×50 @0% ⇒ 250.00 / 40.00 / 290.00
        assert!(texts.contains(&"250.00 DH".to_string()));
        assert!(texts.contains(&"40.00 DH".to_string()));
        assert!(texts.contains(&"290.00 DH".to_string()));
    }

    #[test]
    fn test_default_title_and_dates() {
        let tree = render(&sample_invoice(), &InvoiceSettings::default());
        let texts = all_text(&tree);
        assert!(texts.contains(&"FACTURE".to_string()));
        assert!(texts.contains(&"N° 2024-001".to_string()));
        assert!(texts.contains(&"Date: 01/03/2024".to_string()));
        assert!(texts.contains(&"Échéance: 31/03/2024".to_string()));
    }

    #[test]
    fn test_empty_items_renders_placeholder() {
        let mut invoice = sample_invoice();
        invoice.items.clear();
        let texts = all_text(&render(&invoice, &InvoiceSettings::default()));
        assert!(texts.contains(&"Aucun article".to_string()));
    }

    #[test]
    fn test_item_rows_preserve_order() {
        let texts = all_text(&render(&sample_invoice(), &InvoiceSettings::default()));
        let conseil = texts.iter().position(|t| t == "Conseil").unwrap();
        let livraison = texts.iter().position(|t| t == "Livraison").unwrap();
        assert!(conseil < livraison);
    }

    #[test]
    fn test_footer_label_prefix_omitted_when_empty() {
        let mut invoice = sample_invoice();
        invoice.footer_fields = vec![
            facture_core::types::FooterField::with_id("1", "ICE", "12345"),
            facture_core::types::FooterField::with_id("2", "", "mention libre"),
        ];
        let texts = all_text(&render(&invoice, &InvoiceSettings::default()));
        assert!(texts.contains(&"ICE : 12345".to_string()));
        assert!(texts.contains(&"mention libre".to_string()));
    }

    #[test]
    fn test_signature_slot_only_when_present() {
        let settings = InvoiceSettings::default();
        let without = render(&sample_invoice(), &settings);
        assert!(without
            .image_refs()
            .iter()
            .all(|i| i.slot != ImageSlot::Signature));

        let mut invoice = sample_invoice();
        invoice.signature = Some(ImageRef::new("data:image/png;base64,AA"));
        let with = render(&invoice, &settings);
        let refs = with.image_refs();
        assert!(refs.iter().any(|i| i.slot == ImageSlot::Signature));
        // Right-aligned at the fixed max width.
        let sig = refs.iter().find(|i| i.slot == ImageSlot::Signature).unwrap();
        assert_eq!(sig.w, 200.0);
        assert_eq!(sig.x, 800.0 - 40.0 - 200.0);
    }

    #[test]
    fn test_watermark_group_is_topmost() {
        let mut settings = InvoiceSettings::default();
        settings.watermark.enabled = true;
        let tree = render(&sample_invoice(), &settings);
        assert!(matches!(
            tree.primitives.last(),
            Some(Primitive::Group(_))
        ));

        settings.watermark.enabled = false;
        let tree = render(&sample_invoice(), &settings);
        assert!(!matches!(tree.primitives.last(), Some(Primitive::Group(_))));
    }

    #[test]
    fn test_watermark_disabled_adds_nothing() {
        let invoice = sample_invoice();
        let mut with = InvoiceSettings::default();
        with.watermark.enabled = false;
        with.watermark.mosaic = true;
        let mut without = InvoiceSettings::default();
        without.watermark.enabled = false;

        assert_eq!(render(&invoice, &with), render(&invoice, &without));
    }

    #[test]
    fn test_mosaic_watermark_tile_children() {
        let mut settings = InvoiceSettings::default();
        settings.watermark.enabled = true;
        settings.watermark.mosaic = true;
        settings.watermark.tile_size = 50;

        let tree = render(&sample_invoice(), &settings);
        let Some(Primitive::Group(group)) = tree.primitives.last() else {
            panic!("expected watermark group last");
        };
        assert_eq!(group.children.len(), 100);
        assert_eq!(group.rotation_deg, -45.0);
        assert_eq!(group.opacity, 0.2);
    }

    #[test]
    fn test_border_rect_follows_settings() {
        let mut settings = InvoiceSettings::default();
        let tree = render(&sample_invoice(), &settings);
        assert!(matches!(tree.primitives.first(), Some(Primitive::Rect(r)) if r.stroke.is_some()));

        settings.appearance.border_width = 0;
        let tree = render(&sample_invoice(), &settings);
        assert!(!matches!(
            tree.primitives.first(),
            Some(Primitive::Rect(r)) if r.stroke.is_some()
        ));
    }
}
