//! # Domain Types
//!
//! Core domain types used throughout Facture.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │    Company      │   │     Client      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  number         │   │  name           │   │  name           │       │
//! │  │  issue/due date │   │  vat_number     │   │  billing addr   │       │
//! │  │  items[]        │   │  address        │   │  shipping addr? │       │
//! │  │  footer_fields[]│   │  logo?          │   │  client_number  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    VatRate      │   │  InvoiceStatus  │   │ InvoiceSettings │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Draft          │   │  template       │       │
//! │  │  closed set:    │   │  Sent           │   │  appearance     │       │
//! │  │  0/2.1/5.5/     │   │  Paid           │   │  watermark      │       │
//! │  │  10/20 %        │   │  Overdue        │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Contract
//! `Invoice` and `InvoiceSettings` are read-only snapshots for the core:
//! the calculator, renderer, and exporter never mutate them. Totals are
//! always recomputed from `items` and never stored, so they cannot go stale.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_TITLE;

// =============================================================================
// VAT Rate
// =============================================================================

/// The VAT rates an invoice line may carry, in basis points (bps).
///
/// The set is closed: 0%, 2.1%, 5.5%, 10%, 20%. Anything else is rejected
/// at construction, which keeps every downstream computation total.
pub const ALLOWED_VAT_RATES_BPS: [u32; 5] = [0, 210, 550, 1000, 2000];

/// Per-line VAT rate represented in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 550 bps = 5.5% — the fractional French rates (2.1%, 5.5%) stay exact.
///
/// On the wire (and in the UI) the rate travels as its percentage value,
/// matching the form's fixed dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VatRate(u32);

impl VatRate {
    /// 0% — exempt.
    pub const ZERO: VatRate = VatRate(0);
    /// 2.1% — super-reduced rate.
    pub const SUPER_REDUCED: VatRate = VatRate(210);
    /// 5.5% — reduced rate.
    pub const REDUCED: VatRate = VatRate(550);
    /// 10% — intermediate rate.
    pub const INTERMEDIATE: VatRate = VatRate(1000);
    /// 20% — standard rate.
    pub const STANDARD: VatRate = VatRate(2000);

    /// Creates a rate from basis points, rejecting values outside the
    /// closed set.
    pub fn try_from_bps(bps: u32) -> Result<Self, String> {
        if ALLOWED_VAT_RATES_BPS.contains(&bps) {
            Ok(VatRate(bps))
        } else {
            Err(format!("{} bps is not an allowed VAT rate", bps))
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Display label as shown in the items table ("20%", "5.5%", ...).
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "0%",
            210 => "2.1%",
            550 => "5.5%",
            1000 => "10%",
            _ => "20%",
        }
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::STANDARD
    }
}

impl TryFrom<f64> for VatRate {
    type Error = String;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        // Rates arrive as percentages; compare in bps to avoid float fuzz.
        let bps = (pct * 100.0).round() as i64;
        if bps < 0 || (pct * 100.0 - bps as f64).abs() > 1e-6 {
            return Err(format!("{} is not an allowed VAT rate", pct));
        }
        VatRate::try_from_bps(bps as u32).map_err(|_| format!("{} is not an allowed VAT rate", pct))
    }
}

impl From<VatRate> for f64 {
    fn from(rate: VatRate) -> f64 {
        rate.percentage()
    }
}

// =============================================================================
// Opaque Image References
// =============================================================================

/// An opaque reference to an encoded image (URL-like or embedded data).
///
/// The core never interprets the encoding; its only contract is
/// "resolve or treat as absent". Upload validation belongs to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wraps a raw reference string.
    pub fn new(reference: impl Into<String>) -> Self {
        ImageRef(reference.into())
    }

    /// The raw reference string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty reference resolves to nothing and draws nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(s.to_string())
    }
}

// =============================================================================
// Company
// =============================================================================

/// A postal address block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

/// Company contact details shown in the invoice header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyContact {
    pub phone: String,
    pub email: String,
    pub website: String,
}

/// Horizontal placement of the company logo in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LogoPosition {
    Left,
    Center,
    Right,
}

impl Default for LogoPosition {
    fn default() -> Self {
        LogoPosition::Left
    }
}

/// The company logo: a resolved image reference plus its header placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Logo {
    pub url: ImageRef,
    pub position: LogoPosition,
}

/// The issuing company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Company {
    pub name: String,
    pub vat_number: String,
    pub address: Address,
    pub contact: CompanyContact,
    pub logo: Option<Logo>,
}

// =============================================================================
// Client
// =============================================================================

/// Client-side contact person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// The invoiced client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub name: String,
    pub billing_address: Address,
    /// Optional distinct shipping address (same shape as billing).
    pub shipping_address: Option<Address>,
    pub contact: ClientContact,
    pub client_number: String,
}

// =============================================================================
// Invoice Items
// =============================================================================

/// How a line discount is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A line-level discount.
///
/// Recorded on the item but not consumed by the totals calculator; see
/// DESIGN.md for the decision behind keeping the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub value: f64,
}

/// One invoiced product or service row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceItem {
    pub description: String,
    /// Quantity, non-negative; fractional quantities (hours, kilos) allowed.
    pub quantity: f64,
    /// Free-text unit ("unité", "h", "kg", ...).
    pub unit: String,
    /// Unit price, non-negative, full precision.
    pub unit_price: f64,
    /// Per-line VAT rate from the closed set.
    #[ts(as = "f64")]
    pub vat_rate: VatRate,
    /// Present in the data model, ignored by the calculator.
    pub discount: Option<Discount>,
}

impl InvoiceItem {
    /// A fresh row as the "add item" affordance creates it.
    pub fn new() -> Self {
        InvoiceItem {
            description: String::new(),
            quantity: 1.0,
            unit: "unité".to_string(),
            unit_price: 0.0,
            vat_rate: VatRate::STANDARD,
            discount: None,
        }
    }
}

impl Default for InvoiceItem {
    fn default() -> Self {
        InvoiceItem::new()
    }
}

// =============================================================================
// Footer Fields
// =============================================================================

/// A free-form key/value display row in the invoice footer strip.
///
/// `id` is unique within one invoice (enforced by validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FooterField {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl FooterField {
    /// Creates a field with a fresh unique id.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FooterField {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.into(),
            value: value.into(),
        }
    }

    /// Creates a field with a caller-chosen id (used for the seeded defaults).
    pub fn with_id(
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        FooterField {
            id: id.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Invoice Status & Payment Terms
// =============================================================================

/// Lifecycle status of an invoice.
///
/// The core never transitions this; it belongs to the surrounding workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

/// Payment terms offered on the invoice.
///
/// Serialized with the wire values the form uses ("30", "45", "60",
/// "end-of-month").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentTerms {
    #[serde(rename = "30")]
    Net30,
    #[serde(rename = "45")]
    Net45,
    #[serde(rename = "60")]
    Net60,
    #[serde(rename = "end-of-month")]
    EndOfMonth,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::Net30
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The root aggregate: everything needed to render and export one invoice.
///
/// Created with defaults on app start, mutated by user edits in the UI,
/// never persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub number: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub payment_terms: PaymentTerms,
    /// Optional purchase-order reference (carried, not rendered).
    pub purchase_order: Option<String>,
    pub company: Company,
    pub client: Client,
    pub items: Vec<InvoiceItem>,
    pub status: InvoiceStatus,
    pub footer_fields: Vec<FooterField>,
    /// Document title; rendering falls back to "FACTURE" when unset or empty.
    pub title: Option<String>,
    /// Final signature image, as captured by the signature pad.
    pub signature: Option<ImageRef>,
}

impl Invoice {
    /// A blank draft as the app creates it on start: empty parties, due date
    /// 30 days after issue, and the customary seeded footer fields.
    pub fn draft(issue_date: NaiveDate) -> Self {
        Invoice {
            number: String::new(),
            issue_date,
            due_date: issue_date
                .checked_add_days(Days::new(30))
                .unwrap_or(issue_date),
            payment_terms: PaymentTerms::Net30,
            purchase_order: None,
            company: Company::default(),
            client: Client::default(),
            items: Vec::new(),
            status: InvoiceStatus::Draft,
            footer_fields: vec![
                FooterField::with_id("1", "Nom de l'entreprise", ""),
                FooterField::with_id("2", "Adresse", ""),
                FooterField::with_id("3", "PATENTE", ""),
                FooterField::with_id("4", "TEL", ""),
                FooterField::with_id("5", "ICE", ""),
            ],
            title: None,
            signature: None,
        }
    }

    /// The title to display: `title` when non-empty, else the fixed default.
    pub fn effective_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TITLE,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Accent color template selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TemplateSettings {
    pub selected_color: String,
    pub custom_color: Option<String>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        TemplateSettings {
            selected_color: "#1677ff".to_string(),
            custom_color: None,
        }
    }
}

/// Document border appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppearanceSettings {
    pub border_color: String,
    /// Border width in logical pixels; 0 disables the border.
    pub border_width: u32,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        AppearanceSettings {
            border_color: "#1677ff".to_string(),
            border_width: 4,
        }
    }
}

/// What the watermark draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkKind {
    Text,
    Image,
}

/// Where the watermark (or the mosaic grid as a whole) anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    BottomRight,
}

/// Watermark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WatermarkSettings {
    pub enabled: bool,
    /// Tile the content across a grid instead of a single placement.
    pub mosaic: bool,
    #[serde(rename = "type")]
    pub kind: WatermarkKind,
    pub text: String,
    pub image_url: ImageRef,
    /// Opacity in [0, 1].
    pub opacity: f64,
    /// Rotation in degrees; any integer, wraps visually.
    pub rotation: i32,
    /// Uniform scale factor, > 0.
    pub scale: f64,
    /// Mosaic cell size in logical pixels, >= 1.
    pub tile_size: u32,
    pub position: WatermarkPosition,
    pub text_color: String,
}

impl Default for WatermarkSettings {
    fn default() -> Self {
        WatermarkSettings {
            enabled: false,
            mosaic: false,
            kind: WatermarkKind::Text,
            text: "CONFIDENTIAL".to_string(),
            image_url: ImageRef::new(""),
            opacity: 0.2,
            rotation: -45,
            scale: 1.0,
            tile_size: 50,
            position: WatermarkPosition::Center,
            text_color: "#000000".to_string(),
        }
    }
}

/// Process-wide invoice settings, owned independently of any one invoice.
///
/// Loaded at startup with defaults and mutated via the settings drawer;
/// persistence is the storage collaborator's job, not the core's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSettings {
    pub template: TemplateSettings,
    pub appearance: AppearanceSettings,
    pub watermark: WatermarkSettings,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate_closed_set() {
        assert!(VatRate::try_from_bps(0).is_ok());
        assert!(VatRate::try_from_bps(210).is_ok());
        assert!(VatRate::try_from_bps(550).is_ok());
        assert!(VatRate::try_from_bps(1000).is_ok());
        assert!(VatRate::try_from_bps(2000).is_ok());

        assert!(VatRate::try_from_bps(825).is_err());
        assert!(VatRate::try_from_bps(1).is_err());
    }

    #[test]
    fn test_vat_rate_percentage_round_trip() {
        let rate = VatRate::try_from(5.5).unwrap();
        assert_eq!(rate, VatRate::REDUCED);
        assert!((rate.percentage() - 5.5).abs() < 1e-9);

        assert!(VatRate::try_from(19.6).is_err());
        assert!(VatRate::try_from(-1.0).is_err());
    }

    #[test]
    fn test_vat_rate_labels() {
        assert_eq!(VatRate::ZERO.label(), "0%");
        assert_eq!(VatRate::SUPER_REDUCED.label(), "2.1%");
        assert_eq!(VatRate::REDUCED.label(), "5.5%");
        assert_eq!(VatRate::INTERMEDIATE.label(), "10%");
        assert_eq!(VatRate::STANDARD.label(), "20%");
    }

    #[test]
    fn test_vat_rate_serde_as_percentage() {
        let json = serde_json::to_string(&VatRate::STANDARD).unwrap();
        assert_eq!(json, "20.0");

        let back: VatRate = serde_json::from_str("5.5").unwrap();
        assert_eq!(back, VatRate::REDUCED);

        assert!(serde_json::from_str::<VatRate>("7.0").is_err());
    }

    #[test]
    fn test_draft_invoice_defaults() {
        let issue = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let invoice = Invoice::draft(issue);

        assert_eq!(invoice.issue_date, issue);
        assert_eq!(
            invoice.due_date,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.payment_terms, PaymentTerms::Net30);
        assert_eq!(invoice.footer_fields.len(), 5);
        assert_eq!(invoice.footer_fields[2].label, "PATENTE");
        assert!(invoice.items.is_empty());
        assert!(invoice.signature.is_none());
    }

    #[test]
    fn test_effective_title_fallback() {
        let mut invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(invoice.effective_title(), "FACTURE");

        invoice.title = Some(String::new());
        assert_eq!(invoice.effective_title(), "FACTURE");

        invoice.title = Some("DEVIS".to_string());
        assert_eq!(invoice.effective_title(), "DEVIS");
    }

    #[test]
    fn test_default_settings_match_startup_values() {
        let settings = InvoiceSettings::default();
        assert_eq!(settings.template.selected_color, "#1677ff");
        assert_eq!(settings.appearance.border_width, 4);
        assert!(!settings.watermark.enabled);
        assert!(!settings.watermark.mosaic);
        assert_eq!(settings.watermark.kind, WatermarkKind::Text);
        assert_eq!(settings.watermark.text, "CONFIDENTIAL");
        assert_eq!(settings.watermark.rotation, -45);
        assert_eq!(settings.watermark.tile_size, 50);
        assert_eq!(settings.watermark.position, WatermarkPosition::Center);
    }

    #[test]
    fn test_payment_terms_wire_values() {
        assert_eq!(
            serde_json::to_string(&PaymentTerms::Net30).unwrap(),
            "\"30\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentTerms::EndOfMonth).unwrap(),
            "\"end-of-month\""
        );
        let back: PaymentTerms = serde_json::from_str("\"45\"").unwrap();
        assert_eq!(back, PaymentTerms::Net45);
    }

    #[test]
    fn test_footer_field_new_generates_unique_ids() {
        let a = FooterField::new("TEL", "0600000000");
        let b = FooterField::new("TEL", "0600000000");
        assert_ne!(a.id, b.id);
    }
}
