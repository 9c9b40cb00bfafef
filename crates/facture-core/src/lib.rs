//! # facture-core: Pure Business Logic for Facture
//!
//! This crate is the **heart** of Facture. It contains all invoice business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser)                           │   │
//! │  │    Invoice form ──► Settings drawer ──► Preview ──► Export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Invoice + InvoiceSettings snapshots    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  totals   │  │ watermark │  │ validation│  │   │
//! │  │   │  Invoice  │  │  subtotal │  │  anchors  │  │   rules   │  │   │
//! │  │   │  Settings │  │  tax/total│  │  mosaic   │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO IMAGE DECODING • NO PDF • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          facture-render ──► facture-pdf (exporter)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, Company, Client, InvoiceSettings, ...)
//! - [`totals`] - Derived totals (subtotal, tax, total) over line items
//! - [`watermark`] - Watermark placement/tiling geometry
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and image decoding are FORBIDDEN here
//! 3. **Total Calculator**: totals never fail; malformed input is rejected by
//!    validation before it reaches the math
//! 4. **Read-Only Inputs**: Invoice and Settings are never mutated by the core
//!
//! ## Example Usage
//!
//! ```rust
//! use facture_core::totals::Totals;
//! use facture_core::types::{InvoiceItem, VatRate};
//!
//! let mut item = InvoiceItem::new();
//! item.quantity = 2.0;
//! item.unit_price = 100.0;
//! item.vat_rate = VatRate::STANDARD; // 20%
//!
//! let totals = Totals::of(&[item]);
//! assert_eq!(totals.subtotal, 200.0);
//! assert_eq!(totals.tax, 40.0);
//! assert_eq!(totals.total, 240.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod totals;
pub mod types;
pub mod validation;
pub mod watermark;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use facture_core::Invoice` instead of
// `use facture_core::types::Invoice`

pub use error::{ValidationError, ValidationResult};
pub use totals::Totals;
pub use types::*;
pub use watermark::WatermarkLayout;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed logical viewport the watermark engine computes against.
///
/// Both the live preview overlay and the export renderer consume geometry
/// expressed in this viewport, which is what guarantees visual parity.
pub const WATERMARK_VIEWPORT_WIDTH: f64 = 500.0;
/// See [`WATERMARK_VIEWPORT_WIDTH`].
pub const WATERMARK_VIEWPORT_HEIGHT: f64 = 500.0;

/// Fixed logical width the document is materialized at for export, so the
/// output is independent of the live viewport's size.
pub const EXPORT_RENDER_WIDTH: f64 = 800.0;

/// Default document title when `Invoice.title` is unset or empty.
pub const DEFAULT_TITLE: &str = "FACTURE";

/// Fixed currency suffix used by display formatting.
pub const CURRENCY_SUFFIX: &str = "DH";

/// Maximum items allowed on a single invoice.
///
/// ## Business Reason
/// Prevents runaway documents; the continuous-flow layout still paginates,
/// but a bound keeps one export's memory predictable.
pub const MAX_INVOICE_ITEMS: usize = 100;
