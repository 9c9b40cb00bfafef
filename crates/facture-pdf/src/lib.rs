//! # facture-pdf: Invoice PDF Exporter
//!
//! The workspace's only I/O crate. Takes the renderer's primitive tree,
//! resolves image slots through a pluggable async loader, and emits a
//! multi-page A4 PDF.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  facture-core ──► facture-render ──► ★ facture-pdf (THIS CRATE) ★      │
//! │                                                                         │
//! │  export_invoice(invoice, settings, loader, options)                     │
//! │      │                                                                  │
//! │      ├─ Rendering  (facture_render::render, pure)                       │
//! │      ├─ Capturing  (ImageLoader, per-image timeout)                     │
//! │      └─ Encoding   (lopdf: A4 pages, fonts, images, watermark)          │
//! │                                                                         │
//! │  ──► ExportedPdf { bytes, page_count, filename }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```no_run
//! use chrono::NaiveDate;
//! use facture_core::types::{Invoice, InvoiceSettings};
//! use facture_pdf::{export_invoice, DataUrlLoader, ExportOptions};
//!
//! # async fn demo() -> Result<(), facture_pdf::ExportError> {
//! let invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
//! let settings = InvoiceSettings::default();
//!
//! let pdf = export_invoice(&invoice, &settings, &DataUrlLoader, &ExportOptions::default()).await?;
//! pdf.save_to(std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod images;
pub mod paginate;
pub mod writer;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ExportError;
pub use export::{
    export_invoice, ExportOptions, ExportPhase, ExportedPdf, DEFAULT_IMAGE_TIMEOUT,
};
pub use images::{BoxFuture, DataUrlLoader, ImageLoader};
