//! # Totals Module
//!
//! Derived-total calculation over invoice line items.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Totals Flow                                    │
//! │                                                                         │
//! │  InvoiceItem.quantity × unit_price ──► line_amount                     │
//! │                                          │                              │
//! │           Σ line_amount ──► subtotal ────┤                              │
//! │  Σ line_amount × rate ──► tax ───────────┼──► Totals { sub, tax, tot } │
//! │           subtotal + tax ──► total ──────┘                              │
//! │                                                                         │
//! │  Shown in the live preview AND embedded in the exported document —     │
//! │  both read the same functions, so they can never disagree.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total over its domain: an empty item list yields
//! zero everywhere, and there are no error conditions. Malformed numeric
//! input (negative, NaN) is a caller-validation concern — see [`crate::validation`].
//!
//! Amounts are computed at full `f64` precision with no intermediate
//! rounding; the 2-decimal rounding in [`format_amount`] is presentation only.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InvoiceItem;
use crate::CURRENCY_SUFFIX;

// =============================================================================
// Line & Aggregate Calculations
// =============================================================================

/// Amount for one line: `quantity × unit_price`.
///
/// The optional `discount` field on the item does not enter the amount.
#[inline]
pub fn line_amount(item: &InvoiceItem) -> f64 {
    item.quantity * item.unit_price
}

/// Sum of all line amounts, before tax.
pub fn subtotal(items: &[InvoiceItem]) -> f64 {
    items.iter().map(line_amount).sum()
}

/// Total VAT: each line taxed at its own rate (mixed rates supported).
pub fn tax(items: &[InvoiceItem]) -> f64 {
    items
        .iter()
        .map(|item| line_amount(item) * (item.vat_rate.percentage() / 100.0))
        .sum()
}

/// Grand total: `subtotal + tax`.
pub fn total(items: &[InvoiceItem]) -> f64 {
    subtotal(items) + tax(items)
}

// =============================================================================
// Totals Aggregate
// =============================================================================

/// The three derived totals, computed together.
///
/// Never stored on the invoice — recomputed from `items` on demand, so a
/// stale-total bug cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    /// Computes all three totals over the given items.
    pub fn of(items: &[InvoiceItem]) -> Self {
        let subtotal = subtotal(items);
        let tax = tax(items);
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount for display: two decimals plus the currency suffix.
///
/// ## Example
/// ```rust
/// use facture_core::totals::format_amount;
///
/// assert_eq!(format_amount(240.0), "240.00 DH");
/// assert_eq!(format_amount(1234.5), "1234.50 DH");
/// ```
pub fn format_amount(amount: f64) -> String {
    format!("{:.2} {}", amount, CURRENCY_SUFFIX)
}

// =============================================================================
// Unit Tests
// =============================================================================
