//! # Validation Module
//!
//! Input validation for invoice and settings snapshots.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form controls                                       │
//! │  ├── min=0 on numeric inputs, fixed VAT dropdown                       │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (on the snapshot handed to the core)            │
//! │  ├── Non-negative, finite numbers                                      │
//! │  ├── Closed VAT set, unique footer ids                                 │
//! │  └── Watermark ranges (opacity, scale, tile size)                      │
//! │                                                                         │
//! │  The calculator itself stays total: it is never asked to handle       │
//! │  malformed input, it is the caller's job to validate first.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{ValidationError, ValidationResult};
use crate::types::{FooterField, Invoice, InvoiceItem, InvoiceSettings, WatermarkSettings};
use crate::MAX_INVOICE_ITEMS;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be finite (NaN/infinity are rejected)
/// - Must be non-negative; zero is allowed
/// - Fractional values are allowed (hours, kilos)
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }
    if quantity < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
            value: quantity,
        });
    }
    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative; zero is allowed (free lines)
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "unit price".to_string(),
        });
    }
    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
            value: price,
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that footer field ids are unique within one invoice.
pub fn validate_footer_fields(fields: &[FooterField]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "footer field id".to_string(),
                value: field.id.clone(),
            });
        }
    }
    Ok(())
}

/// Validates one line item.
pub fn validate_item(item: &InvoiceItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    // vat_rate is a closed set by construction; nothing further to check.
    Ok(())
}

/// Validates a full invoice snapshot before render/export.
pub fn validate_invoice(invoice: &Invoice) -> ValidationResult<()> {
    if invoice.items.len() > MAX_INVOICE_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_INVOICE_ITEMS,
        });
    }
    for item in &invoice.items {
        validate_item(item)?;
    }
    validate_footer_fields(&invoice.footer_fields)
}

// =============================================================================
// Settings Validators
// =============================================================================

/// Validates watermark settings.
///
/// ## Rules
/// - opacity ∈ [0, 1]
/// - scale > 0 and finite
/// - tile size ≥ 1
/// - rotation is unbounded (display wraps)
pub fn validate_watermark(watermark: &WatermarkSettings) -> ValidationResult<()> {
    if !watermark.opacity.is_finite() || !(0.0..=1.0).contains(&watermark.opacity) {
        return Err(ValidationError::OutOfRange {
            field: "watermark opacity".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }
    if !watermark.scale.is_finite() || watermark.scale <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "watermark scale".to_string(),
            min: f64::EPSILON,
            max: f64::MAX,
        });
    }
    if watermark.tile_size == 0 {
        return Err(ValidationError::OutOfRange {
            field: "watermark tile size".to_string(),
            min: 1.0,
            max: u32::MAX as f64,
        });
    }
    Ok(())
}

/// Validates a full settings snapshot.
pub fn validate_settings(settings: &InvoiceSettings) -> ValidationResult<()> {
    validate_watermark(&settings.watermark)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0.0).is_ok());
        assert!(validate_quantity(1.5).is_ok());
        assert!(validate_quantity(999.0).is_ok());

        assert!(validate_quantity(-1.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(validate_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(10.99).is_ok());

        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_footer_fields_rejects_duplicate_ids() {
        let unique = vec![
            FooterField::with_id("1", "TEL", ""),
            FooterField::with_id("2", "ICE", ""),
        ];
        assert!(validate_footer_fields(&unique).is_ok());

        let duplicated = vec![
            FooterField::with_id("1", "TEL", ""),
            FooterField::with_id("1", "ICE", ""),
        ];
        assert!(validate_footer_fields(&duplicated).is_err());
    }

    #[test]
    fn test_validate_invoice() {
        let issue = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut invoice = Invoice::draft(issue);
        assert!(validate_invoice(&invoice).is_ok());

        invoice.items.push(InvoiceItem {
            quantity: -3.0,
            ..InvoiceItem::new()
        });
        assert!(validate_invoice(&invoice).is_err());
    }

    #[test]
    fn test_validate_watermark_ranges() {
        let mut watermark = WatermarkSettings::default();
        assert!(validate_watermark(&watermark).is_ok());

        watermark.opacity = 1.2;
        assert!(validate_watermark(&watermark).is_err());
        watermark.opacity = 0.5;

        watermark.scale = 0.0;
        assert!(validate_watermark(&watermark).is_err());
        watermark.scale = 2.0;

        watermark.tile_size = 0;
        assert!(validate_watermark(&watermark).is_err());
        watermark.tile_size = 50;

        watermark.rotation = -3600;
        assert!(validate_watermark(&watermark).is_ok());
    }
}
