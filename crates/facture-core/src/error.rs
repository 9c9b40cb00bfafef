//! # Error Types
//!
//! Domain-specific error types for facture-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  facture-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  facture-pdf errors (separate crate)                                   │
//! │  └── ExportError      - Document generation failures                   │
//! │                                                                         │
//! │  The calculator and the watermark engine are total over their          │
//! │  domains and define no errors at all; the renderer degrades            │
//! │  gracefully (an unresolvable image renders as an empty slot) and       │
//! │  never fails either. Only the exporter can fail.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a value collected by the form doesn't meet the data
/// model's invariants. Used for early validation before render/export runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value must be zero or greater.
    #[error("{field} must be non-negative, got {value}")]
    MustBeNonNegative { field: String, value: f64 },

    /// Numeric value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Duplicate value where uniqueness is required.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Collection has grown past its cap.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
