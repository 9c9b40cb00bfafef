//! Slicing the continuous document flow into A4 pages.
//!
//! The renderer produces one continuous tree at a fixed logical width; the
//! exporter maps that width onto the A4 page width and cuts the flow into
//! page-height slices:
//!
//! ```text
//! logical flow (800 wide)          A4 pages (595 × 842 pt)
//! ┌──────────┐  y = 0              ┌──────────┐
//! │ page 1   │                     │  page 1  │  Page 1 of 3
//! ├──────────┤  y = page_h         ├──────────┤
//! │ page 2   │                     │  page 2  │  Page 2 of 3
//! ├──────────┤  y = 2·page_h       ├──────────┤
//! │ page 3   │ (partially filled)  │  page 3  │  Page 3 of 3
//! └──────────┘                     └──────────┘
//! ```

/// A4 portrait, in PDF points.
pub const A4_WIDTH_PT: f64 = 595.0;
pub const A4_HEIGHT_PT: f64 = 842.0;

/// One logical page's height for a given logical width, preserving the A4
/// aspect ratio.
pub fn logical_page_height(logical_width: f64) -> f64 {
    logical_width * A4_HEIGHT_PT / A4_WIDTH_PT
}

/// Number of pages needed for a document of the given logical height.
/// Always at least one, even for an empty document.
pub fn page_count(logical_height: f64, page_height: f64) -> usize {
    if logical_height <= 0.0 || page_height <= 0.0 {
        return 1;
    }
    (logical_height / page_height).ceil().max(1.0) as usize
}

/// The per-page footer stamp, 1-based.
pub fn page_stamp(page: usize, total: usize) -> String {
    format!("Page {} of {}", page, total)
}
