//! # Watermark Layout Engine
//!
//! Computes watermark placement and tiling geometry from settings.
//!
//! ## Why One Engine?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Watermark Geometry Flow                              │
//! │                                                                         │
//! │  WatermarkSettings ──► layout() ──► WatermarkLayout                    │
//! │                                        │                                │
//! │                          ┌─────────────┴─────────────┐                 │
//! │                          ▼                           ▼                 │
//! │                   Live-edit preview           Export renderer           │
//! │                                                                         │
//! │  Both surfaces consume the SAME geometry, so visual parity holds by    │
//! │  construction instead of by keeping two implementations in sync.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The geometry is computed over a fixed 500×500 logical viewport and is
//! fully deterministic for identical settings — a hard requirement for
//! reproducible rendering and for the tests below.

use serde::{Deserialize, Serialize};

use crate::types::{ImageRef, WatermarkKind, WatermarkPosition, WatermarkSettings};
use crate::{WATERMARK_VIEWPORT_HEIGHT, WATERMARK_VIEWPORT_WIDTH};

/// Fixed font size of a single (non-mosaic) text watermark.
pub const SINGLE_TEXT_FONT_SIZE: f64 = 48.0;

// =============================================================================
// Output Model
// =============================================================================

/// A point in viewport coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// What a placement draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WatermarkContent {
    /// Bold text in the configured color at the given font size.
    Text {
        text: String,
        color: String,
        font_size: f64,
    },
    /// An image, fit-contained within its slot.
    Image { url: ImageRef },
}

/// One placed instance of the watermark content.
///
/// `offset` is relative to the layout anchor; the instance's own center
/// lands on `anchor + offset`. `size` is the tile slot in mosaic mode and
/// `None` for the single placement (intrinsic size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatermarkPlacement {
    pub offset: Point,
    pub size: Option<(f64, f64)>,
}

/// The complete watermark geometry for one settings snapshot.
///
/// The transform applies to all placements as a unit (single element or
/// whole mosaic grid): translate to `anchor`, then rotate by
/// `rotation_deg`, then scale by `scale` — the translation is computed
/// before rotation/scale, matching CSS transform composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkLayout {
    pub anchor: Point,
    pub rotation_deg: i32,
    pub scale: f64,
    pub opacity: f64,
    /// `None` when nothing is drawable (disabled, or image kind with an
    /// empty reference).
    pub content: Option<WatermarkContent>,
    pub placements: Vec<WatermarkPlacement>,
}

impl WatermarkLayout {
    fn empty() -> Self {
        WatermarkLayout {
            anchor: Point { x: 0.0, y: 0.0 },
            rotation_deg: 0,
            scale: 1.0,
            opacity: 0.0,
            content: None,
            placements: Vec::new(),
        }
    }
}

// =============================================================================
// Layout Computation
// =============================================================================

/// Computes the placement list for the given watermark settings.
///
/// - Disabled ⇒ empty placements, regardless of every other field.
/// - Single mode ⇒ one placement centered on the anchor.
/// - Mosaic mode ⇒ `ceil(500/tile)` columns × `ceil(500/tile)` rows of
///   identical tiles, offsets relative to the grid center; the shared
///   transform applies to the grid as a unit, not per tile.
pub fn layout(settings: &WatermarkSettings) -> WatermarkLayout {
    if !settings.enabled {
        return WatermarkLayout::empty();
    }

    let Some(content) = resolve_content(settings) else {
        // Image kind with an empty reference: a placement would have no
        // drawable body, so nothing is placed at all.
        return WatermarkLayout::empty();
    };

    let placements = if settings.mosaic {
        mosaic_placements(settings.tile_size)
    } else {
        vec![WatermarkPlacement {
            offset: Point { x: 0.0, y: 0.0 },
            size: None,
        }]
    };

    WatermarkLayout {
        anchor: anchor_point(settings.position),
        rotation_deg: settings.rotation,
        scale: settings.scale,
        opacity: settings.opacity,
        content: Some(content),
        placements,
    }
}

/// Anchor point for a position, in viewport coordinates.
///
/// Corner positions sit at a 10% inset from their two edges; `center` is
/// the exact viewport center. The element's own center is translated onto
/// the anchor.
pub fn anchor_point(position: WatermarkPosition) -> Point {
    let w = WATERMARK_VIEWPORT_WIDTH;
    let h = WATERMARK_VIEWPORT_HEIGHT;
    match position {
        WatermarkPosition::TopLeft => Point { x: 0.1 * w, y: 0.1 * h },
        WatermarkPosition::TopRight => Point { x: 0.9 * w, y: 0.1 * h },
        WatermarkPosition::Center => Point { x: 0.5 * w, y: 0.5 * h },
        WatermarkPosition::BottomLeft => Point { x: 0.1 * w, y: 0.9 * h },
        WatermarkPosition::BottomRight => Point { x: 0.9 * w, y: 0.9 * h },
    }
}

fn resolve_content(settings: &WatermarkSettings) -> Option<WatermarkContent> {
    match settings.kind {
        WatermarkKind::Text => {
            let font_size = if settings.mosaic {
                settings.tile_size as f64 / 4.0
            } else {
                SINGLE_TEXT_FONT_SIZE
            };
            Some(WatermarkContent::Text {
                text: settings.text.clone(),
                color: settings.text_color.clone(),
                font_size,
            })
        }
        WatermarkKind::Image => {
            if settings.image_url.is_empty() {
                None
            } else {
                Some(WatermarkContent::Image {
                    url: settings.image_url.clone(),
                })
            }
        }
    }
}

fn mosaic_placements(tile_size: u32) -> Vec<WatermarkPlacement> {
    let tile = tile_size.max(1) as f64;
    let w = WATERMARK_VIEWPORT_WIDTH;
    let h = WATERMARK_VIEWPORT_HEIGHT;
    let cols = (w / tile).ceil() as usize;
    let rows = (h / tile).ceil() as usize;

    let mut placements = Vec::with_capacity(cols * rows);
    for i in 0..cols * rows {
        // Row-major cell offsets relative to the grid (viewport) center.
        let x = (i % cols) as f64 * tile - w / 2.0;
        let y = (i / cols) as f64 * tile - h / 2.0;
        placements.push(WatermarkPlacement {
            offset: Point { x, y },
            size: Some((tile, tile)),
        });
    }
    placements
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_text_settings() -> WatermarkSettings {
        WatermarkSettings {
            enabled: true,
            ..WatermarkSettings::default()
        }
    }

    #[test]
    fn test_disabled_yields_empty_placements() {
        let mut settings = enabled_text_settings();
        settings.enabled = false;
        settings.mosaic = true;
        settings.rotation = 270;
        settings.scale = 3.0;

        let layout = layout(&settings);
        assert!(layout.placements.is_empty());
        assert!(layout.content.is_none());
    }

    #[test]
    fn test_single_mode_is_one_placement() {
        let layout = layout(&enabled_text_settings());
        assert_eq!(layout.placements.len(), 1);
        assert_eq!(layout.placements[0].offset, Point { x: 0.0, y: 0.0 });
        assert_eq!(layout.placements[0].size, None);
    }

    #[test]
    fn test_center_anchor_is_exact_viewport_center() {
        for (rotation, scale) in [(0, 1.0), (-45, 1.0), (720, 4.5), (13, 0.1)] {
            let mut settings = enabled_text_settings();
            settings.position = WatermarkPosition::Center;
            settings.rotation = rotation;
            settings.scale = scale;

            let layout = layout(&settings);
            assert_eq!(layout.anchor, Point { x: 250.0, y: 250.0 });
        }
    }

    #[test]
    fn test_corner_anchors_inset_ten_percent() {
        assert_eq!(
            anchor_point(WatermarkPosition::TopLeft),
            Point { x: 50.0, y: 50.0 }
        );
        assert_eq!(
            anchor_point(WatermarkPosition::TopRight),
            Point { x: 450.0, y: 50.0 }
        );
        assert_eq!(
            anchor_point(WatermarkPosition::BottomLeft),
            Point { x: 50.0, y: 450.0 }
        );
        assert_eq!(
            anchor_point(WatermarkPosition::BottomRight),
            Point { x: 450.0, y: 450.0 }
        );
    }

    #[test]
    fn test_mosaic_tile_count() {
        // ceil(500/50)² = 100
        let mut settings = enabled_text_settings();
        settings.mosaic = true;
        settings.tile_size = 50;
        assert_eq!(layout(&settings).placements.len(), 100);

        // ceil(500/80) = 7 ⇒ 49
        settings.tile_size = 80;
        assert_eq!(layout(&settings).placements.len(), 49);
    }

    #[test]
    fn test_mosaic_offsets_are_row_major_from_center() {
        let mut settings = enabled_text_settings();
        settings.mosaic = true;
        settings.tile_size = 250;

        let layout = layout(&settings);
        assert_eq!(layout.placements.len(), 4);
        assert_eq!(layout.placements[0].offset, Point { x: -250.0, y: -250.0 });
        assert_eq!(layout.placements[1].offset, Point { x: 0.0, y: -250.0 });
        assert_eq!(layout.placements[2].offset, Point { x: -250.0, y: 0.0 });
        assert_eq!(layout.placements[3].offset, Point { x: 0.0, y: 0.0 });
        assert!(layout
            .placements
            .iter()
            .all(|p| p.size == Some((250.0, 250.0))));
    }

    #[test]
    fn test_mosaic_text_scales_with_tile_size() {
        let mut settings = enabled_text_settings();
        settings.mosaic = true;
        settings.tile_size = 80;

        match layout(&settings).content {
            Some(WatermarkContent::Text { font_size, .. }) => assert_eq!(font_size, 20.0),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_image_kind_with_empty_url_draws_nothing() {
        let mut settings = enabled_text_settings();
        settings.kind = WatermarkKind::Image;
        settings.image_url = ImageRef::new("");
        settings.mosaic = true;

        let layout = layout(&settings);
        assert!(layout.content.is_none());
        assert!(layout.placements.is_empty());
    }

    #[test]
    fn test_image_kind_with_url_resolves() {
        let mut settings = enabled_text_settings();
        settings.kind = WatermarkKind::Image;
        settings.image_url = ImageRef::new("data:image/png;base64,AAAA");

        let layout = layout(&settings);
        assert!(matches!(
            layout.content,
            Some(WatermarkContent::Image { .. })
        ));
        assert_eq!(layout.placements.len(), 1);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut settings = enabled_text_settings();
        settings.mosaic = true;
        settings.tile_size = 64;
        settings.rotation = 30;
        settings.scale = 1.5;
        settings.position = WatermarkPosition::BottomRight;

        assert_eq!(layout(&settings), layout(&settings));
    }
}
