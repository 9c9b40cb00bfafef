//! The visual primitive tree the renderer produces.
//!
//! ## Coordinate System
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (0,0) ──────► x                                                        │
//! │    │                                                                    │
//! │    ▼  y grows downward (top-down flow, like the on-screen preview)     │
//! │                                                                         │
//! │  Fixed logical width 800; height grows with content (continuous       │
//! │  flow). facture-pdf owns the flip to PDF's bottom-up coordinates and   │
//! │  the slicing into A4-proportioned pages.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Z-order is vector order: later primitives draw above earlier ones. The
//! watermark is always the last (top-most) entry, as a single [`Group`]
//! carrying the engine's transform.

use serde::{Deserialize, Serialize};

use facture_core::types::ImageRef;

use crate::style::{FontId, Rgb};

// =============================================================================
// Primitives
// =============================================================================

/// Which document slot an image belongs to; the exporter resolves and
/// caches image bytes per slot reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Logo,
    Watermark,
    Signature,
}

/// A run of text. `x`/`y` locate the baseline start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrim {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub font: FontId,
    pub color: Rgb,
    pub content: String,
}

/// A straight stroked line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrim {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub color: Rgb,
}

/// An axis-aligned rectangle, optionally stroked and/or filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrim {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub stroke: Option<(f64, Rgb)>,
    pub fill: Option<Rgb>,
}

/// An image slot box. The exporter fit-contains the decoded image within
/// it; an unresolvable reference leaves the slot empty (graceful
/// degradation, never an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrim {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub source: ImageRef,
    pub slot: ImageSlot,
}

/// A transformed, translucent subtree. Children are expressed relative to
/// the group origin; the transform applies translate → rotate → scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPrim {
    pub tx: f64,
    pub ty: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    /// Constant alpha in [0, 1] applied to the whole subtree.
    pub opacity: f64,
    pub children: Vec<Primitive>,
}

/// One drawable node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Text(TextPrim),
    Line(LinePrim),
    Rect(RectPrim),
    Image(ImagePrim),
    Group(GroupPrim),
}

// =============================================================================
// Document Tree
// =============================================================================

/// The complete rendered document: an immutable, z-ordered primitive list
/// at a fixed logical width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl DocumentTree {
    /// All image references in the tree (groups included), in draw order.
    /// The exporter resolves this set before capture.
    pub fn image_refs(&self) -> Vec<&ImagePrim> {
        fn walk<'a>(prims: &'a [Primitive], out: &mut Vec<&'a ImagePrim>) {
            for prim in prims {
                match prim {
                    Primitive::Image(image) => out.push(image),
                    Primitive::Group(group) => walk(&group.children, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.primitives, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_refs_walks_groups() {
        let image = |slot| {
            Primitive::Image(ImagePrim {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 10.0,
                source: ImageRef::new("data:image/png;base64,AA"),
                slot,
            })
        };
        let tree = DocumentTree {
            width: 800.0,
            height: 600.0,
            primitives: vec![
                image(ImageSlot::Logo),
                Primitive::Group(GroupPrim {
                    tx: 0.0,
                    ty: 0.0,
                    rotation_deg: 0.0,
                    scale: 1.0,
                    opacity: 0.5,
                    children: vec![image(ImageSlot::Watermark)],
                }),
            ],
        };
        let refs = tree.image_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].slot, ImageSlot::Logo);
        assert_eq!(refs[1].slot, ImageSlot::Watermark);
    }

    #[test]
    fn test_tree_round_trips_through_json() {
        let tree = DocumentTree {
            width: 800.0,
            height: 600.0,
            primitives: vec![Primitive::Text(TextPrim {
                x: 40.0,
                y: 64.0,
                size: 16.0,
                font: FontId::Bold,
                color: Rgb::BLACK,
                content: "FACTURE".to_string(),
            })],
        };
        let json = serde_json::to_string(&tree).unwrap();
        let back: DocumentTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
