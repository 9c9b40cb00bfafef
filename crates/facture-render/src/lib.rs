//! # facture-render: Deterministic Document Renderer
//!
//! Turns an `Invoice` + `InvoiceSettings` snapshot into a typed tree of
//! visual primitives at a fixed logical width of 800.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   facture-core ──► ★ facture-render (THIS CRATE) ★ ──► facture-pdf     │
//! │                                                                         │
//! │   Invoice ─┐                                                            │
//! │            ├──► render() ──► DocumentTree ──► preview / PDF export     │
//! │   Settings ┘                                                            │
//! │                                                                         │
//! │   NO I/O • NO IMAGE BYTES • images are named SLOTS, resolved later     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is total and deterministic: the same snapshot always yields a
//! structurally identical tree, and nothing in here can fail. Image
//! references are carried as slots for the exporter to resolve; a
//! reference that later turns out to be unresolvable just leaves its slot
//! empty.

pub mod renderer;
pub mod style;
pub mod tree;

pub use renderer::render;
pub use style::{FontId, Rgb};
pub use tree::{DocumentTree, GroupPrim, ImagePrim, ImageSlot, LinePrim, Primitive, RectPrim, TextPrim};
