//! Image capture: resolving slot references into embeddable PDF images.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ImageRef ──► ImageLoader (async, host-pluggable) ──► encoded bytes     │
//! │                                                          │              │
//! │                              ┌───────────────────────────┴──────┐       │
//! │                              ▼                                  ▼       │
//! │                      JPEG (sniffed)                     everything else │
//! │                      DCTDecode passthrough:             decode pixels,  │
//! │                      bytes embedded as-is               RGB + SMask as  │
//! │                      (header read for dims)             Flate streams   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failure policy: a reference that cannot be resolved or decoded yields
//! `None` and its slot stays empty. The exporter logs and moves on.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::warn;

use facture_core::types::ImageRef;

use crate::error::ExportError;

/// Boxed future alias for the loader trait's return type.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// =============================================================================
// Loader
// =============================================================================

/// Resolves an [`ImageRef`] to its encoded bytes.
///
/// Implementations may hit the network, a cache, or nothing at all; the
/// exporter bounds the whole capture phase with its timeout. `None` means
/// "treat as absent" — the slot renders empty.
pub trait ImageLoader: Send + Sync {
    fn load<'a>(&'a self, reference: &'a ImageRef) -> BoxFuture<'a, Option<Vec<u8>>>;
}

/// Loader for `data:` URLs, the form the app's upload and signature pads
/// produce. Anything that is not a base64 data URL resolves to `None`.
#[derive(Debug, Default)]
pub struct DataUrlLoader;

impl DataUrlLoader {
    fn decode(reference: &ImageRef) -> Option<Vec<u8>> {
        let rest = reference.as_str().strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        if !meta.ends_with(";base64") {
            return None;
        }
        match BASE64.decode(payload.trim()) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(%err, "malformed base64 payload in data URL");
                None
            }
        }
    }
}

impl ImageLoader for DataUrlLoader {
    fn load<'a>(&'a self, reference: &'a ImageRef) -> BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move { Self::decode(reference) })
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// An image decoded far enough to embed.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub kind: DecodedKind,
}

#[derive(Debug, Clone)]
pub enum DecodedKind {
    /// Original JPEG bytes, embedded verbatim under `DCTDecode`.
    Jpeg {
        data: Vec<u8>,
        color_space: &'static str,
    },
    /// Decoded pixels: an RGB plane plus an optional alpha plane that
    /// becomes a `SMask` (the signature pad draws on transparency).
    Raw {
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

/// Decodes encoded image bytes, or `None` when they are unusable.
pub fn decode_image(bytes: &[u8]) -> Option<DecodedImage> {
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return decode_jpeg(bytes);
    }
    decode_pixels(bytes)
}

/// JPEGs keep their compressed bytes; only the header is read, for
/// dimensions and the colorspace the PDF dictionary must declare.
fn decode_jpeg(bytes: &[u8]) -> Option<DecodedImage> {
    use jpeg_decoder::PixelFormat;

    let mut decoder = jpeg_decoder::Decoder::new(std::io::Cursor::new(bytes));
    if let Err(err) = decoder.read_info() {
        warn!(%err, "unreadable JPEG header, leaving slot empty");
        return None;
    }
    let info = decoder.info()?;
    let color_space = match info.pixel_format {
        PixelFormat::L8 | PixelFormat::L16 => "DeviceGray",
        PixelFormat::RGB24 => "DeviceRGB",
        PixelFormat::CMYK32 => "DeviceCMYK",
    };
    Some(DecodedImage {
        width: info.width as u32,
        height: info.height as u32,
        kind: DecodedKind::Jpeg {
            data: bytes.to_vec(),
            color_space,
        },
    })
}

fn decode_pixels(bytes: &[u8]) -> Option<DecodedImage> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(err) => {
            warn!(%err, "undecodable image bytes, leaving slot empty");
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    let mut translucent = false;
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
        translucent |= pixel.0[3] != u8::MAX;
    }

    Some(DecodedImage {
        width,
        height,
        kind: DecodedKind::Raw {
            rgb,
            alpha: translucent.then_some(alpha),
        },
    })
}

// =============================================================================
// Embedding
// =============================================================================

fn zlib(data: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Adds the decoded image to the document as an image XObject and returns
/// its object id.
pub fn add_xobject(doc: &mut Document, image: &DecodedImage) -> Result<ObjectId, ExportError> {
    let id = match &image.kind {
        DecodedKind::Jpeg { data, color_space } => doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => *color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            data.clone(),
        )),
        DecodedKind::Raw { rgb, alpha } => {
            let smask = match alpha {
                Some(alpha) => {
                    let mask_id = doc.add_object(Stream::new(
                        dictionary! {
                            "Type" => "XObject",
                            "Subtype" => "Image",
                            "Width" => image.width as i64,
                            "Height" => image.height as i64,
                            "ColorSpace" => "DeviceGray",
                            "BitsPerComponent" => 8,
                            "Filter" => "FlateDecode",
                        },
                        zlib(alpha)?,
                    ));
                    Some(mask_id)
                }
                None => None,
            };

            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            };
            if let Some(mask_id) = smask {
                dict.set("SMask", Object::Reference(mask_id));
            }
            doc.add_object(Stream::new(dict, zlib(rgb)?))
        }
    };
    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
