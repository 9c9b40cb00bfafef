//! The export pipeline: snapshot in, finished PDF out.
//!
//! ## Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Idle ──► Rendering ──► Capturing ──► Encoding ──► Done                 │
//! │                │            │             │                             │
//! │                └────────────┴─────────────┴──────► Failed               │
//! │                                                                         │
//! │  Rendering: build the primitive tree (pure, cannot fail)                │
//! │  Capturing: resolve every image slot under one bounded wait;            │
//! │             unresolved slots stay empty                                 │
//! │  Encoding:  paginate and emit the PDF byte stream                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice and settings are taken as read-only snapshots: a failed or
//! abandoned export leaves no trace on either.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use facture_core::types::{Invoice, InvoiceSettings};
use facture_render::render;

use crate::error::ExportError;
use crate::images::{decode_image, DecodedImage, ImageLoader};
use crate::writer::write_document;

/// Default bound on the whole image-capture phase.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(15);

// =============================================================================
// Phases & Options
// =============================================================================

/// Where an export currently stands; hosts drive their busy UI from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    Idle,
    Rendering,
    Capturing,
    Encoding,
    Done,
    Failed,
}

/// Export tuning knobs.
pub struct ExportOptions {
    /// Bound on the entire Capturing phase, all image loads included.
    pub image_timeout: Duration,
    /// Optional phase feed for progress UI.
    pub progress: Option<watch::Sender<ExportPhase>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            progress: None,
        }
    }
}

impl ExportOptions {
    fn set_phase(&self, phase: ExportPhase) {
        debug!(?phase, "export phase");
        if let Some(progress) = &self.progress {
            // A dropped receiver is fine; the export does not care.
            progress.send_replace(phase);
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    bytes: Vec<u8>,
    page_count: usize,
    filename: String,
}

impl ExportedPdf {
    /// The raw PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The download filename: `Invoice_{number}.pdf`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Writes the PDF into `dir` under [`Self::filename`] and returns the
    /// full path.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

fn download_filename(invoice: &Invoice) -> String {
    let number = if invoice.number.is_empty() {
        "draft"
    } else {
        invoice.number.as_str()
    };
    format!("Invoice_{}.pdf", number)
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the full export pipeline for one invoice snapshot.
#[instrument(skip_all, fields(invoice = %invoice.number))]
pub async fn export_invoice(
    invoice: &Invoice,
    settings: &InvoiceSettings,
    loader: &dyn ImageLoader,
    options: &ExportOptions,
) -> Result<ExportedPdf, ExportError> {
    let result = run_pipeline(invoice, settings, loader, options).await;
    match &result {
        Ok(pdf) => {
            options.set_phase(ExportPhase::Done);
            info!(
                pages = pdf.page_count,
                bytes = pdf.len(),
                filename = %pdf.filename,
                "export finished"
            );
        }
        Err(err) => {
            options.set_phase(ExportPhase::Failed);
            warn!(%err, "export failed");
        }
    }
    result
}

async fn run_pipeline(
    invoice: &Invoice,
    settings: &InvoiceSettings,
    loader: &dyn ImageLoader,
    options: &ExportOptions,
) -> Result<ExportedPdf, ExportError> {
    options.set_phase(ExportPhase::Rendering);
    let tree = render(invoice, settings);

    options.set_phase(ExportPhase::Capturing);
    let images = capture_images(&tree, loader, options).await?;

    options.set_phase(ExportPhase::Encoding);
    let (bytes, page_count) = write_document(&tree, invoice, &images)?;

    Ok(ExportedPdf {
        bytes,
        page_count,
        filename: download_filename(invoice),
    })
}

/// Resolves and decodes every distinct image reference in the tree.
///
/// The whole phase runs under one bounded wait: a single timeout covers
/// all loads together, so capture latency never exceeds `image_timeout`
/// no matter how many slots the document carries. The timeout elapsing is
/// the one condition that aborts the export; a load that settles with
/// nothing usable just leaves its slot empty.
async fn capture_images(
    tree: &facture_render::DocumentTree,
    loader: &dyn ImageLoader,
    options: &ExportOptions,
) -> Result<HashMap<String, DecodedImage>, ExportError> {
    let mut pending = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for image in tree.image_refs() {
        let source = image.source.as_str();
        if !source.is_empty() && seen.insert(source) {
            pending.push(image);
        }
    }

    let resolve_all = async {
        let mut resolved: HashMap<String, DecodedImage> = HashMap::new();
        for image in pending {
            match loader.load(&image.source).await.and_then(|bytes| decode_image(&bytes)) {
                Some(decoded) => {
                    debug!(slot = ?image.slot, width = decoded.width, height = decoded.height, "image captured");
                    resolved.insert(image.source.as_str().to_string(), decoded);
                }
                None => {
                    warn!(slot = ?image.slot, "image unresolved, slot left empty");
                }
            }
        }
        resolved
    };

    timeout(options.image_timeout, resolve_all)
        .await
        .map_err(|_| ExportError::CaptureTimeout {
            timeout_ms: options.image_timeout.as_millis() as u64,
        })
}
