//! End-to-end export pipeline tests.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::NaiveDate;
use tokio::sync::watch;

use facture_core::types::{
    ImageRef, Invoice, InvoiceItem, InvoiceSettings, Logo, LogoPosition, VatRate,
};
use facture_pdf::{
    export_invoice, BoxFuture, DataUrlLoader, ExportError, ExportOptions, ExportPhase, ImageLoader,
};

// 1×1 opaque red PNG.
const RED_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0xB0, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn sample_invoice() -> Invoice {
    let mut invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    invoice.number = "2024-042".to_string();
    invoice.company.name = "Atlas Conseil".to_string();
    invoice.client.name = "Client SARL".to_string();
    invoice.items = vec![InvoiceItem {
        description: "Prestation".to_string(),
        quantity: 2.0,
        unit: "jour".to_string(),
        unit_price: 500.0,
        vat_rate: VatRate::STANDARD,
        discount: None,
    }];
    invoice
}

fn png_data_url() -> ImageRef {
    ImageRef::new(format!("data:image/png;base64,{}", BASE64.encode(RED_PIXEL_PNG)))
}

/// A loader whose futures never settle; only the timeout can end them.
struct StalledLoader;

impl ImageLoader for StalledLoader {
    fn load<'a>(&'a self, _reference: &'a ImageRef) -> BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(std::future::pending())
    }
}

/// A loader that sleeps a fixed delay before resolving each reference.
struct SlowLoader {
    delay: Duration,
    bytes: Vec<u8>,
}

impl ImageLoader for SlowLoader {
    fn load<'a>(&'a self, _reference: &'a ImageRef) -> BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Some(self.bytes.clone())
        })
    }
}

/// A loader that always resolves to nothing.
struct AbsentLoader;

impl ImageLoader for AbsentLoader {
    fn load<'a>(&'a self, _reference: &'a ImageRef) -> BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(async { None })
    }
}

#[tokio::test]
async fn test_export_produces_pdf_bytes_and_filename() {
    let invoice = sample_invoice();
    let settings = InvoiceSettings::default();

    let pdf = export_invoice(&invoice, &settings, &DataUrlLoader, &ExportOptions::default())
        .await
        .unwrap();

    assert!(pdf.bytes().starts_with(b"%PDF"));
    assert!(!pdf.is_empty());
    assert_eq!(pdf.page_count(), 1);
    assert_eq!(pdf.filename(), "Invoice_2024-042.pdf");
}

#[tokio::test]
async fn test_export_embeds_data_url_logo() {
    let mut invoice = sample_invoice();
    invoice.company.logo = Some(Logo {
        url: png_data_url(),
        position: LogoPosition::Left,
    });

    let pdf = export_invoice(
        &invoice,
        &InvoiceSettings::default(),
        &DataUrlLoader,
        &ExportOptions::default(),
    )
    .await
    .unwrap();

    assert!(pdf.bytes().starts_with(b"%PDF"));
    // The logo landed as an image XObject.
    let doc = lopdf::Document::load_mem(pdf.bytes()).unwrap();
    let has_image = doc.objects.values().any(|obj| {
        obj.as_stream()
            .ok()
            .and_then(|s| s.dict.get(b"Subtype").ok())
            .and_then(|o| o.as_name().ok())
            .map(|name| name == b"Image")
            .unwrap_or(false)
    });
    assert!(has_image);
}

#[tokio::test]
async fn test_stalled_image_load_times_out() {
    let mut invoice = sample_invoice();
    invoice.company.logo = Some(Logo {
        url: png_data_url(),
        position: LogoPosition::Left,
    });
    let options = ExportOptions {
        image_timeout: Duration::from_millis(20),
        ..ExportOptions::default()
    };

    let err = export_invoice(&invoice, &InvoiceSettings::default(), &StalledLoader, &options)
        .await
        .unwrap_err();

    match err {
        ExportError::CaptureTimeout { timeout_ms } => assert_eq!(timeout_ms, 20),
        other => panic!("expected capture timeout, got {:?}", other),
    }
}

/// Three distinct image slots: logo, watermark image, signature.
fn invoice_with_three_image_slots() -> (Invoice, InvoiceSettings) {
    let mut invoice = sample_invoice();
    invoice.company.logo = Some(Logo {
        url: ImageRef::new("data:image/png;base64,logo"),
        position: LogoPosition::Left,
    });
    invoice.signature = Some(ImageRef::new("data:image/png;base64,signature"));

    let mut settings = InvoiceSettings::default();
    settings.watermark.enabled = true;
    settings.watermark.kind = facture_core::types::WatermarkKind::Image;
    settings.watermark.image_url = ImageRef::new("data:image/png;base64,watermark");
    (invoice, settings)
}

#[tokio::test(start_paused = true)]
async fn test_capture_wait_is_one_bound_across_all_images() {
    // Three slots at 200 ms each: sequential per-image waits would need
    // 600 ms, so a 250 ms bound must cut the phase off at 250 ms.
    let (invoice, settings) = invoice_with_three_image_slots();
    let loader = SlowLoader {
        delay: Duration::from_millis(200),
        bytes: RED_PIXEL_PNG.to_vec(),
    };
    let options = ExportOptions {
        image_timeout: Duration::from_millis(250),
        ..ExportOptions::default()
    };

    let started = tokio::time::Instant::now();
    let err = export_invoice(&invoice, &settings, &loader, &options)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ExportError::CaptureTimeout { timeout_ms: 250 }));
    assert!(
        elapsed < Duration::from_millis(600),
        "capture overran its bound: {:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_slow_images_within_bound_all_resolve() {
    let (invoice, settings) = invoice_with_three_image_slots();
    let loader = SlowLoader {
        delay: Duration::from_millis(200),
        bytes: RED_PIXEL_PNG.to_vec(),
    };
    let options = ExportOptions {
        image_timeout: Duration::from_secs(1),
        ..ExportOptions::default()
    };

    let pdf = export_invoice(&invoice, &settings, &loader, &options)
        .await
        .unwrap();
    assert!(pdf.bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_unresolvable_image_leaves_slot_empty() {
    let mut invoice = sample_invoice();
    invoice.company.logo = Some(Logo {
        url: ImageRef::new("https://example.com/logo.png"),
        position: LogoPosition::Left,
    });
    invoice.signature = Some(ImageRef::new("data:image/png;base64,!!!broken!!!"));

    // Every slot unresolvable, export still succeeds.
    let pdf = export_invoice(
        &invoice,
        &InvoiceSettings::default(),
        &AbsentLoader,
        &ExportOptions::default(),
    )
    .await
    .unwrap();

    assert!(pdf.bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_phase_feed_reaches_done_and_failed() {
    let invoice = sample_invoice();
    let settings = InvoiceSettings::default();

    let (tx, rx) = watch::channel(ExportPhase::Idle);
    let options = ExportOptions {
        progress: Some(tx),
        ..ExportOptions::default()
    };
    export_invoice(&invoice, &settings, &DataUrlLoader, &options)
        .await
        .unwrap();
    assert_eq!(*rx.borrow(), ExportPhase::Done);

    let mut stalled = sample_invoice();
    stalled.company.logo = Some(Logo {
        url: png_data_url(),
        position: LogoPosition::Left,
    });
    let (tx, rx) = watch::channel(ExportPhase::Idle);
    let options = ExportOptions {
        image_timeout: Duration::from_millis(10),
        progress: Some(tx),
    };
    let result = export_invoice(&stalled, &settings, &StalledLoader, &options).await;
    assert!(result.is_err());
    assert_eq!(*rx.borrow(), ExportPhase::Failed);
}

#[tokio::test]
async fn test_save_to_writes_under_download_filename() {
    let invoice = sample_invoice();
    let dir = std::env::temp_dir().join("facture-pdf-test-save");
    std::fs::create_dir_all(&dir).unwrap();

    let pdf = export_invoice(
        &invoice,
        &InvoiceSettings::default(),
        &DataUrlLoader,
        &ExportOptions::default(),
    )
    .await
    .unwrap();

    let path = pdf.save_to(Path::new(&dir)).unwrap();
    assert!(path.ends_with("Invoice_2024-042.pdf"));
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, pdf.bytes());
    std::fs::remove_file(&path).ok();
}
