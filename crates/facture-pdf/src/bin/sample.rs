//! Exports a sample invoice to `Invoice_2024-001.pdf` in the current
//! directory. Handy for eyeballing layout changes:
//!
//! ```text
//! cargo run -p facture-pdf --bin sample
//! ```

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use facture_core::types::{
    Address, Client, CompanyContact, Invoice, InvoiceItem, InvoiceSettings, VatRate,
    WatermarkPosition,
};
use facture_pdf::{export_invoice, DataUrlLoader, ExportOptions};

fn sample_invoice() -> Invoice {
    let mut invoice = Invoice::draft(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default());
    invoice.number = "2024-001".to_string();

    invoice.company.name = "Atlas Conseil".to_string();
    invoice.company.vat_number = "FR 12 345 678 901".to_string();
    invoice.company.address = Address {
        street: "12 rue des Orangers".to_string(),
        postal_code: "75011".to_string(),
        city: "Paris".to_string(),
    };
    invoice.company.contact = CompanyContact {
        phone: "+33 1 23 45 67 89".to_string(),
        email: "contact@atlas-conseil.fr".to_string(),
        website: "atlas-conseil.fr".to_string(),
    };

    invoice.client = Client {
        name: "Ménara Distribution SARL".to_string(),
        billing_address: Address {
            street: "4 avenue de la République".to_string(),
            postal_code: "69002".to_string(),
            city: "Lyon".to_string(),
        },
        ..Client::default()
    };

    invoice.items = vec![
        InvoiceItem {
            description: "Audit des processus de facturation".to_string(),
            quantity: 3.0,
            unit: "jour".to_string(),
            unit_price: 650.0,
            vat_rate: VatRate::STANDARD,
            discount: None,
        },
        InvoiceItem {
            description: "Formation équipe comptable".to_string(),
            quantity: 1.5,
            unit: "jour".to_string(),
            unit_price: 800.0,
            vat_rate: VatRate::INTERMEDIATE,
            discount: None,
        },
        InvoiceItem {
            description: "Support documentaire".to_string(),
            quantity: 10.0,
            unit: "unité".to_string(),
            unit_price: 12.5,
            vat_rate: VatRate::REDUCED,
            discount: None,
        },
    ];

    for field in &mut invoice.footer_fields {
        field.value = match field.label.as_str() {
            "Nom de l'entreprise" => "Atlas Conseil".to_string(),
            "Adresse" => "12 rue des Orangers, 75011 Paris".to_string(),
            "PATENTE" => "45678901".to_string(),
            "TEL" => "+33 1 23 45 67 89".to_string(),
            "ICE" => "001234567000089".to_string(),
            _ => field.value.clone(),
        };
    }

    invoice
}

fn sample_settings() -> InvoiceSettings {
    let mut settings = InvoiceSettings::default();
    settings.watermark.enabled = true;
    settings.watermark.mosaic = true;
    settings.watermark.text = "SPÉCIMEN".to_string();
    settings.watermark.tile_size = 120;
    settings.watermark.position = WatermarkPosition::Center;
    settings
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let invoice = sample_invoice();
    let settings = sample_settings();

    let pdf = export_invoice(&invoice, &settings, &DataUrlLoader, &ExportOptions::default()).await?;
    let path = pdf.save_to(Path::new("."))?;

    info!(path = %path.display(), pages = pdf.page_count(), bytes = pdf.len(), "sample exported");
    Ok(())
}
