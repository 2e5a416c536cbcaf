#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use contract_pdf::layout::{Branding, LayoutContext, LayoutGeometry};
use contract_pdf::surface::{DrawOp, Layer, RecordingSurface};
use contract_pdf::{
    CompanyProfile, ContractOptions, Document, FontSet, LogoSource, Order, PageGeometry, Party,
    generate_contract,
};
use rust_decimal::Decimal;

pub const EPS: f32 = 0.01;

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
}

/// Order 1001: 0.30 per unit, no discount, short payment terms.
pub fn order_a() -> Order {
    let mut order = Order::new("1001", created_at(), Decimal::new(30, 2));
    order.payment_terms = Some("30 giorni".to_string());
    order
}

/// Same as [`order_a`] with roughly 2000 characters of payment terms.
pub fn order_b() -> Order {
    let mut order = order_a();
    order.payment_terms = Some(long_terms(2000));
    order
}

pub fn long_terms(chars: usize) -> String {
    let sentence = "Payment is due within thirty days of the invoice date by bank transfer. ";
    sentence.repeat(chars / sentence.len() + 1)[..chars].trim_end().to_string()
}

pub fn minimal_party(name: &str) -> Party {
    Party {
        name: Some(name.to_string()),
        ..Party::default()
    }
}

pub fn full_buyer() -> Party {
    Party {
        name: Some("Rossi Alimentari S.r.l.".to_string()),
        address: Some("Via Garibaldi 12".to_string()),
        city: Some("Bologna".to_string()),
        vat_number: Some("IT01234567890".to_string()),
        sdi: Some("M5UXCR1".to_string()),
        phone: Some("+39 051 123456".to_string()),
        email: Some("acquisti@rossi.example".to_string()),
    }
}

pub fn company() -> CompanyProfile {
    CompanyProfile {
        name: "Agri Trade S.p.A.".to_string(),
        address: Some("Via Roma 1".to_string()),
        city: Some("Milano".to_string()),
        postal_code: Some("20100".to_string()),
        province: Some("MI".to_string()),
        phone: Some("+39 02 555 0101".to_string()),
        email: Some("info@agritrade.example".to_string()),
        vat_number: Some("IT09876543210".to_string()),
        website: Some("www.agritrade.example".to_string()),
        logo: None,
    }
}

pub fn company_with_logo(logo: LogoSource) -> CompanyProfile {
    CompanyProfile {
        logo: Some(logo),
        ..company()
    }
}

/// A 40x20 PNG with a transparent right half.
pub fn png_logo() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(40, 20, |x, _| {
        if x < 20 {
            image::Rgba([31, 78, 121, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// Route `log` output through the test harness; `RUST_LOG=debug` shows page breaks.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn generate(order: &Order, buyer: Option<&Party>, seller: Option<&Party>) -> Document {
    init_logging();
    generate_contract(
        Some(order),
        buyer,
        seller,
        &company(),
        &ContractOptions::default(),
    )
    .expect("generate contract")
}

pub fn scenario_a() -> Document {
    let buyer = minimal_party("Rossi Alimentari");
    let seller = minimal_party("Bianchi Farms");
    generate(&order_a(), Some(&buyer), Some(&seller))
}

pub fn scenario_b() -> Document {
    let buyer = minimal_party("Rossi Alimentari");
    let seller = minimal_party("Bianchi Farms");
    generate(&order_b(), Some(&buyer), Some(&seller))
}

pub fn default_geometry() -> LayoutGeometry {
    LayoutGeometry::new(&PageGeometry::default()).expect("default geometry")
}

pub fn branding(company: &CompanyProfile) -> Branding<'_> {
    Branding {
        company,
        logo: None,
        theme: Default::default(),
        generator: "Generated by tests",
    }
}

/// A fresh layout context on an A4 recording surface.
pub fn context(company: &CompanyProfile) -> LayoutContext<'_, RecordingSurface> {
    let geometry = default_geometry();
    let surface = RecordingSurface::new(
        geometry.page.page_width,
        geometry.page.page_height,
        Arc::new(FontSet::builtin()),
    );
    LayoutContext::new(surface, geometry, branding(company))
}

/// Every text string in the document, page by page.
pub fn all_text(doc: &Document) -> Vec<String> {
    doc.pages()
        .iter()
        .flat_map(|p| p.all_text().map(str::to_string))
        .collect()
}

pub fn contains_text(doc: &Document, needle: &str) -> bool {
    all_text(doc).iter().any(|t| t.contains(needle))
}

pub fn count_text(doc: &Document, layer: Layer, exact: &str) -> usize {
    doc.pages()
        .iter()
        .map(|p| p.texts(layer).filter(|t| *t == exact).count())
        .sum()
}

/// y positions a content-layer op touches (top and bottom for boxes).
pub fn op_y_extent(op: &DrawOp) -> (f32, f32) {
    match op {
        DrawOp::Text { y, .. } => (*y, *y),
        DrawOp::Line { y1, y2, .. } => (y1.min(*y2), y1.max(*y2)),
        DrawOp::Rect { y, h, .. } => (*y, *y + *h),
        DrawOp::Image { y, h, .. } => (*y, *y + *h),
    }
}

pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output/contracts");
    fs::create_dir_all(&dir).expect("create output dir");
    dir.join(name)
}
