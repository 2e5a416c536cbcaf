mod common;

use std::sync::Mutex;

use common::{company_with_logo, long_terms, minimal_party, order_a};
use contract_pdf::{ContractOptions, LogoSource, generate_contract};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps warnings so a test can count them.
struct Capture;

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static LOGGER: Capture = Capture;

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

#[test]
fn undecodable_logo_is_reported_once_per_document() {
    log::set_logger(&LOGGER).expect("install logger");
    log::set_max_level(LevelFilter::Warn);

    let company = company_with_logo(LogoSource::Bytes(b"not an image".to_vec()));
    let mut order = order_a();
    order.payment_terms = Some(long_terms(3000));
    let doc = generate_contract(
        Some(&order),
        Some(&minimal_party("Rossi")),
        Some(&minimal_party("Bianchi")),
        &company,
        &ContractOptions::default(),
    )
    .expect("generate");
    assert!(doc.page_count() >= 2);

    let warnings = WARNINGS.lock().unwrap();
    let decode_failures = warnings
        .iter()
        .filter(|w| w.contains("could not be decoded"))
        .count();
    assert_eq!(decode_failures, 1, "{warnings:?}");
}
