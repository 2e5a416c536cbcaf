mod common;

use std::fs;

use common::output_path;
use contract_pdf::{ContractOptions, Error, LogoSource, PageGeometry, convert_input_to_pdf, load_input};
use rust_decimal::Decimal;

const INPUT: &str = r#"{
  "order": {
    "orderNumber": "1001",
    "createdAt": "2024-03-15T10:00:00Z",
    "product": "Durum wheat",
    "type": "Grain",
    "price": "0.30",
    "discount": "10",
    "deliveryDate": "2024-04-01",
    "paymentTerms": "30 giorni",
    "actualWeight": "1250.5"
  },
  "buyer": {
    "name": "Rossi Alimentari",
    "vatNumber": "IT01234567890",
    "sdi": "M5UXCR1"
  },
  "company": {
    "name": "Agri Trade S.p.A.",
    "postalCode": "20100",
    "logo": { "path": "tests/output/no-such-logo.png" }
  }
}"#;

#[test]
fn reads_camel_case_records() {
    let path = output_path("input.json");
    fs::write(&path, INPUT).expect("write input");

    let input = load_input(&path).expect("load");
    let order = input.order.expect("order");
    assert_eq!(order.order_number, "1001");
    assert_eq!(order.product_type.as_deref(), Some("Grain"));
    assert_eq!(order.price, Decimal::new(30, 2));
    assert_eq!(order.discount, Decimal::from(10));
    assert_eq!(order.delivery_date, chrono::NaiveDate::from_ymd_opt(2024, 4, 1));
    assert_eq!(order.actual_weight, Some(Decimal::new(12505, 1)));
    assert!(order.invoice_amount.is_none());

    let buyer = input.buyer.expect("buyer");
    assert_eq!(buyer.vat_number.as_deref(), Some("IT01234567890"));
    assert!(buyer.email.is_none());
    assert!(input.seller.is_none());

    assert_eq!(input.company.postal_code.as_deref(), Some("20100"));
    assert!(matches!(input.company.logo, Some(LogoSource::Path(_))));
}

#[test]
fn malformed_json_is_a_json_error() {
    let path = output_path("broken.json");
    fs::write(&path, "{ \"order\": ").expect("write input");
    assert!(matches!(load_input(&path), Err(Error::Json(_))));
}

#[test]
fn options_default_every_field() {
    let path = output_path("options.json");
    fs::write(&path, r#"{ "page": { "marginLeft": 60 }, "currencySymbol": "EUR" }"#)
        .expect("write options");

    let options = ContractOptions::from_json_file(&path).expect("options");
    assert_eq!(options.page.margin_left, 60.0);
    assert_eq!(options.page.page_width, PageGeometry::default().page_width);
    assert_eq!(options.currency_symbol, "EUR");
    assert_eq!(options.date_format, "%d/%m/%Y");
}

#[test]
fn converts_input_file_to_pdf() {
    let input = output_path("convert.json");
    fs::write(&input, INPUT).expect("write input");
    let output = output_path("convert.pdf");

    convert_input_to_pdf(&input, &output, &ContractOptions::default()).expect("convert");
    let bytes = fs::read(&output).expect("read output");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn input_without_order_fails_conversion() {
    let input = output_path("no-order.json");
    fs::write(&input, r#"{ "buyer": { "name": "Rossi" }, "company": { "name": "Agri" } }"#)
        .expect("write input");
    let output = output_path("no-order.pdf");
    let _ = fs::remove_file(&output);

    let err = convert_input_to_pdf(&input, &output, &ContractOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingInput("order")));
    assert!(!output.exists());
}
