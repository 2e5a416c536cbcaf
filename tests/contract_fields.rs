mod common;

use common::{contains_text, count_text, full_buyer, generate, minimal_party, order_a, scenario_a};
use contract_pdf::layout::SectionRow;
use contract_pdf::surface::Layer;
use contract_pdf::{ContractOptions, final_price, format_money, party_rows, product_rows, terms_rows};
use rust_decimal::Decimal;

#[test]
fn final_price_applies_the_discount() {
    assert_eq!(final_price(Decimal::new(30, 2), Decimal::from(10)), Decimal::new(27, 2));
    assert_eq!(final_price(Decimal::from(200), Decimal::ZERO), Decimal::from(200));
    // 19.99 * 0.875 = 17.49125
    assert_eq!(
        final_price(Decimal::new(1999, 2), Decimal::new(125, 1)),
        Decimal::new(1749, 2)
    );
}

#[test]
fn final_price_rounds_half_away_from_zero() {
    // 0.05 * 0.5 = 0.025
    assert_eq!(final_price(Decimal::new(5, 2), Decimal::from(50)), Decimal::new(3, 2));
    assert_eq!(final_price(Decimal::new(-5, 2), Decimal::from(50)), Decimal::new(-3, 2));
}

#[test]
fn out_of_range_discounts_are_clamped() {
    assert_eq!(final_price(Decimal::from(10), Decimal::from(150)), Decimal::ZERO);
    assert_eq!(final_price(Decimal::from(10), Decimal::from(-5)), Decimal::from(10));
}

#[test]
fn money_is_shown_with_two_decimals() {
    assert_eq!(format_money(Decimal::new(27, 2), "€"), "€ 0.27");
    assert_eq!(format_money(Decimal::from(1500), "EUR"), "EUR 1500.00");
    assert_eq!(format_money(Decimal::new(12345, 3), "$"), "$ 12.35");
}

#[test]
fn scenario_a_has_no_discount_lines() {
    let doc = scenario_a();
    assert!(!contains_text(&doc, "Discount"));
    assert!(!contains_text(&doc, "Final price"));
    assert!(contains_text(&doc, "€ 0.30"));
    assert!(contains_text(&doc, "30 giorni"));
    assert!(contains_text(&doc, "Contract No. 1001 | Date: 15/03/2024"));
}

#[test]
fn discounted_orders_show_discount_and_final_price() {
    let mut order = order_a();
    order.discount = Decimal::from(10);
    let buyer = minimal_party("Rossi");
    let doc = generate(&order, Some(&buyer), None);

    assert_eq!(count_text(&doc, Layer::Content, "Discount"), 1);
    assert!(contains_text(&doc, "10%"));
    assert_eq!(count_text(&doc, Layer::Content, "Final price"), 1);
    assert!(contains_text(&doc, "€ 0.27"));
}

#[test]
fn missing_contact_fields_are_omitted() {
    let rows = party_rows(Some(&minimal_party("Rossi")));
    let labels: Vec<&str> = rows
        .iter()
        .filter_map(|r| match r {
            SectionRow::Field { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Name", "Address", "VAT Number"]);
}

#[test]
fn missing_identity_fields_read_na() {
    let rows = party_rows(Some(&minimal_party("Rossi")));
    assert_eq!(rows[0], SectionRow::field("Name", "Rossi"));
    assert_eq!(rows[1], SectionRow::field("Address", "N/A"));
    assert_eq!(rows[2], SectionRow::field("VAT Number", "N/A"));

    let absent = party_rows(None);
    assert!(absent.iter().all(|r| matches!(r, SectionRow::Field { value, .. } if value == "N/A")));
}

#[test]
fn blank_fields_count_as_missing() {
    let mut party = full_buyer();
    party.sdi = Some("   ".to_string());
    party.vat_number = Some(String::new());
    let rows = party_rows(Some(&party));
    assert!(!rows.iter().any(|r| matches!(r, SectionRow::Field { label, .. } if label == "SDI Code")));
    assert!(rows.contains(&SectionRow::field("VAT Number", "N/A")));
}

#[test]
fn full_party_lists_every_field() {
    let rows = party_rows(Some(&full_buyer()));
    assert_eq!(
        rows,
        vec![
            SectionRow::field("Name", "Rossi Alimentari S.r.l."),
            SectionRow::field("Address", "Via Garibaldi 12, Bologna"),
            SectionRow::field("VAT Number", "IT01234567890"),
            SectionRow::field("SDI Code", "M5UXCR1"),
            SectionRow::field("Phone", "+39 051 123456"),
            SectionRow::field("Email", "acquisti@rossi.example"),
        ]
    );
}

#[test]
fn sdi_line_follows_the_record() {
    let order = order_a();
    let without = generate(&order, Some(&minimal_party("Rossi")), None);
    assert!(!contains_text(&without, "SDI Code"));

    let with = generate(&order, Some(&full_buyer()), None);
    assert_eq!(count_text(&with, Layer::Content, "SDI Code"), 1);
    assert!(contains_text(&with, "M5UXCR1"));
}

#[test]
fn product_rows_skip_absent_details() {
    let mut order = order_a();
    assert_eq!(product_rows(&order), vec![SectionRow::field("Product", "N/A")]);

    order.product = Some("Durum wheat".to_string());
    order.origin = Some("Puglia".to_string());
    order.actual_weight = Some(Decimal::new(12500, 1));
    assert_eq!(
        product_rows(&order),
        vec![
            SectionRow::field("Product", "Durum wheat"),
            SectionRow::field("Origin", "Puglia"),
            SectionRow::field("Actual weight", "1250 kg"),
        ]
    );
}

#[test]
fn terms_rows_use_configured_formats() {
    let mut order = order_a();
    order.delivery_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);
    order.invoice_amount = Some(Decimal::new(45000, 2));
    let options = ContractOptions {
        currency_symbol: "EUR".to_string(),
        date_format: "%Y-%m-%d".to_string(),
        ..ContractOptions::default()
    };
    assert_eq!(
        terms_rows(&order, &options),
        vec![
            SectionRow::field("Unit price", "EUR 0.30"),
            SectionRow::field("Delivery date", "2024-04-01"),
            SectionRow::field("Invoice amount", "EUR 450.00"),
            SectionRow::field("Payment terms", "30 giorni"),
        ]
    );
}

#[test]
fn invalid_date_format_falls_back() {
    let mut order = order_a();
    order.delivery_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);
    let options = ContractOptions {
        date_format: "%Q".to_string(),
        ..ContractOptions::default()
    };
    assert!(terms_rows(&order, &options).contains(&SectionRow::field("Delivery date", "01/04/2024")));
}

#[test]
fn one_party_is_enough() {
    let order = order_a();
    let doc = generate(&order, None, Some(&minimal_party("Bianchi Farms")));
    assert!(contains_text(&doc, "Bianchi Farms"));
    // The buyer section and box still appear, with placeholders.
    assert!(count_text(&doc, Layer::Content, "N/A") >= 3);
}
