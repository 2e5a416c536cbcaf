use chrono::format::{Item, StrftimeItems};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ContractOptions;
use crate::layout::SectionRow;
use crate::model::{Order, Party, present};

/// `price * (1 - discount / 100)`, rounded half away from zero to cents.
/// The discount is clamped to 0-100.
pub fn final_price(price: Decimal, discount: Decimal) -> Decimal {
    let clamped = discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    if clamped != discount {
        log::warn!("Discount {discount}% is outside 0-100; using {clamped}%");
    }
    (price * (Decimal::ONE_HUNDRED - clamped) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// The configured date format, or `%d/%m/%Y` when it does not parse.
pub(crate) fn date_format(options: &ContractOptions) -> &str {
    let fmt = options.date_format.as_str();
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        log::warn!("Invalid date format {fmt:?}; using {FALLBACK_DATE_FORMAT}");
        FALLBACK_DATE_FORMAT
    } else {
        fmt
    }
}

pub fn format_money(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{currency_symbol} {rounded:.2}")
}

/// Identity rows always appear (with `N/A`); contact rows only when filled in.
pub fn party_rows(party: Option<&Party>) -> Vec<SectionRow> {
    let empty = Party::default();
    let party = party.unwrap_or(&empty);

    let address: Vec<&str> = [present(&party.address), present(&party.city)]
        .into_iter()
        .flatten()
        .collect();
    let address = (!address.is_empty()).then(|| address.join(", "));

    let mut rows = vec![
        SectionRow::identity("Name", present(&party.name)),
        SectionRow::identity("Address", address.as_deref()),
        SectionRow::identity("VAT Number", present(&party.vat_number)),
    ];
    rows.extend(
        [
            SectionRow::optional("SDI Code", present(&party.sdi)),
            SectionRow::optional("Phone", present(&party.phone)),
            SectionRow::optional("Email", present(&party.email)),
        ]
        .into_iter()
        .flatten(),
    );
    rows
}

pub fn product_rows(order: &Order) -> Vec<SectionRow> {
    let weight = order.actual_weight.map(|w| format!("{} kg", w.normalize()));
    let mut rows = vec![SectionRow::identity("Product", present(&order.product))];
    rows.extend(
        [
            SectionRow::optional("Type", present(&order.product_type)),
            SectionRow::optional("Origin", present(&order.origin)),
            SectionRow::optional("Packaging", present(&order.packaging)),
            SectionRow::optional("Quantity", present(&order.quantity)),
            SectionRow::optional("Actual weight", weight.as_deref()),
        ]
        .into_iter()
        .flatten(),
    );
    rows
}

/// Price, the discount pair when a discount applies, then dates and terms.
pub fn terms_rows(order: &Order, options: &ContractOptions) -> Vec<SectionRow> {
    let currency = options.currency_symbol.as_str();
    let mut rows = vec![SectionRow::field(
        "Unit price",
        format_money(order.price, currency),
    )];

    if order.discount > Decimal::ZERO {
        let discount = order.discount.min(Decimal::ONE_HUNDRED).normalize();
        rows.push(SectionRow::field("Discount", format!("{discount}%")));
        rows.push(SectionRow::field(
            "Final price",
            format_money(final_price(order.price, order.discount), currency),
        ));
    }

    let delivery = order
        .delivery_date
        .map(|d| d.format(date_format(options)).to_string());
    let invoice = order.invoice_amount.map(|a| format_money(a, currency));
    rows.extend(
        [
            SectionRow::optional("Delivery date", delivery.as_deref()),
            SectionRow::optional("Invoice amount", invoice.as_deref()),
            SectionRow::optional("Payment terms", present(&order.payment_terms)),
        ]
        .into_iter()
        .flatten(),
    );
    rows
}
