use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A trade order as handed over by the order store.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    pub price: Decimal,
    /// Percentage, 0-100.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub actual_weight: Option<Decimal>,
    #[serde(default)]
    pub invoice_amount: Option<Decimal>,
}

impl Order {
    pub fn new(order_number: impl Into<String>, created_at: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            order_number: order_number.into(),
            created_at,
            product: None,
            product_type: None,
            origin: None,
            packaging: None,
            quantity: None,
            price,
            discount: Decimal::ZERO,
            delivery_date: None,
            payment_terms: None,
            actual_weight: None,
            invoice_amount: None,
        }
    }
}

/// A counterparty (client or vendor record).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub sdi: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Where the company logo comes from. Paths are read before layout starts.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogoSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<LogoSource>,
}

/// The full record bundle for one contract, as read by the CLI.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInput {
    #[serde(default)]
    pub order: Option<Order>,
    #[serde(default)]
    pub buyer: Option<Party>,
    #[serde(default)]
    pub seller: Option<Party>,
    pub company: CompanyProfile,
}

/// Trimmed value of an optional field, `None` when absent or blank.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
