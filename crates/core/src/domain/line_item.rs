use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a quote or purchase order.
///
/// The server stores the whole sequence as JSON text, so anything beyond the
/// known columns is carried in `extra` and compared on read like every other
/// field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub quantity: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub discount: Option<Decimal>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl LineItem {
    /// Line with `total = quantity × unit_price`.
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: round_currency(quantity * unit_price),
            category: None,
            sku: None,
            discount: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }
}

/// Caller-supplied money columns shared by quotes and purchase orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub subtotal: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub vat_rate: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub vat_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
}

impl Totals {
    /// `vat_rate` is a percentage, e.g. `7.5`.
    pub fn compute(items: &[LineItem], vat_rate: Decimal) -> Self {
        let subtotal: Decimal = items.iter().map(|item| item.total).sum();
        let vat_amount = round_currency(subtotal * vat_rate / Decimal::ONE_HUNDRED);
        Self { subtotal, vat_rate, vat_amount, total_amount: subtotal + vat_amount }
    }
}

pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Decodes the `items` column of a read response.
///
/// The server hands the sequence back as a JSON-encoded string; an inline
/// array and a missing/null column (no items) are accepted too.
pub fn decode_items(value: Option<&Value>) -> Result<Vec<LineItem>, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(encoded)) => serde_json::from_str(encoded),
        Some(array @ Value::Array(_)) => Vec::<LineItem>::deserialize(array),
        Some(other) => Err(serde_json::Error::custom(format!(
            "items must be a JSON string or array, got `{other}`"
        ))),
    }
}

/// Compares what was sent with what came back, position by position.
pub fn compare_items(sent: &[LineItem], stored: &[LineItem]) -> Result<(), String> {
    if sent.len() != stored.len() {
        return Err(format!("expected {} items, got {}", sent.len(), stored.len()));
    }

    for (index, (expected, actual)) in sent.iter().zip(stored).enumerate() {
        if expected.description != actual.description {
            return Err(format!(
                "item {index}: description `{}` came back as `{}`",
                expected.description, actual.description
            ));
        }
        if expected != actual {
            return Err(format!("item {index} ({}): {expected:?} != {actual:?}", expected.description));
        }
    }

    Ok(())
}
