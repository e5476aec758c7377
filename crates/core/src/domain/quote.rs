use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::company::{CompanyId, CompanyRef};
use crate::domain::line_item::{decode_items, LineItem, Totals};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(pub String);

impl QuoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Body of `POST /api/quotes`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub company_id: CompanyId,
    pub quote_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to_contact: Option<String>,
    pub items: Vec<LineItem>,
    #[serde(flatten)]
    pub totals: Totals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewQuote {
    pub fn new(
        company_id: CompanyId,
        quote_number: impl Into<String>,
        items: Vec<LineItem>,
        vat_rate: Decimal,
    ) -> Self {
        let totals = Totals::compute(&items, vat_rate);
        Self {
            company_id,
            quote_number: quote_number.into(),
            po_number: None,
            bill_to: None,
            bill_to_address: None,
            bill_to_contact: None,
            items,
            totals,
            notes: None,
        }
    }
}

/// Body of `PUT /api/quotes/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub id: QuoteId,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub quote_number: Option<String>,
    #[serde(default)]
    pub bill_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub companies: Option<CompanyRef>,
}

impl QuoteRecord {
    pub fn line_items(&self) -> Result<Vec<LineItem>, serde_json::Error> {
        decode_items(self.items.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::domain::company::CompanyId;
    use crate::domain::line_item::LineItem;

    use super::{NewQuote, QuoteId, QuotePatch, QuoteRecord};

    #[test]
    fn new_quote_flattens_totals_into_camel_case_columns() {
        let quote = NewQuote::new(
            CompanyId("c-1".to_string()),
            "FK-TEST-Q001",
            vec![LineItem::new("Test Item", Decimal::ONE, Decimal::from(100))],
            Decimal::ZERO,
        );
        let value = serde_json::to_value(&quote).expect("serialize");

        assert_eq!(value["companyId"], json!("c-1"));
        assert_eq!(value["quoteNumber"], json!("FK-TEST-Q001"));
        assert_eq!(value["subtotal"], json!(100.0));
        assert_eq!(value["totalAmount"], json!(100.0));
        assert!(value.get("poNumber").is_none());
    }

    #[test]
    fn patch_only_carries_fields_being_changed() {
        let patch = QuotePatch {
            total_amount: Some(Decimal::from(3750)),
            ..QuotePatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).expect("serialize"), json!({ "totalAmount": 3750.0 }));
    }

    #[test]
    fn record_exposes_embedded_company_and_string_items() {
        let record: QuoteRecord = serde_json::from_value(json!({
            "id": "q-1",
            "companyId": "c-1",
            "quoteNumber": "Q-20260101-001",
            "items": "[{\"description\":\"Widget\",\"quantity\":1,\"unitPrice\":5,\"total\":5}]",
            "totalAmount": 5.25,
            "companies": { "id": "c-1", "name": "Test Company for Quotes", "logo": "" }
        }))
        .expect("record should decode");

        assert_eq!(record.id, QuoteId("q-1".to_string()));
        assert_eq!(
            record.companies.and_then(|company| company.name).as_deref(),
            Some("Test Company for Quotes")
        );
        assert_eq!(record.total_amount, Some(Decimal::new(525, 2)));
    }

    #[test]
    fn record_line_items_decode_from_json_text() {
        let record: QuoteRecord = serde_json::from_value(json!({
            "id": "q-2",
            "items": "[{\"description\":\"Widget\",\"quantity\":2,\"unitPrice\":5,\"total\":10}]"
        }))
        .expect("record should decode");

        let items = record.line_items().expect("items should decode");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].total, Decimal::from(10));
    }
}
