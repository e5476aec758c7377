//! Canonical payloads the scenarios create and mutate.
//!
//! Money columns are derived from the line items with [`Totals::compute`]
//! rather than typed in by hand, so every fixture is internally consistent.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{
    CompanyId, CompanyPatch, LineItem, NewCompany, NewPurchaseOrder, NewQuote, PurchaseOrderPatch,
    PurchaseOrderStatus, QuoteId, QuotePatch,
};

/// 1×1 transparent PNG.
pub const SAMPLE_LOGO_BASE64: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub const ACME_NAME: &str = "Acme Corporation Ltd";
pub const RELATIONSHIP_COMPANY_NAME: &str = "Relationship Test Company";
pub const SPECIAL_CHARACTER_DESCRIPTION: &str =
    "High-end Product with Special Characters: àáâãäåæçèéêë";

struct CompanySeed {
    name: &'static str,
    address: Option<&'static str>,
    phone: Option<&'static str>,
    email: &'static str,
}

const QUOTES_COMPANY: CompanySeed = CompanySeed {
    name: "Test Company for Quotes",
    address: Some("456 Quote Street, Business City, BC 67890"),
    phone: Some("+1-555-234-5678"),
    email: "quotes@testcompany.com",
};

const PURCHASE_ORDERS_COMPANY: CompanySeed = CompanySeed {
    name: "Test Company for POs",
    address: Some("321 Purchase Order Blvd, PO City, PC 54321"),
    phone: Some("+1-555-345-6789"),
    email: "po@testcompany.com",
};

const JSON_COMPANY: CompanySeed =
    CompanySeed { name: "JSON Test Company", address: None, phone: None, email: "json@test.com" };

const RELATIONSHIP_COMPANY: CompanySeed = CompanySeed {
    name: RELATIONSHIP_COMPANY_NAME,
    address: None,
    phone: None,
    email: "relationships@test.com",
};

impl CompanySeed {
    fn build(&self) -> NewCompany {
        NewCompany {
            name: self.name.to_string(),
            address: self.address.map(str::to_string),
            phone: self.phone.map(str::to_string),
            email: Some(self.email.to_string()),
            ..NewCompany::default()
        }
    }
}

pub fn acme_company() -> NewCompany {
    NewCompany {
        name: ACME_NAME.to_string(),
        logo: Some(SAMPLE_LOGO_BASE64.to_string()),
        address: Some("123 Business Street, Corporate City, CC 12345".to_string()),
        phone: Some("+1-555-123-4567".to_string()),
        email: Some("contact@acmecorp.com".to_string()),
        signature: Some("John Smith, CEO".to_string()),
        seal: Some("Official Company Seal".to_string()),
    }
}

pub fn acme_company_update() -> CompanyPatch {
    CompanyPatch {
        name: Some(format!("{ACME_NAME} - Updated")),
        phone: Some("+1-555-987-6543".to_string()),
        email: Some("updated@acmecorp.com".to_string()),
        ..CompanyPatch::default()
    }
}

pub fn quotes_company() -> NewCompany {
    QUOTES_COMPANY.build()
}

pub fn purchase_orders_company() -> NewCompany {
    PURCHASE_ORDERS_COMPANY.build()
}

pub fn json_company() -> NewCompany {
    JSON_COMPANY.build()
}

pub fn relationship_company() -> NewCompany {
    RELATIONSHIP_COMPANY.build()
}

/// `Q-YYYYMMDD-001`
pub fn quote_number(day: NaiveDate) -> String {
    format!("Q-{}-001", day.format("%Y%m%d"))
}

/// `PO-YYYYMMDD-001`
pub fn po_number(day: NaiveDate) -> String {
    format!("PO-{}-001", day.format("%Y%m%d"))
}

pub fn lifecycle_quote(company_id: CompanyId, day: NaiveDate) -> NewQuote {
    let items = vec![
        LineItem::new("Premium Widget Model A", Decimal::from(10), Decimal::new(15000, 2)),
        LineItem::new("Standard Widget Model B", Decimal::from(25), Decimal::new(7550, 2)),
    ];

    let mut quote = NewQuote::new(company_id, quote_number(day), items, Decimal::from(5));
    quote.po_number = Some("PO-REF-12345".to_string());
    quote.bill_to = Some("ABC Manufacturing Ltd".to_string());
    quote.bill_to_address = Some("789 Industrial Ave, Manufacturing City, MC 11111".to_string());
    quote.bill_to_contact = Some("Jane Doe, Procurement Manager".to_string());
    quote.notes = Some("Payment terms: Net 30 days. Delivery within 2 weeks.".to_string());
    quote
}

pub fn lifecycle_quote_update() -> QuotePatch {
    QuotePatch {
        bill_to: Some("ABC Manufacturing Ltd - Updated".to_string()),
        total_amount: Some(Decimal::from(3750)),
        notes: Some("Updated payment terms: Net 15 days.".to_string()),
    }
}

pub fn lifecycle_purchase_order(company_id: CompanyId, day: NaiveDate) -> NewPurchaseOrder {
    let items = vec![
        LineItem::new("Professional Service Package A", Decimal::from(5), Decimal::from(500)),
        LineItem::new("Maintenance Contract - Annual", Decimal::ONE, Decimal::from(1200)),
    ];

    let mut order = NewPurchaseOrder::new(company_id, po_number(day), items, Decimal::from(5));
    order.quote_number = Some("Q-REF-67890".to_string());
    order.bill_to = Some("XYZ Services Inc".to_string());
    order.bill_to_address = Some("987 Service Lane, Service City, SC 22222".to_string());
    order.bill_to_contact = Some("Bob Johnson, Operations Manager".to_string());
    order.notes = Some("Service to commence within 30 days of PO approval.".to_string());
    order
}

pub fn purchase_order_approval() -> PurchaseOrderPatch {
    PurchaseOrderPatch {
        status: Some(PurchaseOrderStatus::Approved),
        total_amount: Some(Decimal::from(4000)),
        notes: Some("PO approved. Service start date confirmed.".to_string()),
    }
}

/// Non-ASCII text, fractional prices and optional columns, in a fixed order.
pub fn special_character_items() -> Vec<LineItem> {
    vec![
        LineItem::new(SPECIAL_CHARACTER_DESCRIPTION, Decimal::from(3), Decimal::new(123456, 2))
            .with_category("premium")
            .with_sku("SKU-001-SPECIAL"),
        LineItem::new("Bulk Item with Discount", Decimal::from(100), Decimal::new(999, 2))
            .with_discount(Decimal::new(1, 2))
            .with_category("bulk"),
    ]
}

pub fn json_quote(company_id: CompanyId) -> NewQuote {
    NewQuote::new(company_id, "JSON-TEST-001", special_character_items(), Decimal::new(75, 1))
}

pub fn relationship_quote(company_id: CompanyId) -> NewQuote {
    NewQuote::new(
        company_id,
        "FK-TEST-Q001",
        vec![LineItem::new("Test Item", Decimal::ONE, Decimal::from(100))],
        Decimal::ZERO,
    )
}

/// Order for the same company, derived from the relationship quote.
pub fn relationship_purchase_order(
    company_id: CompanyId,
    quote_id: QuoteId,
    quote_number: &str,
) -> NewPurchaseOrder {
    let mut order = NewPurchaseOrder::new(
        company_id,
        "FK-TEST-PO001",
        vec![LineItem::new("Test PO Item", Decimal::from(2), Decimal::from(50))],
        Decimal::ZERO,
    );
    order.quote_id = Some(quote_id);
    order.quote_number = Some(quote_number.to_string());
    order
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::{CompanyId, QuoteId};

    use super::{
        json_quote, lifecycle_purchase_order, lifecycle_quote, quote_number,
        relationship_purchase_order, special_character_items, SPECIAL_CHARACTER_DESCRIPTION,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[test]
    fn document_numbers_embed_the_run_date() {
        assert_eq!(quote_number(day()), "Q-20261016-001");
        assert_eq!(lifecycle_purchase_order(CompanyId("c".into()), day()).po_number, "PO-20261016-001");
    }

    #[test]
    fn lifecycle_quote_totals_match_invoice_arithmetic() {
        let quote = lifecycle_quote(CompanyId("c".into()), day());
        assert_eq!(quote.totals.subtotal, Decimal::new(338750, 2));
        assert_eq!(quote.totals.vat_amount, Decimal::new(16938, 2));
        assert_eq!(quote.totals.total_amount, Decimal::new(355688, 2));
    }

    #[test]
    fn lifecycle_purchase_order_totals_match_invoice_arithmetic() {
        let order = lifecycle_purchase_order(CompanyId("c".into()), day());
        assert_eq!(order.totals.subtotal, Decimal::from(3700));
        assert_eq!(order.totals.vat_amount, Decimal::from(185));
        assert_eq!(order.totals.total_amount, Decimal::from(3885));
    }

    #[test]
    fn special_items_keep_non_ascii_description_and_fractional_prices() {
        let items = special_character_items();
        assert_eq!(items[0].description, SPECIAL_CHARACTER_DESCRIPTION);
        assert_eq!(items[0].unit_price, Decimal::new(123456, 2));
        assert_eq!(items[0].total, Decimal::new(370368, 2));
        assert_eq!(items[1].total, Decimal::from(999));
        assert_eq!(json_quote(CompanyId("c".into())).totals.total_amount, Decimal::new(505538, 2));
    }

    #[test]
    fn relationship_order_points_back_at_its_quote() {
        let order =
            relationship_purchase_order(CompanyId("c".into()), QuoteId("q".into()), "FK-TEST-Q001");
        assert_eq!(order.quote_id, Some(QuoteId("q".into())));
        assert_eq!(order.quote_number.as_deref(), Some("FK-TEST-Q001"));
        assert_eq!(order.totals.total_amount, Decimal::from(100));
    }
}
