pub mod company;
pub mod line_item;
pub mod purchase_order;
pub mod quote;

pub use company::{Company, CompanyId, CompanyPatch, CompanyRef, NewCompany};
pub use line_item::{compare_items, decode_items, LineItem, Totals};
pub use purchase_order::{
    NewPurchaseOrder, PurchaseOrderId, PurchaseOrderPatch, PurchaseOrderRecord,
    PurchaseOrderStatus,
};
pub use quote::{NewQuote, QuoteId, QuotePatch, QuoteRecord};
