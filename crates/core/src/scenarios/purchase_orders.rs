use async_trait::async_trait;

use crate::domain::{Company, PurchaseOrderPatch, PurchaseOrderRecord, PurchaseOrderStatus};
use crate::errors::ScenarioFailure;
use crate::fixtures;
use crate::scenarios::{company_relation, Resource, Scenario, ScenarioContext};

/// Lifecycle of `/api/purchase-orders`, moving the order from pending to approved.
pub struct PurchaseOrdersLifecycle;

#[async_trait]
impl Scenario for PurchaseOrdersLifecycle {
    fn slug(&self) -> &'static str {
        "purchase-orders"
    }

    fn title(&self) -> &'static str {
        "Purchase Orders API"
    }

    fn section(&self) -> &'static str {
        "TESTING PURCHASE ORDERS API"
    }

    async fn run(&self, ctx: &mut ScenarioContext<'_>) -> Result<(), ScenarioFailure> {
        let resource = Resource::PurchaseOrders;

        ctx.step(0, "Creating test company for purchase orders");
        let company_payload = fixtures::purchase_orders_company();
        let company: Company =
            ctx.create(Resource::Companies, "Create test company", &company_payload).await?;
        ctx.record("Create test company", true, format!("Company ID: {}", company.id));

        ctx.step(1, "Testing GET /api/purchase-orders");
        let orders = ctx.list(resource).await?;
        ctx.record(
            &resource.step("GET", false),
            true,
            format!("Retrieved {} purchase orders", orders.len()),
        );

        ctx.step(2, "Testing POST /api/purchase-orders");
        let payload = fixtures::lifecycle_purchase_order(company.id.clone(), ctx.options().today);
        let created: PurchaseOrderRecord =
            ctx.create(resource, &resource.step("POST", false), &payload).await?;
        let id = created.id.clone();
        ctx.record(
            &resource.step("POST", false),
            true,
            format!("Created PO with ID: {}", id.as_str()),
        );

        ctx.step(3, "Testing GET /api/purchase-orders/{id}");
        let fetched: PurchaseOrderRecord = ctx.fetch(resource, id.as_str()).await?;
        ctx.record(
            &resource.step("GET", true),
            true,
            format!("Retrieved PO: {}", fetched.po_number.as_deref().unwrap_or_default()),
        );
        ctx.soft_check("PO initial status", initial_status(&fetched));
        ctx.soft_check(
            "PO-Company relation",
            company_relation(fetched.companies.as_ref(), &company.name),
        );

        ctx.step(4, "Testing PUT /api/purchase-orders/{id}");
        let patch = fixtures::purchase_order_approval();
        let updated: PurchaseOrderRecord = ctx.update(resource, id.as_str(), &patch).await?;
        let approved = verify_patch(&patch, &payload.po_number, &updated).map(|()| {
            format!("Updated PO status: {}", updated.status.as_deref().unwrap_or_default())
        });
        ctx.check(&resource.step("PUT", true), approved)?;

        ctx.step(5, "Testing DELETE /api/purchase-orders/{id}");
        let confirmation = ctx.remove(resource, id.as_str()).await?;
        ctx.record(
            &resource.step("DELETE", true),
            true,
            format!("Deleted PO successfully: {confirmation}"),
        );
        ctx.verify_removed(resource, id.as_str()).await?;

        Ok(())
    }
}

fn initial_status(fetched: &PurchaseOrderRecord) -> Result<String, String> {
    if fetched.has_status(PurchaseOrderStatus::Pending) {
        Ok("Status: pending".to_string())
    } else {
        Err(format!("expected status `pending`, got {:?}", fetched.status))
    }
}

fn verify_patch(
    patch: &PurchaseOrderPatch,
    po_number: &str,
    updated: &PurchaseOrderRecord,
) -> Result<(), String> {
    if let Some(status) = patch.status {
        if !updated.has_status(status) {
            return Err(format!(
                "status: expected `{}`, got {:?}",
                status.as_str(),
                updated.status
            ));
        }
    }
    if patch.total_amount.is_some() && updated.total_amount != patch.total_amount {
        return Err(format!(
            "totalAmount: expected {:?}, got {:?}",
            patch.total_amount, updated.total_amount
        ));
    }
    if updated.po_number.as_deref() != Some(po_number) {
        return Err(format!(
            "poNumber should be preserved as `{po_number}`, got {:?}",
            updated.po_number
        ));
    }
    Ok(())
}
