//! # Order Workflow Demo
//!
//! Walks one order through its whole life against in-process stores:
//! 1.  Load [`WorkflowConfig`] and start the [`OrderSystem`].
//! 2.  Register an administrator and a customer; seed the catalog.
//! 3.  Create, read, list, update and cancel an order, each step in its own span.
//!
//! Run with `RUST_LOG=info` (or `debug` for request payloads).

use order_workflow::config::WorkflowConfig;
use order_workflow::lifecycle::{setup_tracing, OrderSystem};
use order_workflow::model::{
    Identity, LineItemRequest, OrderChanges, ProductCreate, UserCreate,
};
use order_workflow::workflow::OrderFilter;
use std::error::Error;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = WorkflowConfig::from_env()?;
    info!(?config, "Starting order system");
    let system = OrderSystem::new(config);

    let mut audit = system.workflow.subscribe_status_changes();
    let audit_log = tokio::spawn(async move {
        while let Ok(change) = audit.recv().await {
            info!(order_id = %change.order_id, from = %change.from, to = %change.to, "Audit record");
        }
    });

    // Identities
    let (admin, alice) = async {
        let root = system
            .users
            .register(UserCreate::admin("root", "root@example.com"))
            .await?;
        let alice = system
            .users
            .register(UserCreate::customer("alice", "alice@example.com"))
            .await?;
        info!(admin = %root.id, customer = %alice.id, "Users registered");
        Ok::<_, Box<dyn Error>>((
            system.users.identity(root.id).await?,
            system.users.identity(alice.id).await?,
        ))
    }
    .instrument(tracing::info_span!("user_registration"))
    .await?;

    // Catalog
    let (widget, gadget) = async {
        let widget = system
            .products
            .create_product(
                &admin,
                ProductCreate {
                    name: "Widget".to_string(),
                    price: 100,
                    quantity: 10,
                },
            )
            .await?;
        let gadget = system
            .products
            .create_product(
                &admin,
                ProductCreate {
                    name: "Gadget".to_string(),
                    price: 250,
                    quantity: 3,
                },
            )
            .await?;
        info!(widget = %widget.id, gadget = %gadget.id, "Catalog seeded");
        Ok::<_, Box<dyn Error>>((widget, gadget))
    }
    .instrument(tracing::info_span!("catalog_setup"))
    .await?;

    // Order lifecycle
    let lifecycle = async {
        let order = system
            .workflow
            .create_order(
                &alice,
                vec![
                    LineItemRequest::new(widget.id, 2),
                    LineItemRequest::new(gadget.id, 1),
                ],
            )
            .await?;
        info!(order_id = %order.id, total = order.total_price, "Order placed");

        let fetched = system.workflow.get_order(order.id, &alice).await?;
        info!(order_id = %fetched.id, status = %fetched.status, "Order fetched");

        let intruder = Identity::user("mallory");
        if let Err(e) = system.workflow.get_order(order.id, &intruder).await {
            info!(error = %e, "Foreign read rejected");
        }

        let pending = OrderFilter {
            status: Some(order_workflow::model::OrderStatus::Pending),
            ..Default::default()
        };
        let visible = system.workflow.list_orders(&alice, &pending).await?;
        info!(count = visible.len(), "Pending orders for alice");

        let updated = system
            .workflow
            .update_order(
                order.id,
                OrderChanges {
                    status: None,
                    line_items: Some(vec![LineItemRequest::new(widget.id, 5)]),
                },
                &alice,
            )
            .await?;
        info!(order_id = %updated.id, total = updated.total_price, "Order updated");

        match system
            .workflow
            .create_order(&alice, vec![LineItemRequest::new(widget.id, 1000)])
            .await
        {
            Ok(order) => info!(order_id = %order.id, "Unexpectedly placed oversized order"),
            Err(e) => info!(error = %e, "Oversized order rejected"),
        }

        let cancelled = system.workflow.cancel_order(order.id, &admin).await?;
        info!(order_id = %cancelled.id, status = %cancelled.status, "Order cancelled");

        let stock = system.products.check_stock(widget.id).await?;
        info!(product_id = %widget.id, stock, "Remaining widget stock");
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("order_processing"))
    .await;

    if let Err(e) = &lifecycle {
        error!(error = %e, "Order processing failed");
    }

    // Shutdown system gracefully
    system.shutdown().await?;
    audit_log.await?;

    info!("Application completed successfully");
    lifecycle
}
