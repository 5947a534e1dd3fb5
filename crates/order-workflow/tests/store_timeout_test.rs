//! Store calls that time out against real actors must leave no trace.
//!
//! Each attempt runs the workflow with one impatient client while other tasks keep
//! the product actor busy, so some calls time out after the store already queued
//! them. Whatever the outcome, stock plus the units held by stored orders must add
//! up to the initial stock.

use order_workflow::cache::NoopOrderCache;
use order_workflow::clients::{OrderClient, ProductClient};
use order_workflow::config::WorkflowConfig;
use order_workflow::lifecycle::OrderSystem;
use order_workflow::model::{Identity, LineItemRequest, OrderChanges, ProductCreate, ProductId};
use order_workflow::order_actor::OrderError;
use order_workflow::workflow::OrderWorkflow;
use resource_actor::ActorClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const INITIAL_STOCK: u32 = 1000;
const ATTEMPTS: u64 = 40;

async fn seed(system: &OrderSystem) -> ProductId {
    system
        .products
        .create_product(
            &Identity::admin("root"),
            ProductCreate {
                name: "Widget".into(),
                price: 1,
                quantity: INITIAL_STOCK,
            },
        )
        .await
        .unwrap()
        .id
}

async fn stock(system: &OrderSystem, product: ProductId) -> u32 {
    system.products.check_stock(product).await.unwrap()
}

/// Keeps the product actor's queue full until the handles are aborted.
fn flood(system: &OrderSystem, product: ProductId) -> Vec<JoinHandle<()>> {
    (0..4)
        .map(|_| {
            let products = system.products.clone();
            tokio::spawn(async move {
                loop {
                    let _ = products.check_stock(product).await;
                }
            })
        })
        .collect()
}

async fn assert_stock_accounted(system: &OrderSystem, product: ProductId) {
    let held: u32 = system
        .orders
        .list()
        .await
        .unwrap()
        .iter()
        .flat_map(|order| &order.line_items)
        .map(|item| item.quantity)
        .sum();
    assert_eq!(stock(system, product).await + held, INITIAL_STOCK);
}

/// A workflow whose product or order client gives up after `limit`.
fn impatient_workflow(system: &OrderSystem, attempt: u64) -> OrderWorkflow {
    let limit = Duration::from_micros(attempt * 25);
    let (products, orders) = if attempt % 2 == 0 {
        let products = system.products.inner().clone().with_timeout(limit);
        (ProductClient::new(products), system.orders.clone())
    } else {
        let orders = system.orders.inner().clone().with_timeout(limit);
        (system.products.clone(), OrderClient::new(orders))
    };
    OrderWorkflow::new(
        products,
        orders,
        Arc::new(NoopOrderCache),
        &WorkflowConfig::default(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_timed_out_create_leaves_stock_and_orders_unchanged() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system).await;
    let busy = flood(&system, product);
    let alice = Identity::user("alice");

    for attempt in 0..ATTEMPTS {
        let workflow = impatient_workflow(&system, attempt);
        let orders_before = system.orders.list().await.unwrap().len();
        let stock_before = stock(&system, product).await;

        match workflow
            .create_order(&alice, vec![LineItemRequest::new(product, 2)])
            .await
        {
            Ok(order) => {
                let stored = system.orders.get(order.id).await.unwrap();
                assert_eq!(stored, Some(order));
                assert_eq!(stock(&system, product).await, stock_before - 2);
            }
            Err(e) => {
                assert!(matches!(e, OrderError::ActorCommunicationError(_)), "{e:?}");
                assert_eq!(system.orders.list().await.unwrap().len(), orders_before);
                assert_eq!(stock(&system, product).await, stock_before);
            }
        }
        assert_stock_accounted(&system, product).await;
    }

    for task in busy {
        task.abort();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_timed_out_update_leaves_stock_and_order_unchanged() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system).await;
    let alice = Identity::user("alice");
    let mut current = system
        .workflow
        .create_order(&alice, vec![LineItemRequest::new(product, 1)])
        .await
        .unwrap();
    let busy = flood(&system, product);

    for attempt in 0..ATTEMPTS {
        let workflow = impatient_workflow(&system, attempt);
        let stock_before = stock(&system, product).await;
        let quantity = (attempt % 5) as u32 + 1;

        let changes = OrderChanges {
            status: None,
            line_items: Some(vec![LineItemRequest::new(product, quantity)]),
        };
        match workflow.update_order(current.id, changes, &alice).await {
            Ok(updated) => {
                assert_eq!(updated.line_items[0].quantity, quantity);
                current = updated;
            }
            Err(e) => {
                assert!(matches!(e, OrderError::ActorCommunicationError(_)), "{e:?}");
                let stored = system.orders.get(current.id).await.unwrap();
                assert_eq!(stored.as_ref(), Some(&current));
                assert_eq!(stock(&system, product).await, stock_before);
            }
        }
        assert_stock_accounted(&system, product).await;
    }

    for task in busy {
        task.abort();
    }
}
