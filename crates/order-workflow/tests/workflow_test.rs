use order_workflow::config::WorkflowConfig;
use order_workflow::lifecycle::OrderSystem;
use order_workflow::model::{
    Identity, LineItemRequest, Order, OrderChanges, OrderId, OrderStatus, ProductCreate, ProductId,
    UserCreate,
};
use order_workflow::order_actor::OrderError;
use order_workflow::user_actor::UserError;
use order_workflow::workflow::OrderFilter;
use resource_actor::ActorClient;

// --- Helpers ---

fn admin() -> Identity {
    Identity::admin("root")
}

fn alice() -> Identity {
    Identity::user("alice")
}

fn bob() -> Identity {
    Identity::user("bob")
}

fn line(product: ProductId, quantity: u32) -> LineItemRequest {
    LineItemRequest::new(product, quantity)
}

async fn seed(system: &OrderSystem, name: &str, price: u64, quantity: u32) -> ProductId {
    system
        .products
        .create_product(
            &admin(),
            ProductCreate {
                name: name.to_string(),
                price,
                quantity,
            },
        )
        .await
        .expect("Failed to create product")
        .id
}

async fn stock(system: &OrderSystem, id: ProductId) -> u32 {
    system
        .products
        .check_stock(id)
        .await
        .expect("Failed to check stock")
}

async fn place(system: &OrderSystem, owner: &Identity, items: Vec<LineItemRequest>) -> Order {
    system
        .workflow
        .create_order(owner, items)
        .await
        .expect("Failed to create order")
}

// --- Creation ---

#[tokio::test]
async fn test_create_order_reserves_stock_and_prices_order() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 100, 10).await;
    assert_eq!(product, ProductId(1));

    let order = place(&system, &alice(), vec![line(product, 2)]).await;

    assert_eq!(order.total_price, 200);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.owner, "alice");
    assert_eq!(order.line_items[0].unit_price, 100);
    assert_eq!(stock(&system, product).await, 8);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_total_equals_sum_of_captured_subtotals() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let widget = seed(&system, "Widget", 100, 10).await;
    let gadget = seed(&system, "Gadget", 35, 10).await;

    let order = place(&system, &alice(), vec![line(widget, 3), line(gadget, 4)]).await;
    let sum: u64 = order
        .line_items
        .iter()
        .map(|item| item.subtotal().unwrap())
        .sum();
    assert_eq!(order.total_price, sum);
    assert_eq!(order.total_price, 440);

    // Repricing later does not touch the placed order
    system
        .products
        .update_product(
            &admin(),
            widget,
            order_workflow::model::ProductUpdate {
                name: None,
                price: Some(1),
            },
        )
        .await
        .unwrap();
    let stored = system.workflow.get_order(order.id, &alice()).await.unwrap();
    assert_eq!(stored.total_price, 440);
}

#[tokio::test]
async fn test_insufficient_stock_leaves_stock_unchanged() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 100, 1).await;

    let err = system
        .workflow
        .create_order(&alice(), vec![line(product, 1000)])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::InsufficientStock {
            product_id: ProductId(1),
            available: 1,
        }
    );
    assert_eq!(stock(&system, product).await, 1);
}

#[tokio::test]
async fn test_unknown_product_is_reported() {
    let system = OrderSystem::new(WorkflowConfig::default());

    let err = system
        .workflow
        .create_order(&alice(), vec![line(ProductId(999), 1)])
        .await
        .unwrap_err();

    assert_eq!(err, OrderError::ProductNotFound(ProductId(999)));
    assert!(system.orders.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failing_line_rolls_back_earlier_lines() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let plenty = seed(&system, "Plenty", 10, 50).await;
    let scarce = seed(&system, "Scarce", 10, 2).await;

    let err = system
        .workflow
        .create_order(&alice(), vec![line(plenty, 5), line(scarce, 3)])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { product_id, available: 2 } if product_id == scarce));

    let err = system
        .workflow
        .create_order(&alice(), vec![line(plenty, 5), line(ProductId(77), 1)])
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::ProductNotFound(ProductId(77)));

    assert_eq!(stock(&system, plenty).await, 50);
    assert_eq!(stock(&system, scarce).await, 2);
}

#[tokio::test]
async fn test_duplicate_lines_are_merged() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let widget = seed(&system, "Widget", 10, 5).await;
    let gadget = seed(&system, "Gadget", 1, 5).await;

    let order = place(
        &system,
        &alice(),
        vec![line(widget, 2), line(gadget, 1), line(widget, 3)],
    )
    .await;

    assert_eq!(order.line_items.len(), 2);
    assert_eq!(order.line_items[0].product_id, widget);
    assert_eq!(order.line_items[0].quantity, 5);
    assert_eq!(stock(&system, widget).await, 0);

    // Split across lines it still cannot exceed stock
    let err = system
        .workflow
        .create_order(&alice(), vec![line(gadget, 3), line(gadget, 3)])
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock { .. }));
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_before_reservation() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;

    let empty = system.workflow.create_order(&alice(), vec![]).await;
    assert!(matches!(empty, Err(OrderError::ValidationError(_))));

    let zero = system
        .workflow
        .create_order(&alice(), vec![line(product, 0)])
        .await;
    assert!(matches!(zero, Err(OrderError::ValidationError(_))));

    assert_eq!(stock(&system, product).await, 5);
}

// --- Concurrency ---

#[tokio::test]
async fn test_concurrent_orders_for_last_unit() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Last one", 100, 1).await;

    let first = system.workflow.clone();
    let second = system.workflow.clone();
    let (a, b) = tokio::join!(
        tokio::spawn(async move { first.create_order(&alice(), vec![line(product, 1)]).await }),
        tokio::spawn(async move { second.create_order(&bob(), vec![line(product, 1)]).await }),
    );
    let results = [a.unwrap(), b.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(OrderError::InsufficientStock { available: 0, .. })
    )));
    assert_eq!(stock(&system, product).await, 0);
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let widget = seed(&system, "Widget", 5, 20).await;
    let gadget = seed(&system, "Gadget", 7, 13).await;

    let mut handles = vec![];
    for i in 0..40 {
        let workflow = system.workflow.clone();
        let owner = Identity::user(format!("customer{i}"));
        handles.push(tokio::spawn(async move {
            workflow
                .create_order(&owner, vec![line(widget, 1), line(gadget, 1)])
                .await
        }));
    }

    let mut placed = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            placed += 1;
        }
    }

    // Gadget runs out first; every order took exactly one of each
    assert_eq!(placed, 13);
    assert_eq!(stock(&system, gadget).await, 0);
    assert_eq!(stock(&system, widget).await, 7);
}

// --- Reads ---

#[tokio::test]
async fn test_foreign_read_is_unauthorized() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;

    // The order is cached by now; the check applies to cache hits too
    let err = system.workflow.get_order(order.id, &bob()).await.unwrap_err();
    assert_eq!(err, OrderError::UnauthorizedOrderAccess(order.id));

    assert!(system.workflow.get_order(order.id, &admin()).await.is_ok());
}

#[tokio::test]
async fn test_foreign_read_is_unauthorized_without_cache() {
    let config = WorkflowConfig {
        cache_enabled: false,
        ..Default::default()
    };
    let system = OrderSystem::new(config);
    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;

    let err = system.workflow.get_order(order.id, &bob()).await.unwrap_err();
    assert_eq!(err, OrderError::UnauthorizedOrderAccess(order.id));
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let err = system
        .workflow
        .get_order(OrderId(42), &admin())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::OrderNotFound(OrderId(42)));
}

#[tokio::test]
async fn test_get_order_is_idempotent() {
    for cache_enabled in [true, false] {
        let config = WorkflowConfig {
            cache_enabled,
            ..Default::default()
        };
        let system = OrderSystem::new(config);
        let product = seed(&system, "Widget", 10, 5).await;
        let order = place(&system, &alice(), vec![line(product, 2)]).await;

        let first = system.workflow.get_order(order.id, &alice()).await.unwrap();
        let second = system.workflow.get_order(order.id, &alice()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, order);
    }
}

#[tokio::test]
async fn test_list_orders_only_shows_own_orders() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 100).await;
    place(&system, &alice(), vec![line(product, 1)]).await;
    place(&system, &bob(), vec![line(product, 2)]).await;
    place(&system, &alice(), vec![line(product, 3)]).await;

    let mine = system
        .workflow
        .list_orders(&alice(), &OrderFilter::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|order| order.owner == "alice"));

    let everything = system
        .workflow
        .list_orders(&admin(), &OrderFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);

    let nobody = system
        .workflow
        .list_orders(&Identity::user("carol"), &OrderFilter::default())
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_list_orders_filters() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 100).await;
    let small = place(&system, &alice(), vec![line(product, 1)]).await; // 10
    let medium = place(&system, &alice(), vec![line(product, 5)]).await; // 50
    let large = place(&system, &alice(), vec![line(product, 9)]).await; // 90
    system.workflow.cancel_order(large.id, &alice()).await.unwrap();

    let ids = |orders: Vec<Order>| orders.into_iter().map(|o| o.id).collect::<Vec<_>>();

    let pending = OrderFilter {
        status: Some(OrderStatus::Pending),
        ..Default::default()
    };
    let listed = system.workflow.list_orders(&alice(), &pending).await.unwrap();
    assert_eq!(ids(listed), vec![small.id, medium.id]);

    let priced = OrderFilter {
        status: None,
        min_price: Some(50),
        max_price: Some(90),
    };
    let listed = system.workflow.list_orders(&alice(), &priced).await.unwrap();
    assert_eq!(ids(listed), vec![medium.id, large.id]);

    let nothing = OrderFilter {
        min_price: Some(1000),
        ..Default::default()
    };
    assert!(system
        .workflow
        .list_orders(&alice(), &nothing)
        .await
        .unwrap()
        .is_empty());
}

// --- Updates ---

#[tokio::test]
async fn test_update_line_items_rebalances_stock() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let widget = seed(&system, "Widget", 100, 10).await;
    let gadget = seed(&system, "Gadget", 20, 10).await;
    let order = place(&system, &alice(), vec![line(widget, 4)]).await;
    assert_eq!(stock(&system, widget).await, 6);

    let updated = system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: None,
                line_items: Some(vec![line(widget, 10), line(gadget, 2)]),
            },
            &alice(),
        )
        .await
        .unwrap();

    assert_eq!(updated.total_price, 1040);
    assert_eq!(stock(&system, widget).await, 0);
    assert_eq!(stock(&system, gadget).await, 8);
}

#[tokio::test]
async fn test_update_beyond_stock_changes_nothing() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let widget = seed(&system, "Widget", 100, 10).await;
    let order = place(&system, &alice(), vec![line(widget, 4)]).await;

    let err = system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: None,
                line_items: Some(vec![line(widget, 11)]),
            },
            &alice(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderError::InsufficientStock {
            product_id: widget,
            available: 10,
        }
    );
    assert_eq!(stock(&system, widget).await, 6);
    let stored = system.workflow.get_order(order.id, &alice()).await.unwrap();
    assert_eq!(stored, order);
}

#[tokio::test]
async fn test_update_requires_owner_or_admin() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;

    let confirm = OrderChanges {
        status: Some(OrderStatus::Confirmed),
        line_items: None,
    };
    let err = system
        .workflow
        .update_order(order.id, confirm.clone(), &bob())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::UnauthorizedOrderAccess(order.id));

    let confirmed = system
        .workflow
        .update_order(order.id, confirm, &admin())
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    let err = system
        .workflow
        .update_order(OrderId(99), OrderChanges::default(), &admin())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::OrderNotFound(OrderId(99)));
}

#[tokio::test]
async fn test_update_refreshes_cache_and_audits_status() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;
    let mut audit = system.workflow.subscribe_status_changes();

    system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Confirmed),
                line_items: None,
            },
            &admin(),
        )
        .await
        .unwrap();

    let change = audit.recv().await.unwrap();
    assert_eq!(change.order_id, order.id);
    assert_eq!(change.from, OrderStatus::Pending);
    assert_eq!(change.to, OrderStatus::Confirmed);
    assert_eq!(change.changed_by, "root");

    let fetched = system.workflow.get_order(order.id, &alice()).await.unwrap();
    assert_eq!(fetched.status, OrderStatus::Confirmed);

    // Items-only updates are not status changes
    system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: None,
                line_items: Some(vec![line(product, 2)]),
            },
            &alice(),
        )
        .await
        .unwrap();
    assert!(audit.try_recv().is_err());
}

#[tokio::test]
async fn test_forbidden_transitions() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;
    system.workflow.cancel_order(order.id, &alice()).await.unwrap();

    let revive = OrderChanges {
        status: Some(OrderStatus::Pending),
        line_items: None,
    };
    let err = system
        .workflow
        .update_order(order.id, revive, &admin())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidStatusTransition {
            order_id: order.id,
            from: OrderStatus::Cancelled,
            to: OrderStatus::Pending,
        }
    );

    let edit = OrderChanges {
        status: None,
        line_items: Some(vec![line(product, 1)]),
    };
    let err = system
        .workflow
        .update_order(order.id, edit, &alice())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));
    assert_eq!(stock(&system, product).await, 4);
}

// --- Cancellation ---

#[tokio::test]
async fn test_cancel_keeps_total_and_stock_by_default() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 100, 10).await;
    let order = place(&system, &alice(), vec![line(product, 3)]).await;
    let mut audit = system.workflow.subscribe_status_changes();

    let cancelled = system.workflow.cancel_order(order.id, &alice()).await.unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.total_price, order.total_price);
    assert_eq!(stock(&system, product).await, 7);

    let change = audit.recv().await.unwrap();
    assert_eq!((change.from, change.to), (OrderStatus::Pending, OrderStatus::Cancelled));

    let fetched = system.workflow.get_order(order.id, &alice()).await.unwrap();
    assert_eq!(fetched.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_confirmed_order_and_cancel_twice() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 100, 10).await;
    let order = place(&system, &alice(), vec![line(product, 1)]).await;
    system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Confirmed),
                line_items: None,
            },
            &admin(),
        )
        .await
        .unwrap();

    let mut audit = system.workflow.subscribe_status_changes();
    let first = system.workflow.cancel_order(order.id, &alice()).await.unwrap();
    let second = system.workflow.cancel_order(order.id, &alice()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(audit.recv().await.unwrap().from, OrderStatus::Confirmed);
    assert!(audit.try_recv().is_err());

    let err = system.workflow.cancel_order(order.id, &bob()).await.unwrap_err();
    assert_eq!(err, OrderError::UnauthorizedOrderAccess(order.id));
}

#[tokio::test]
async fn test_restock_on_cancel_returns_stock_once() {
    let config = WorkflowConfig {
        restock_on_cancel: true,
        ..Default::default()
    };
    let system = OrderSystem::new(config);
    let product = seed(&system, "Widget", 100, 10).await;
    let order = place(&system, &alice(), vec![line(product, 4)]).await;
    assert_eq!(stock(&system, product).await, 6);

    system.workflow.cancel_order(order.id, &alice()).await.unwrap();
    assert_eq!(stock(&system, product).await, 10);

    system.workflow.cancel_order(order.id, &alice()).await.unwrap();
    let via_update = system
        .workflow
        .update_order(
            order.id,
            OrderChanges {
                status: Some(OrderStatus::Cancelled),
                line_items: None,
            },
            &alice(),
        )
        .await
        .unwrap();
    assert_eq!(via_update.status, OrderStatus::Cancelled);
    assert_eq!(stock(&system, product).await, 10);
}

// --- Identity directory ---

#[tokio::test]
async fn test_registered_users_become_identities() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let root = system
        .users
        .register(UserCreate::admin("root", "root@example.com"))
        .await
        .unwrap();
    let alice = system
        .users
        .register(UserCreate::customer("alice", "alice@example.com"))
        .await
        .unwrap();

    let duplicate = system
        .users
        .register(UserCreate::customer("alice", "other@example.com"))
        .await;
    assert_eq!(duplicate, Err(UserError::AlreadyExists("alice".into())));

    let admin = system.users.identity(root.id).await.unwrap();
    let customer = system.users.identity(alice.id).await.unwrap();
    assert!(admin.is_admin);
    assert_eq!(customer, Identity::user("alice"));

    let product = seed(&system, "Widget", 10, 5).await;
    let order = place(&system, &customer, vec![line(product, 1)]).await;
    assert_eq!(order.owner, "alice");
    assert!(system.workflow.get_order(order.id, &admin).await.is_ok());

    let found = system.users.find_by_username("alice").await.unwrap();
    assert_eq!(found.map(|user| user.id), Some(alice.id));
}

#[tokio::test]
async fn test_shutdown_completes() {
    let system = OrderSystem::new(WorkflowConfig::default());
    let product = seed(&system, "Widget", 10, 5).await;
    place(&system, &alice(), vec![line(product, 1)]).await;

    system.shutdown().await.expect("Shutdown failed");
}
