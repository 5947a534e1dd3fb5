use super::StatusChange;
use crate::cache::OrderCache;
use crate::clients::{OrderClient, ProductClient};
use crate::config::WorkflowConfig;
use crate::model::{
    Identity, LineItem, LineItemRequest, Order, OrderChanges, OrderCreate, OrderId, OrderStatus,
    OrderUpdate, OrderView,
};
use crate::order_actor::OrderError;
use chrono::Utc;
use resource_actor::ActorClient;
use std::sync::Arc;
use tokio::sync::{broadcast, OwnedRwLockWriteGuard, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Optional restrictions for [`OrderWorkflow::list_orders`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on the total price
    pub min_price: Option<u64>,
    /// Inclusive upper bound on the total price
    pub max_price: Option<u64>,
}

/// How an update moves stock before the order is persisted.
#[derive(Debug)]
enum StockMove {
    Keep,
    /// Release the current line items and reserve these instead
    Rebalance(Vec<LineItemRequest>),
    /// Return the current line items to stock
    Restock,
}

/// Orchestrates order creation, reads, updates and cancellation.
///
/// Cloning is cheap; clones share the stores, the cache and the audit channel.
///
/// Updates and cancellations hold `commits` exclusively, so each one moves stock
/// relative to the order state it read. Creations and store reads hold it shared
/// from the store call until their cache write, so a view read before a write
/// committed can never land in the cache after that write's view.
#[derive(Clone)]
pub struct OrderWorkflow {
    products: ProductClient,
    orders: OrderClient,
    cache: Arc<dyn OrderCache>,
    audit: broadcast::Sender<StatusChange>,
    commits: Arc<RwLock<()>>,
    restock_on_cancel: bool,
}

impl OrderWorkflow {
    pub fn new(
        products: ProductClient,
        orders: OrderClient,
        cache: Arc<dyn OrderCache>,
        config: &WorkflowConfig,
    ) -> Self {
        let (audit, _) = broadcast::channel(config.audit_capacity);
        Self {
            products,
            orders,
            cache,
            audit,
            commits: Arc::new(RwLock::new(())),
            restock_on_cancel: config.restock_on_cancel,
        }
    }

    /// Receives every status change made from now on.
    pub fn subscribe_status_changes(&self) -> broadcast::Receiver<StatusChange> {
        self.audit.subscribe()
    }

    /// Reserves stock for `items` and persists a Pending order owned by `owner`.
    ///
    /// Duplicate products are merged by summing their quantities, keeping the
    /// position of the first occurrence.
    ///
    /// # Errors
    /// - `ValidationError` for an empty request or a zero quantity
    /// - `ProductNotFound` / `InsufficientStock` when the reservation fails; no
    ///   stock has moved in that case
    #[instrument(skip(self, owner, items), fields(owner = %owner.subject, lines = items.len()))]
    pub async fn create_order(
        &self,
        owner: &Identity,
        items: Vec<LineItemRequest>,
    ) -> Result<Order, OrderError> {
        let lines = normalize(items)?;
        let workflow = self.clone();
        let owner = owner.subject.clone();
        join(tokio::spawn(
            async move {
                let _shared = workflow.commits.clone().read_owned().await;
                workflow.commit_create(owner, lines).await
            }
            .in_current_span(),
        ))
        .await
    }

    /// Returns the order if `requester` owns it or is an administrator.
    ///
    /// Reads the cache first and falls back to the store, filling the cache on a
    /// store hit. Authorization is checked on both paths.
    #[instrument(skip(self, requester), fields(requester = %requester.subject))]
    pub async fn get_order(&self, id: OrderId, requester: &Identity) -> Result<Order, OrderError> {
        if let Some(view) = self.cache_get(id).await {
            authorize(requester, &view.owner_identity, id)?;
            return Ok(Order::from(view));
        }

        let _shared = self.commits.read().await;
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;
        authorize(requester, &order.owner, id)?;
        self.cache_put(&order).await;
        Ok(order)
    }

    /// Lists the orders visible to `requester`, narrowed by `filter`.
    ///
    /// Filters apply in a fixed order: ownership (skipped for administrators),
    /// status, minimum price, maximum price. Every order read is cached.
    #[instrument(skip(self, requester), fields(requester = %requester.subject))]
    pub async fn list_orders(
        &self,
        requester: &Identity,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = {
            let _shared = self.commits.read().await;
            let orders = self.orders.list().await?;
            for order in &orders {
                self.cache_put(order).await;
            }
            orders
        };

        let visible: Vec<Order> = orders
            .into_iter()
            .filter(|order| requester.may_access(&order.owner))
            .filter(|order| filter.status.map_or(true, |status| order.status == status))
            .filter(|order| filter.min_price.map_or(true, |min| order.total_price >= min))
            .filter(|order| filter.max_price.map_or(true, |max| order.total_price <= max))
            .collect();
        debug!(count = visible.len(), "Orders listed");
        Ok(visible)
    }

    /// Changes an order's status and/or replaces its line items.
    ///
    /// New line items go through the same reservation as creation: the old
    /// reservation is released and the new one taken in one transaction.
    ///
    /// # Errors
    /// - `OrderNotFound`, `UnauthorizedOrderAccess`
    /// - `InvalidStatusTransition` if the state machine forbids the change
    /// - `ValidationError` for invalid line items, or line items on a cancelled order
    /// - `ProductNotFound` / `InsufficientStock` from the re-reservation
    #[instrument(skip(self, requester), fields(requester = %requester.subject))]
    pub async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
        requester: &Identity,
    ) -> Result<Order, OrderError> {
        let guard = self.commits.clone().write_owned().await;
        let current = self.load_authorized(id, requester).await?;

        let target = changes.status.unwrap_or(current.status);
        if !current.status.can_transition_to(target) {
            return Err(OrderError::InvalidStatusTransition {
                order_id: id,
                from: current.status,
                to: target,
            });
        }

        let stock = match changes.line_items {
            Some(_) if target == OrderStatus::Cancelled => {
                return Err(OrderError::ValidationError(
                    "line items of a cancelled order cannot change".into(),
                ))
            }
            Some(items) => StockMove::Rebalance(normalize(items)?),
            None if self.restocks(current.status, target) => StockMove::Restock,
            None => StockMove::Keep,
        };

        self.spawn_update(guard, current, changes.status, stock, requester)
            .await
    }

    /// Cancels an order. Cancelling a cancelled order changes nothing.
    ///
    /// Stock returns to the catalog only when `restock_on_cancel` is configured,
    /// and only on the transition into `Cancelled`.
    #[instrument(skip(self, requester), fields(requester = %requester.subject))]
    pub async fn cancel_order(&self, id: OrderId, requester: &Identity) -> Result<Order, OrderError> {
        let guard = self.commits.clone().write_owned().await;
        let current = self.load_authorized(id, requester).await?;
        if current.status == OrderStatus::Cancelled {
            debug!("Order already cancelled");
            return Ok(current);
        }

        let stock = if self.restocks(current.status, OrderStatus::Cancelled) {
            StockMove::Restock
        } else {
            StockMove::Keep
        };
        self.spawn_update(guard, current, Some(OrderStatus::Cancelled), stock, requester)
            .await
    }

    fn restocks(&self, from: OrderStatus, to: OrderStatus) -> bool {
        self.restock_on_cancel && from != OrderStatus::Cancelled && to == OrderStatus::Cancelled
    }

    /// Authoritative read for writes; never served from the cache.
    async fn load_authorized(&self, id: OrderId, requester: &Identity) -> Result<Order, OrderError> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;
        authorize(requester, &order.owner, id)?;
        Ok(order)
    }

    async fn spawn_update(
        &self,
        guard: OwnedRwLockWriteGuard<()>,
        current: Order,
        status: Option<OrderStatus>,
        stock: StockMove,
        requester: &Identity,
    ) -> Result<Order, OrderError> {
        let workflow = self.clone();
        let changed_by = requester.subject.clone();
        join(tokio::spawn(
            async move {
                let _guard = guard;
                workflow
                    .commit_update(current, status, stock, changed_by)
                    .await
            }
            .in_current_span(),
        ))
        .await
    }

    async fn commit_create(
        &self,
        owner: String,
        lines: Vec<LineItemRequest>,
    ) -> Result<Order, OrderError> {
        let reserved = self.products.reserve_all(&lines).await?;

        let params = OrderCreate {
            owner,
            line_items: reserved.clone(),
        };
        let order = match self.orders.create_order(params).await {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, "Persisting order failed, releasing reservation");
                if let Err(undo) = self.products.release_all(&reserved).await {
                    error!(error = %undo, "Compensation failed, stock remains reserved");
                }
                return Err(e);
            }
        };

        info!(order_id = %order.id, total = order.total_price, "Order created");
        self.cache_put(&order).await;
        Ok(order)
    }

    async fn commit_update(
        &self,
        current: Order,
        status: Option<OrderStatus>,
        stock: StockMove,
        changed_by: String,
    ) -> Result<Order, OrderError> {
        let line_items = match &stock {
            StockMove::Rebalance(lines) => {
                Some(self.products.rebalance(&current.line_items, lines).await?)
            }
            StockMove::Restock => {
                self.products.release_all(&current.line_items).await?;
                None
            }
            StockMove::Keep => None,
        };

        let update = OrderUpdate {
            status,
            line_items: line_items.clone(),
        };
        let order = match self.orders.update_order(current.id, update).await {
            Ok(order) => order,
            Err(e) => {
                warn!(order_id = %current.id, error = %e, "Persisting update failed, restoring stock");
                let previous = requests(&current.line_items);
                let undo = match (&stock, &line_items) {
                    (StockMove::Rebalance(_), Some(reserved)) => {
                        self.products.rebalance(reserved, &previous).await.map(drop)
                    }
                    (StockMove::Restock, _) => self.products.reserve_all(&previous).await.map(drop),
                    _ => Ok(()),
                };
                if let Err(undo) = undo {
                    error!(order_id = %current.id, error = %undo, "Compensation failed");
                }
                return Err(e);
            }
        };

        info!(order_id = %order.id, total = order.total_price, "Order updated");
        self.cache_put(&order).await;
        if order.status != current.status {
            self.emit(StatusChange {
                order_id: order.id,
                from: current.status,
                to: order.status,
                changed_by,
                at: Utc::now(),
            });
        }
        Ok(order)
    }

    fn emit(&self, change: StatusChange) {
        info!(
            order_id = %change.order_id,
            from = %change.from,
            to = %change.to,
            changed_by = %change.changed_by,
            "Order status changed"
        );
        // Sending only fails when nobody is subscribed
        let _ = self.audit.send(change);
    }

    async fn cache_get(&self, id: OrderId) -> Option<OrderView> {
        match self.cache.get(id).await {
            Ok(view) => view,
            Err(e) => {
                warn!(order_id = %id, error = %e, "Cache read failed");
                None
            }
        }
    }

    async fn cache_put(&self, order: &Order) {
        if let Err(e) = self.cache.put(&OrderView::from(order)).await {
            warn!(order_id = %order.id, error = %e, "Cache write failed");
        }
    }
}

async fn join(task: JoinHandle<Result<Order, OrderError>>) -> Result<Order, OrderError> {
    task.await
        .map_err(|e| OrderError::ActorCommunicationError(format!("commit task failed: {e}")))?
}

fn authorize(requester: &Identity, owner: &str, id: OrderId) -> Result<(), OrderError> {
    if requester.may_access(owner) {
        Ok(())
    } else {
        warn!(order_id = %id, requester = %requester.subject, "Unauthorized order access");
        Err(OrderError::UnauthorizedOrderAccess(id))
    }
}

/// Validates a request and merges repeated products.
fn normalize(items: Vec<LineItemRequest>) -> Result<Vec<LineItemRequest>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::ValidationError(
            "an order needs at least one line item".into(),
        ));
    }

    let mut lines: Vec<LineItemRequest> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be positive",
                item.product_id
            )));
        }
        match lines.iter_mut().find(|line| line.product_id == item.product_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(item.quantity).ok_or_else(|| {
                    OrderError::ValidationError(format!("quantity for {} overflows", item.product_id))
                })?
            }
            None => lines.push(item),
        }
    }
    Ok(lines)
}

fn requests(items: &[LineItem]) -> Vec<LineItemRequest> {
    items.iter().map(LineItemRequest::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn line(product: u32, quantity: u32) -> LineItemRequest {
        LineItemRequest::new(ProductId(product), quantity)
    }

    #[test]
    fn test_normalize_merges_duplicates_in_first_seen_order() {
        let lines = normalize(vec![line(2, 1), line(1, 3), line(2, 4)]).unwrap();
        assert_eq!(lines, vec![line(2, 5), line(1, 3)]);
    }

    #[test]
    fn test_normalize_rejects_empty_and_zero() {
        assert!(matches!(normalize(vec![]), Err(OrderError::ValidationError(_))));
        assert!(matches!(
            normalize(vec![line(1, 1), line(2, 0)]),
            Err(OrderError::ValidationError(_))
        ));
        assert!(matches!(
            normalize(vec![line(1, u32::MAX), line(1, 1)]),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn test_authorize_owner_or_admin() {
        assert!(authorize(&Identity::user("alice"), "alice", OrderId(1)).is_ok());
        assert!(authorize(&Identity::admin("root"), "alice", OrderId(1)).is_ok());
        assert_eq!(
            authorize(&Identity::user("bob"), "alice", OrderId(1)),
            Err(OrderError::UnauthorizedOrderAccess(OrderId(1)))
        );
    }
}
