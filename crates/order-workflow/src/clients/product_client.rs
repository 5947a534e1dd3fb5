//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog administration plus the
//! stock operations the order workflow builds on.
//!
//! Multi-line stock movements ([`ProductClient::reserve_all`],
//! [`ProductClient::release_all`], [`ProductClient::rebalance`]) are sent as one
//! `Transact` request, so they either apply to every line or to none.
use crate::model::{Identity, LineItem, LineItemRequest, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.entity_error::<ProductError>() {
            Some(err) => err.clone(),
            None => ProductError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl ProductClient {
    /// Adds a product to the catalog. Administrators only.
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        identity: &Identity,
        params: ProductCreate,
    ) -> Result<Product, ProductError> {
        require_admin(identity, "create products")?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Renames or reprices a product. Administrators only.
    ///
    /// Orders placed earlier keep the unit price captured at reservation.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        identity: &Identity,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        require_admin(identity, "update products")?;
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| single_error(e, id))
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(|e| single_error(e, id))?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserves every line at once and returns them with captured unit prices.
    ///
    /// # Errors
    /// - `NotFound(id)` for the first unknown product
    /// - `InsufficientStock` for the first line that cannot be covered
    ///
    /// On error no stock has moved.
    #[instrument(skip(self))]
    pub async fn reserve_all(&self, lines: &[LineItemRequest]) -> Result<Vec<LineItem>, ProductError> {
        debug!(lines = lines.len(), "Reserving stock");
        let steps = lines
            .iter()
            .map(|line| (line.product_id, ProductAction::Reserve(line.quantity)))
            .collect();
        let results = self.transact(steps).await?;
        priced(lines, results)
    }

    /// Returns every line's quantity to stock at once.
    #[instrument(skip(self))]
    pub async fn release_all(&self, lines: &[LineItem]) -> Result<(), ProductError> {
        debug!(lines = lines.len(), "Releasing stock");
        let steps = lines
            .iter()
            .map(|line| (line.product_id, ProductAction::Release(line.quantity)))
            .collect();
        self.transact(steps).await.map(|_| ())
    }

    /// Releases `release` and reserves `reserve` in one transaction.
    ///
    /// Releases run first, so a product appearing on both sides can be re-reserved
    /// up to its old quantity plus whatever is still in stock.
    #[instrument(skip(self))]
    pub async fn rebalance(
        &self,
        release: &[LineItem],
        reserve: &[LineItemRequest],
    ) -> Result<Vec<LineItem>, ProductError> {
        debug!(release = release.len(), reserve = reserve.len(), "Rebalancing stock");
        let steps = release
            .iter()
            .map(|line| (line.product_id, ProductAction::Release(line.quantity)))
            .chain(
                reserve
                    .iter()
                    .map(|line| (line.product_id, ProductAction::Reserve(line.quantity))),
            )
            .collect();
        let mut results = self.transact(steps).await?;
        let reserved = results.split_off(release.len());
        priced(reserve, reserved)
    }

    async fn transact(
        &self,
        steps: Vec<(ProductId, ProductAction)>,
    ) -> Result<Vec<ProductActionResult>, ProductError> {
        let ids: Vec<ProductId> = steps.iter().map(|(id, _)| *id).collect();
        self.inner
            .transact(steps)
            .await
            .map_err(|e| transaction_error(e, &ids))
    }
}

fn require_admin(identity: &Identity, what: &str) -> Result<(), ProductError> {
    if identity.is_admin {
        Ok(())
    } else {
        Err(ProductError::Forbidden(format!(
            "{} may not {what}",
            identity.subject
        )))
    }
}

/// Maps an error from a request addressed to one product.
fn single_error(e: FrameworkError, id: ProductId) -> ProductError {
    match e {
        FrameworkError::NotFound(_) => ProductError::NotFound(id),
        other => ProductClient::map_error(other),
    }
}

/// Maps a transaction error back to the step that caused it.
fn transaction_error(e: FrameworkError, ids: &[ProductId]) -> ProductError {
    match e {
        FrameworkError::NotFound(missing) => ids
            .iter()
            .find(|id| id.to_string() == missing)
            .map(|id| ProductError::NotFound(*id))
            .unwrap_or_else(|| {
                ProductError::ActorCommunicationError(format!("Item not found: {missing}"))
            }),
        other => ProductClient::map_error(other),
    }
}

fn priced(
    lines: &[LineItemRequest],
    results: Vec<ProductActionResult>,
) -> Result<Vec<LineItem>, ProductError> {
    lines
        .iter()
        .zip(results)
        .map(|(line, result)| match result {
            ProductActionResult::Reserve { unit_price } => Ok(LineItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price,
            }),
            other => Err(unexpected(other)),
        })
        .collect()
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}
