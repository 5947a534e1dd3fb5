//! [`ActorEntity`] implementation for the [`Product`] domain type.
//!
//! Includes the stock actions. Every action validates before it mutates, so a
//! failing action leaves the product exactly as it was.

use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let name = validate_name(params.name)?;
        Ok(Self {
            id,
            name,
            price: params.price,
            quantity: params.quantity,
        })
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`: Display name, must not be blank
    /// - `price`: Unit price for future reservations
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = validate_name(name)?;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::Reserve(amount) => {
                if amount > self.quantity {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: amount,
                        available: self.quantity,
                    });
                }
                self.quantity -= amount;
                Ok(ProductActionResult::Reserve {
                    unit_price: self.price,
                })
            }
            ProductAction::Release(amount) => {
                self.quantity = self.quantity.checked_add(amount).ok_or_else(|| {
                    ProductError::ValidationError(format!(
                        "releasing {amount} units would overflow stock of {}",
                        self.id
                    ))
                })?;
                Ok(ProductActionResult::Release {
                    available: self.quantity,
                })
            }
        }
    }
}

fn validate_name(name: String) -> Result<String, ProductError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        Err(ProductError::ValidationError("name must not be empty".into()))
    } else {
        Ok(name)
    }
}
