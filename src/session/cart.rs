use crate::data::models::product::Product;
use crate::session::notification::{cart_transition, Notification};
use crate::session::storage::{load_snapshot, save_snapshot, SnapshotStorage, CART_KEY};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product line in the cart. Serialized as the product's own fields plus
/// `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

/// Read through a `Value` so exact prices survive the flattened product.
impl TryFrom<Value> for CartItem {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let quantity = value
            .get("quantity")
            .cloned()
            .ok_or_else(|| serde::de::Error::missing_field("quantity"))?;

        Ok(CartItem {
            quantity: serde_json::from_value(quantity)?,
            product: serde_json::from_value(value)?,
        })
    }
}

impl CartItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.product.price * BigDecimal::from(self.quantity)
    }
}

/// The shopper's cart. Every change is persisted, then diffed against the
/// previous snapshot to produce the notification to show.
pub struct CartStore<S: SnapshotStorage> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: SnapshotStorage> CartStore<S> {
    pub fn load(storage: S) -> Self {
        let items = load_snapshot(&storage, CART_KEY);
        CartStore { storage, items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + item.line_total())
    }

    pub fn count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adding a product already in the cart raises its quantity. A zero
    /// quantity changes nothing.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Option<Notification> {
        if quantity == 0 {
            return None;
        }

        self.transition(|items| {
            match items.iter_mut().find(|i| i.product.id == product.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
                None => items.push(CartItem {
                    product: product.clone(),
                    quantity,
                }),
            }
        })
    }

    pub fn remove(&mut self, product_id: &str) -> Option<Notification> {
        self.transition(|items| items.retain(|i| i.product.id != product_id))
    }

    /// Quantities at or below zero remove the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Option<Notification> {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.transition(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.product.id == product_id) {
                item.quantity = quantity;
            }
        })
    }

    pub fn clear(&mut self) -> Option<Notification> {
        self.transition(Vec::clear)
    }

    fn transition(&mut self, change: impl FnOnce(&mut Vec<CartItem>)) -> Option<Notification> {
        let previous = self.items.clone();
        change(&mut self.items);

        save_snapshot(&self.storage, CART_KEY, &self.items);
        cart_transition(&previous, &self.items)
    }
}
