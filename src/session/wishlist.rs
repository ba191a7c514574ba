use crate::data::models::product::Product;
use crate::session::notification::{wishlist_transition, Notification};
use crate::session::storage::{load_snapshot, save_snapshot, SnapshotStorage, WISHLIST_KEY};

/// Saved products, without duplicates.
pub struct WishlistStore<S: SnapshotStorage> {
    storage: S,
    items: Vec<Product>,
}

impl<S: SnapshotStorage> WishlistStore<S> {
    pub fn load(storage: S) -> Self {
        let items = load_snapshot(&storage, WISHLIST_KEY);
        WishlistStore { storage, items }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn add(&mut self, product: &Product) -> Option<Notification> {
        if self.contains(&product.id) {
            return None;
        }
        self.transition(|items| items.push(product.clone()))
    }

    pub fn remove(&mut self, product_id: &str) -> Option<Notification> {
        self.transition(|items| items.retain(|p| p.id != product_id))
    }

    /// Adds the product when absent, removes it otherwise.
    pub fn toggle(&mut self, product: &Product) -> Option<Notification> {
        if self.contains(&product.id) {
            self.remove(&product.id)
        } else {
            self.add(product)
        }
    }

    fn transition(&mut self, change: impl FnOnce(&mut Vec<Product>)) -> Option<Notification> {
        let previous = self.items.clone();
        change(&mut self.items);

        save_snapshot(&self.storage, WISHLIST_KEY, &self.items);
        wishlist_transition(&previous, &self.items)
    }
}
