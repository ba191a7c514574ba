use crate::data::models::product::Product;
use crate::session::cart::CartItem;
use serde::Serialize;

/// A toast shown after a store changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(title: &str, description: String) -> Self {
        Notification {
            title: title.to_string(),
            description,
        }
    }
}

fn units(items: &[CartItem]) -> u64 {
    items.iter().map(|i| u64::from(i.quantity)).sum()
}

/// Compares two cart snapshots. More units means the first new or grown line
/// was added; fewer means the first vanished or shrunk line was removed.
pub fn cart_transition(previous: &[CartItem], next: &[CartItem]) -> Option<Notification> {
    let (before, after) = (units(previous), units(next));

    if after > before {
        next.iter()
            .find(|item| {
                previous
                    .iter()
                    .find(|p| p.product.id == item.product.id)
                    .map_or(true, |p| item.quantity > p.quantity)
            })
            .map(|item| {
                Notification::new(
                    "Added to cart",
                    format!("{} has been added to your cart.", item.product.name),
                )
            })
    } else if after < before {
        previous
            .iter()
            .find(|item| {
                next.iter()
                    .find(|n| n.product.id == item.product.id)
                    .map_or(true, |n| item.quantity > n.quantity)
            })
            .map(|item| {
                Notification::new(
                    "Removed from cart",
                    format!("{} has been removed from your cart.", item.product.name),
                )
            })
    } else {
        None
    }
}

pub fn wishlist_transition(previous: &[Product], next: &[Product]) -> Option<Notification> {
    if next.len() > previous.len() {
        next.iter()
            .find(|p| !previous.iter().any(|prev| prev.id == p.id))
            .map(|p| {
                Notification::new(
                    "Added to wishlist",
                    format!("{} has been added to your wishlist.", p.name),
                )
            })
    } else if next.len() < previous.len() {
        previous
            .iter()
            .find(|p| !next.iter().any(|curr| curr.id == p.id))
            .map(|p| {
                Notification::new(
                    "Removed from wishlist",
                    format!("{} has been removed from your wishlist.", p.name),
                )
            })
    } else {
        None
    }
}
