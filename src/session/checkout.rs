use crate::api::request::{CheckoutDetails, PlaceOrderRequest};
use crate::api::response::{ActionResponse, OrderReceipt};
use crate::services::errors::ServiceError;
use crate::session::cart::CartStore;
use crate::session::storage::SnapshotStorage;
use bigdecimal::BigDecimal;
use std::future::Future;

/// Flat delivery charge added to every order.
pub const SHIPPING_FEE: u32 = 5000;

pub fn order_total<S: SnapshotStorage>(cart: &CartStore<S>) -> BigDecimal {
    cart.total() + BigDecimal::from(SHIPPING_FEE)
}

pub fn build_order<S: SnapshotStorage>(
    cart: &CartStore<S>,
    details: CheckoutDetails,
) -> PlaceOrderRequest {
    PlaceOrderRequest {
        details,
        cart_items: cart.items().to_vec(),
        cart_total: order_total(cart),
    }
}

/// Sends the cart to `submit` and empties it once the order is accepted.
/// A rejected order leaves the cart as it was.
pub async fn submit_checkout<S, F, Fut>(
    cart: &mut CartStore<S>,
    details: CheckoutDetails,
    submit: F,
) -> Result<ActionResponse<OrderReceipt>, ServiceError>
where
    S: SnapshotStorage,
    F: FnOnce(PlaceOrderRequest) -> Fut,
    Fut: Future<Output = Result<ActionResponse<OrderReceipt>, ServiceError>>,
{
    if cart.is_empty() {
        return Err(ServiceError::validation("Your cart is empty."));
    }

    let response = submit(build_order(cart, details)).await?;

    if response.success {
        cart.clear();
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::MemorySnapshots;

    #[test]
    fn empty_cart_still_pays_shipping() {
        let cart = CartStore::load(MemorySnapshots::new());
        assert_eq!(order_total(&cart), BigDecimal::from(5000));
        assert!(build_order(&cart, CheckoutDetails::default()).cart_items.is_empty());
    }
}
