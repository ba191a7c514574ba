mod common;

use bigdecimal::BigDecimal;
use common::product;
use demporium_server_lib::api::request::CheckoutDetails;
use demporium_server_lib::api::response::{ActionResponse, OrderReceipt};
use demporium_server_lib::services::errors::ServiceError;
use demporium_server_lib::services::order_service::OrderService;
use demporium_server_lib::session::cart::CartStore;
use demporium_server_lib::session::checkout::{submit_checkout, SHIPPING_FEE};
use demporium_server_lib::session::notification::Notification;
use demporium_server_lib::session::storage::{
    FileSnapshots, MemorySnapshots, SnapshotStorage, CART_KEY, WISHLIST_KEY,
};
use demporium_server_lib::session::wishlist::WishlistStore;
use tempfile::TempDir;

fn notice(title: &str, description: &str) -> Option<Notification> {
    Some(Notification {
        title: title.to_string(),
        description: description.to_string(),
    })
}

fn details() -> CheckoutDetails {
    CheckoutDetails {
        first_name: "Ayesha".to_string(),
        last_name: "Khan".to_string(),
        address: "12 Canal Road".to_string(),
        city: "Lahore".to_string(),
        phone: "0300-1234567".to_string(),
        payment_method: "cod".to_string(),
    }
}

#[test]
fn test_cart_transitions_and_totals() {
    let table = product("p1", "Oak Table", "Tables", 1000);
    let lamp = product("p2", "Brass Lamp", "Lighting", 250);
    let mut cart = CartStore::load(MemorySnapshots::new());

    assert_eq!(
        cart.add(&table, 2),
        notice("Added to cart", "Oak Table has been added to your cart.")
    );
    assert_eq!(
        cart.add(&lamp, 1),
        notice("Added to cart", "Brass Lamp has been added to your cart.")
    );
    assert_eq!(cart.add(&lamp, 0), None);

    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), BigDecimal::from(2250));

    assert_eq!(
        cart.update_quantity("p1", 1),
        notice("Removed from cart", "Oak Table has been removed from your cart.")
    );
    assert_eq!(cart.total(), BigDecimal::from(1250));

    assert_eq!(
        cart.update_quantity("p2", 0),
        notice("Removed from cart", "Brass Lamp has been removed from your cart.")
    );
    assert_eq!(cart.items().len(), 1);
    assert!(cart.items().iter().all(|i| i.quantity >= 1));
}

#[test]
fn test_adding_the_same_product_raises_quantity() {
    let table = product("p1", "Oak Table", "Tables", 1000);
    let mut cart = CartStore::load(MemorySnapshots::new());

    cart.add(&table, 1);
    cart.add(&table, 2);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[test]
fn test_cart_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let table = product("p1", "Oak Table", "Tables", 1000);

    {
        let mut cart = CartStore::load(FileSnapshots::new(dir.path()));
        cart.add(&table, 2);
    }

    let cart = CartStore::load(FileSnapshots::new(dir.path()));
    assert_eq!(cart.count(), 2);
    assert_eq!(cart.items()[0].product.name, "Oak Table");
    assert!(dir.path().join(format!("{}.json", CART_KEY)).exists());
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let storage = MemorySnapshots::new();
    storage.save(CART_KEY, "{not json").unwrap();
    storage.save(WISHLIST_KEY, "[1, 2").unwrap();

    assert!(CartStore::load(storage.clone()).is_empty());
    assert_eq!(WishlistStore::load(storage).count(), 0);
}

#[test]
fn test_wishlist_has_set_semantics() {
    let sofa = product("p1", "Velvet Sofa", "Sofas", 5000);
    let storage = MemorySnapshots::new();
    let mut wishlist = WishlistStore::load(storage.clone());

    assert_eq!(
        wishlist.add(&sofa),
        notice("Added to wishlist", "Velvet Sofa has been added to your wishlist.")
    );
    assert_eq!(wishlist.add(&sofa), None);
    assert_eq!(wishlist.count(), 1);
    assert!(wishlist.contains("p1"));

    assert_eq!(
        wishlist.toggle(&sofa),
        notice(
            "Removed from wishlist",
            "Velvet Sofa has been removed from your wishlist."
        )
    );
    assert!(!wishlist.contains("p1"));
    assert_eq!(WishlistStore::load(storage).count(), 0);
}

#[tokio::test]
async fn test_checkout_adds_shipping_and_clears_cart() {
    let mut cart = CartStore::load(MemorySnapshots::new());
    cart.add(&product("p1", "Oak Table", "Tables", 90000), 1);

    let mut submitted = None;
    let response = submit_checkout(&mut cart, details(), |order| {
        submitted = Some(order.clone());
        async move { OrderService::new().place_order(order).await }
    })
    .await
    .unwrap();

    assert!(response.success);
    assert!(cart.is_empty());

    let order = submitted.unwrap();
    assert_eq!(order.cart_items.len(), 1);
    assert_eq!(order.cart_total, BigDecimal::from(90000 + SHIPPING_FEE));
}

#[tokio::test]
async fn test_rejected_checkout_keeps_the_cart() {
    let mut cart = CartStore::load(MemorySnapshots::new());
    cart.add(&product("p1", "Oak Table", "Tables", 90000), 1);

    let result = submit_checkout(&mut cart, details(), |_| async {
        Err::<ActionResponse<OrderReceipt>, _>(ServiceError::Internal(
            "Something went wrong".to_string(),
        ))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(cart.count(), 1);
}

#[tokio::test]
async fn test_checkout_of_empty_cart_is_refused() {
    let mut cart = CartStore::load(MemorySnapshots::new());

    let result = submit_checkout(&mut cart, details(), |order| async move {
        OrderService::new().place_order(order).await
    })
    .await;

    assert_eq!(
        result.unwrap_err(),
        ServiceError::Validation("Your cart is empty.".to_string())
    );
}
