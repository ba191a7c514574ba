use crate::api::request::PlaceOrderRequest;
use crate::api::response::{ActionResponse, OrderReceipt};
use crate::services::errors::ServiceError;
use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

pub const PAYMENT_METHODS: [&str; 2] = ["cod", "card"];

/// Checkout capture. Orders are logged, not stored.
pub struct OrderService;

impl OrderService {
    pub fn new() -> Self {
        OrderService
    }

    pub fn validate(&self, request: &PlaceOrderRequest) -> Result<(), ServiceError> {
        let details = &request.details;
        let required = [
            (&details.first_name, "First name is required"),
            (&details.last_name, "Last name is required"),
            (&details.address, "Address is required"),
            (&details.city, "City is required"),
            (&details.phone, "Phone number is required"),
        ];

        if let Some((_, message)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
            return Err(ServiceError::validation(*message));
        }

        if !PAYMENT_METHODS.contains(&details.payment_method.trim()) {
            return Err(ServiceError::validation("Please select a payment method"));
        }

        if request.cart_items.is_empty() {
            return Err(ServiceError::validation("Your cart is empty."));
        }

        if let Some(item) = request.cart_items.iter().find(|i| i.quantity == 0) {
            return Err(ServiceError::validation(format!(
                "Quantity of {} must be at least 1.",
                item.product.name
            )));
        }

        if request.cart_total < BigDecimal::zero() {
            return Err(ServiceError::validation("Cart total cannot be negative."));
        }

        Ok(())
    }

    pub async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<ActionResponse<OrderReceipt>, ServiceError> {
        self.validate(&request)?;

        let order_id = Uuid::new_v4().to_string();
        let units: u64 = request
            .cart_items
            .iter()
            .map(|i| u64::from(i.quantity))
            .sum();

        tracing::info!(
            order_id = %order_id,
            customer = %format!("{} {}", request.details.first_name, request.details.last_name),
            city = %request.details.city,
            payment = %request.details.payment_method,
            lines = request.cart_items.len(),
            units,
            total = %request.cart_total,
            "Placing order"
        );

        Ok(ActionResponse::with_data(
            Some("Order placed successfully!"),
            OrderReceipt { order_id },
        ))
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
