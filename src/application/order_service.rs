use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the cart before any storage access, then commits it in one
    /// transaction.
    pub fn place_order(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let cart = order.consolidate()?;
        let order_id = self.repo.place(&cart)?;
        log::info!(
            "Order {} placed with {} distinct product(s)",
            order_id,
            cart.items.len()
        );
        Ok(order_id)
    }

    pub fn get_order(&self, order_id: Uuid, seller_id: Uuid) -> Result<OrderView, DomainError> {
        self.repo
            .find_for_seller(order_id, seller_id)
            .inspect_err(|e| {
                if matches!(e, DomainError::Forbidden) {
                    log::warn!(
                        "User {} requested order {} without an ownership link",
                        seller_id,
                        order_id
                    );
                }
            })
    }

    /// Orders in which the seller has at least one line, newest first.
    pub fn list_orders(&self, seller_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let orders = self.repo.list_for_seller(seller_id)?;
        Ok(orders.into_iter().filter(|o| !o.lines.is_empty()).collect())
    }
}
