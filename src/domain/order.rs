use std::collections::BTreeMap;
use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::limits::{check_length, NAME_MAX_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A buyer-submitted cart. Buyers are not users of this service.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub lines: Vec<CartLine>,
}

/// A validated cart with one consolidated quantity per product, in product id
/// order.
#[derive(Debug, Clone)]
pub struct Cart {
    pub customer_name: String,
    pub customer_email: String,
    pub items: BTreeMap<Uuid, i32>,
}

impl NewOrder {
    /// Checks the input contract and folds duplicate product entries into a
    /// single quantity per product.
    pub fn consolidate(&self) -> Result<Cart, DomainError> {
        if self.customer_name.trim().is_empty() || self.customer_email.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Customer name and email are required".to_string(),
            ));
        }
        check_length("customerName", self.customer_name.trim(), NAME_MAX_CHARS)?;
        check_length("customerEmail", self.customer_email.trim(), NAME_MAX_CHARS)?;
        if self.lines.is_empty() {
            return Err(DomainError::InvalidInput(
                "Order must contain at least one product".to_string(),
            ));
        }

        let mut items = BTreeMap::new();
        for line in &self.lines {
            if line.quantity <= 0 {
                return Err(DomainError::InvalidInput(format!(
                    "invalid count for product ID {}",
                    line.product_id
                )));
            }
            let total: &mut i32 = items.entry(line.product_id).or_insert(0);
            *total = total.checked_add(line.quantity).ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "count for product ID {} is too large",
                    line.product_id
                ))
            })?;
        }
        Ok(Cart {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            items,
        })
    }
}

/// Order metadata without any line items.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One recorded line item together with the product it refers to.
#[derive(Debug, Clone)]
pub struct SoldLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// An order as one seller sees it: only that seller's lines, and a total over
/// those lines alone.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub summary: OrderSummary,
    pub total: BigDecimal,
    pub lines: Vec<OrderLineView>,
}

impl OrderView {
    pub fn for_seller(summary: OrderSummary, lines: Vec<SoldLine>, seller_id: Uuid) -> Self {
        let lines: Vec<OrderLineView> = lines
            .into_iter()
            .filter(|l| l.seller_id == seller_id)
            .map(|l| OrderLineView {
                product_id: l.product_id,
                product_name: l.product_name,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();

        let total = lines.iter().fold(BigDecimal::from(0), |acc, l| {
            acc + &l.unit_price * &BigDecimal::from(l.quantity)
        });

        Self {
            summary,
            total,
            lines,
        }
    }
}
