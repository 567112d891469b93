use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::order::{OrderSummary, SoldLine};
use crate::domain::product::Product;
use crate::domain::storefront::StorefrontLink;
use crate::schema::{order_lines, order_owners, orders, products, storefront_links};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for OrderSummary {
    fn from(o: OrderRow) -> Self {
        OrderSummary {
            id: o.id,
            customer_name: o.customer_name,
            customer_email: o.customer_email,
            status: o.status,
            tracking_number: o.tracking_number,
            created_at: o.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = order_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl OrderLineRow {
    /// Pairs the recorded line with its product; the price is the one stored
    /// on the line, never the product's current price.
    pub fn into_sold(self, product: ProductRow) -> SoldLine {
        SoldLine {
            product_id: self.product_id,
            product_name: product.name,
            seller_id: product.user_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_owners)]
pub struct NewOrderOwnerRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(p: ProductRow) -> Self {
        Product {
            id: p.id,
            seller_id: p.user_id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            tags: p.tags,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub tags: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub tags: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = storefront_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StorefrontLinkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_type: String,
    pub store_name: String,
    pub credentials: String,
    pub store_id: String,
    pub store_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StorefrontLinkRow> for StorefrontLink {
    fn from(s: StorefrontLinkRow) -> Self {
        StorefrontLink {
            id: s.id,
            user_id: s.user_id,
            store_type: s.store_type,
            store_name: s.store_name,
            credentials: s.credentials,
            store_id: s.store_id,
            store_url: s.store_url,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = storefront_links)]
pub struct NewStorefrontLinkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_type: String,
    pub store_name: String,
    pub credentials: String,
    pub store_id: String,
    pub store_url: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = storefront_links)]
pub struct StorefrontLinkChangeset {
    pub store_name: String,
    pub store_id: String,
    pub store_url: String,
    pub credentials: Option<String>,
    pub updated_at: DateTime<Utc>,
}
