use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Cart, OrderStatus, OrderView, SoldLine};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_lines, order_owners, orders, products};

use super::models::{
    NewOrderLineRow, NewOrderOwnerRow, NewOrderRow, OrderLineRow, OrderRow, ProductRow,
};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Recorded lines of the given orders joined with their products, grouped by order.
fn sold_lines(
    conn: &mut PgConnection,
    order_ids: Vec<Uuid>,
) -> QueryResult<HashMap<Uuid, Vec<SoldLine>>> {
    let rows: Vec<(OrderLineRow, ProductRow)> = order_lines::table
        .inner_join(products::table)
        .filter(order_lines::order_id.eq_any(order_ids))
        .order((order_lines::order_id, products::name))
        .select((OrderLineRow::as_select(), ProductRow::as_select()))
        .load(conn)?;

    let mut grouped: HashMap<Uuid, Vec<SoldLine>> = HashMap::new();
    for (line, product) in rows {
        grouped
            .entry(line.order_id)
            .or_default()
            .push(line.into_sold(product));
    }
    Ok(grouped)
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, cart: &Cart) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.build_transaction()
            .read_committed()
            .run::<_, DomainError, _>(|conn| {
                // 1. Lock the product rows in id order so concurrent carts
                //    over the same products queue instead of deadlocking.
                let ids: Vec<Uuid> = cart.items.keys().copied().collect();
                let locked: HashMap<Uuid, ProductRow> = products::table
                    .filter(products::id.eq_any(ids))
                    .order(products::id)
                    .select(ProductRow::as_select())
                    .for_update()
                    .load(conn)?
                    .into_iter()
                    .map(|p| (p.id, p))
                    .collect();

                // 2. Validate every line against the locked stock
                let mut sellers = BTreeSet::new();
                for (&product_id, &requested) in &cart.items {
                    let product = locked
                        .get(&product_id)
                        .ok_or(DomainError::ProductNotFound(product_id))?;
                    if requested > product.stock {
                        return Err(DomainError::InsufficientStock {
                            product_id,
                            requested,
                            available: product.stock,
                        });
                    }
                    sellers.insert(product.user_id);
                }

                // 3. Insert the order
                let order_id = Uuid::new_v4();
                diesel::insert_into(orders::table)
                    .values(&NewOrderRow {
                        id: order_id,
                        customer_name: &cart.customer_name,
                        customer_email: &cart.customer_email,
                        status: OrderStatus::Pending.as_str(),
                    })
                    .execute(conn)?;

                // 4. One visibility link per distinct seller
                let owners: Vec<NewOrderOwnerRow> = sellers
                    .into_iter()
                    .map(|user_id| NewOrderOwnerRow {
                        id: Uuid::new_v4(),
                        order_id,
                        user_id,
                    })
                    .collect();
                diesel::insert_into(order_owners::table)
                    .values(&owners)
                    .execute(conn)?;

                // 5. Lines priced at the current product price, then the
                //    guarded stock decrement.
                for (&product_id, &quantity) in &cart.items {
                    let product = &locked[&product_id];
                    diesel::insert_into(order_lines::table)
                        .values(&NewOrderLineRow {
                            id: Uuid::new_v4(),
                            order_id,
                            product_id,
                            quantity,
                            unit_price: product.price.clone(),
                        })
                        .execute(conn)?;

                    let updated = diesel::update(
                        products::table
                            .filter(products::id.eq(product_id))
                            .filter(products::stock.ge(quantity)),
                    )
                    .set((
                        products::stock.eq(products::stock - quantity),
                        products::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
                    if updated == 0 {
                        return Err(DomainError::InsufficientStock {
                            product_id,
                            requested: quantity,
                            available: product.stock,
                        });
                    }
                }

                log::debug!(
                    "Order {} linked to {} seller(s)",
                    order_id,
                    owners.len()
                );
                Ok(order_id)
            })
    }

    fn find_for_seller(&self, order_id: Uuid, seller_id: Uuid) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let linked: bool = diesel::select(exists(
                order_owners::table
                    .filter(order_owners::order_id.eq(order_id))
                    .filter(order_owners::user_id.eq(seller_id)),
            ))
            .get_result(conn)?;

            if !linked {
                let order_exists: bool =
                    diesel::select(exists(orders::table.find(order_id))).get_result(conn)?;
                return Err(if order_exists {
                    DomainError::Forbidden
                } else {
                    DomainError::NotFound("order")
                });
            }

            let order = orders::table
                .find(order_id)
                .select(OrderRow::as_select())
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("order"))?;

            let lines = sold_lines(conn, vec![order_id])?
                .remove(&order_id)
                .unwrap_or_default();

            Ok(OrderView::for_seller(order.into(), lines, seller_id))
        })
    }

    fn list_for_seller(&self, seller_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = order_owners::table
                .inner_join(orders::table)
                .filter(order_owners::user_id.eq(seller_id))
                .order((orders::created_at.desc(), orders::id))
                .select(OrderRow::as_select())
                .load(conn)?;

            if rows.is_empty() {
                return Ok(vec![]);
            }

            let mut lines = sold_lines(conn, rows.iter().map(|o| o.id).collect())?;

            Ok(rows
                .into_iter()
                .map(|o| {
                    let order_lines = lines.remove(&o.id).unwrap_or_default();
                    OrderView::for_seller(o.into(), order_lines, seller_id)
                })
                .collect())
        })
    }
}
