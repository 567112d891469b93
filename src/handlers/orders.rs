use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::order::{CartLine, NewOrder, OrderView};
use crate::errors::AppError;
use crate::Orders;

use super::IdQuery;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderedProductRequest {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
    pub count: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub ordered_products: Vec<OrderedProductRequest>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        NewOrder {
            customer_name: req.customer_name,
            customer_email: req.customer_email,
            lines: req
                .ordered_products
                .into_iter()
                .map(|p| CartLine {
                    product_id: p.product_id,
                    quantity: p.count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderID")]
    pub order_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProductResponse {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
    pub product_name: String,
    pub count: i32,
    /// Unit price recorded when the order was placed, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "orderID")]
    pub order_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    /// RFC 3339 timestamp
    pub order_date: String,
    pub status: String,
    pub tracking_number: Option<String>,
    /// Sum of the caller's lines only
    pub total: String,
    pub ordered_products: Vec<OrderedProductResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        OrderResponse {
            order_id: view.summary.id,
            customer_name: view.summary.customer_name,
            customer_email: view.summary.customer_email,
            order_date: view.summary.created_at.to_rfc3339(),
            status: view.summary.status,
            tracking_number: view.summary.tracking_number,
            total: view.total.to_string(),
            ordered_products: view
                .lines
                .into_iter()
                .map(|l| OrderedProductResponse {
                    product_id: l.product_id,
                    product_name: l.product_name,
                    count: l.quantity,
                    price: l.unit_price.to_string(),
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/create_order
///
/// Places an order for a customer. Stock for every line is checked and
/// decremented in one transaction; on any failure nothing is written.
#[utoipa::path(
    post,
    path = "/api/create_order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreateOrderResponse),
        (status = 400, description = "Invalid order or insufficient stock"),
        (status = 404, description = "A product in the cart does not exist"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<Orders>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = NewOrder::from(body.into_inner());

    let order_id = web::block(move || orders.place_order(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateOrderResponse { order_id }))
}

/// GET /api/get_order?id=
///
/// Returns the order restricted to the lines the caller sold.
#[utoipa::path(
    get,
    path = "/api/get_order",
    params(
        ("id" = Uuid, Query, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, description = "Missing or malformed id"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Caller sold nothing in this order"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    orders: web::Data<Orders>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let order_id = query.into_inner().id;

    let view = web::block(move || orders.get_order(order_id, seller_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// GET /api/get_orders
///
/// Every order containing at least one of the caller's products, newest first.
#[utoipa::path(
    get,
    path = "/api/get_orders",
    responses(
        (status = 200, description = "Orders for the caller", body = [OrderResponse]),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    orders: web::Data<Orders>,
) -> Result<HttpResponse, AppError> {
    let views = web::block(move || orders.list_orders(seller_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = views.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
