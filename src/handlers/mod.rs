pub mod orders;
pub mod products;
pub mod storefronts;

use serde::Deserialize;
use utoipa::OpenApi;
use uuid::Uuid;

/// `?id=<uuid>` query string shared by the single-entity endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::create_order,
        orders::get_order,
        orders::get_orders,
        products::add_product,
        products::get_product,
        products::get_products,
        products::update_product,
        products::delete_product,
        storefronts::add_storefront,
        storefronts::get_storefronts,
        storefronts::update_storefront,
        storefronts::delete_storefront,
    ),
    components(schemas(
        orders::CreateOrderRequest,
        orders::OrderedProductRequest,
        orders::CreateOrderResponse,
        orders::OrderResponse,
        orders::OrderedProductResponse,
        products::AddProductRequest,
        products::UpdateProductRequest,
        products::ProductResponse,
        storefronts::AddStorefrontRequest,
        storefronts::UpdateStorefrontRequest,
        storefronts::StorefrontResponse,
    )),
    tags(
        (name = "orders", description = "Order placement and seller order views"),
        (name = "products", description = "Seller product catalogue"),
        (name = "storefronts", description = "Linked external storefronts"),
    )
)]
pub struct ApiDoc;
