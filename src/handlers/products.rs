use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::errors::AppError;
use crate::Products;

use super::IdQuery;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub count: i32,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub count: Option<i32>,
    pub tags: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
    pub product_name: String,
    pub description: String,
    pub price: String,
    pub count: i32,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            product_id: p.id,
            product_name: p.name,
            description: p.description,
            price: p.price.to_string(),
            count: p.stock,
            tags: p.tags,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

fn parse_price(raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid price '{}'", raw)))
}

impl TryFrom<AddProductRequest> for NewProduct {
    type Error = AppError;

    fn try_from(req: AddProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            price: parse_price(&req.price)?,
            name: req.product_name,
            description: req.description,
            stock: req.count,
            tags: req.tags,
        })
    }
}

impl TryFrom<UpdateProductRequest> for ProductChanges {
    type Error = AppError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductChanges {
            price: req.price.as_deref().map(parse_price).transpose()?,
            name: req.product_name,
            description: req.description,
            stock: req.count,
            tags: req.tags,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/add_product",
    request_body = AddProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "Caller already has a product with this name"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn add_product(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    products: web::Data<Products>,
    body: web::Json<AddProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = NewProduct::try_from(body.into_inner())?;

    let created = web::block(move || products.add_product(seller_id, product))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/get_product",
    params(
        ("id" = Uuid, Query, description = "Product UUID"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Product belongs to another seller"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    products: web::Data<Products>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;

    let product = web::block(move || products.get_product(seller_id, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[utoipa::path(
    get,
    path = "/api/get_products",
    responses(
        (status = 200, description = "The caller's products", body = [ProductResponse]),
        (status = 401, description = "Not signed in"),
    ),
    tag = "products"
)]
pub async fn get_products(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    products: web::Data<Products>,
) -> Result<HttpResponse, AppError> {
    let list = web::block(move || products.list_products(seller_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ProductResponse> = list.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    put,
    path = "/api/update_product",
    params(
        ("id" = Uuid, Query, description = "Product UUID"),
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid changes"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Product belongs to another seller"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Name collides with another product"),
    ),
    tag = "products"
)]
pub async fn update_product(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    products: web::Data<Products>,
    query: web::Query<IdQuery>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;
    let changes = ProductChanges::try_from(body.into_inner())?;

    let updated = web::block(move || products.update_product(seller_id, id, changes))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/delete_product",
    params(
        ("id" = Uuid, Query, description = "Product UUID"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Product belongs to another seller"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product appears in existing orders"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    AuthenticatedUser(seller_id): AuthenticatedUser,
    products: web::Data<Products>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;

    web::block(move || products.delete_product(seller_id, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
