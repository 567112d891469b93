use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::storefront::{StorefrontInput, StorefrontLink, StorefrontUpdate};
use crate::errors::AppError;
use crate::Storefronts;

use super::IdQuery;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStorefrontRequest {
    #[serde(default)]
    pub store_type: String,
    /// Defaults to "<storeType> Link" when blank
    #[serde(default)]
    pub store_name: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub store_url: String,
}

impl From<AddStorefrontRequest> for StorefrontInput {
    fn from(req: AddStorefrontRequest) -> Self {
        StorefrontInput {
            store_type: req.store_type,
            store_name: req.store_name,
            api_key: req.api_key,
            api_secret: req.api_secret,
            store_id: req.store_id,
            store_url: req.store_url,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorefrontRequest {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_id: String,
    #[serde(default)]
    pub store_url: String,
    /// Replaces the stored key when present
    pub api_key: Option<String>,
    /// Replaces the stored secret when present
    pub api_secret: Option<String>,
}

impl From<UpdateStorefrontRequest> for StorefrontUpdate {
    fn from(req: UpdateStorefrontRequest) -> Self {
        StorefrontUpdate {
            store_name: req.store_name,
            store_id: req.store_id,
            store_url: req.store_url,
            api_key: req.api_key,
            api_secret: req.api_secret,
        }
    }
}

/// Public view of a link. Credentials are deliberately absent.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontResponse {
    pub id: Uuid,
    pub store_type: String,
    pub store_name: String,
    pub store_id: String,
    pub store_url: String,
}

impl From<StorefrontLink> for StorefrontResponse {
    fn from(link: StorefrontLink) -> Self {
        StorefrontResponse {
            id: link.id,
            store_type: link.store_type,
            store_name: link.store_name,
            store_id: link.store_id,
            store_url: link.store_url,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/add_storefront",
    request_body = AddStorefrontRequest,
    responses(
        (status = 201, description = "Storefront linked", body = StorefrontResponse),
        (status = 400, description = "Missing store type or credentials"),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "A link with this type and name already exists"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "storefronts"
)]
pub async fn add_storefront(
    AuthenticatedUser(user_id): AuthenticatedUser,
    storefronts: web::Data<Storefronts>,
    body: web::Json<AddStorefrontRequest>,
) -> Result<HttpResponse, AppError> {
    let input = StorefrontInput::from(body.into_inner());

    let link = web::block(move || storefronts.add_storefront(user_id, input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(StorefrontResponse::from(link)))
}

#[utoipa::path(
    get,
    path = "/api/get_storefronts",
    responses(
        (status = 200, description = "The caller's links ordered by type then name", body = [StorefrontResponse]),
        (status = 401, description = "Not signed in"),
    ),
    tag = "storefronts"
)]
pub async fn get_storefronts(
    AuthenticatedUser(user_id): AuthenticatedUser,
    storefronts: web::Data<Storefronts>,
) -> Result<HttpResponse, AppError> {
    let links = web::block(move || storefronts.list_storefronts(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<StorefrontResponse> = links.into_iter().map(StorefrontResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    put,
    path = "/api/update_storefront",
    params(
        ("id" = Uuid, Query, description = "Storefront link UUID"),
    ),
    request_body = UpdateStorefrontRequest,
    responses(
        (status = 200, description = "Link updated", body = StorefrontResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Link belongs to another user"),
        (status = 404, description = "Link not found"),
        (status = 409, description = "Name collides with another link"),
    ),
    tag = "storefronts"
)]
pub async fn update_storefront(
    AuthenticatedUser(user_id): AuthenticatedUser,
    storefronts: web::Data<Storefronts>,
    query: web::Query<IdQuery>,
    body: web::Json<UpdateStorefrontRequest>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;
    let update = StorefrontUpdate::from(body.into_inner());

    let link = web::block(move || storefronts.update_storefront(user_id, id, update))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(StorefrontResponse::from(link)))
}

#[utoipa::path(
    delete,
    path = "/api/delete_storefront",
    params(
        ("id" = Uuid, Query, description = "Storefront link UUID"),
    ),
    responses(
        (status = 204, description = "Link deleted"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Link belongs to another user"),
        (status = 404, description = "Link not found"),
    ),
    tag = "storefronts"
)]
pub async fn delete_storefront(
    AuthenticatedUser(user_id): AuthenticatedUser,
    storefronts: web::Data<Storefronts>,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;

    web::block(move || storefronts.delete_storefront(user_id, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
