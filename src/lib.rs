pub mod application;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

#[cfg(test)]
mod test_support;

use actix_web::middleware::Logger;
use actix_web::{error, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::application::storefront_service::StorefrontService;
use crate::config::Config;
use crate::crypto::CredentialCipher;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;
use crate::infrastructure::storefront_repo::DieselStorefrontRepository;

pub use db::{create_pool, DbPool};

pub type Orders = OrderService<DieselOrderRepository>;
pub type Products = ProductService<DieselProductRepository>;
pub type Storefronts = StorefrontService<DieselStorefrontRepository>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Services shared by every worker. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    orders: web::Data<Orders>,
    products: web::Data<Products>,
    storefronts: web::Data<Storefronts>,
}

impl AppState {
    pub fn new(pool: DbPool, cipher: CredentialCipher) -> Self {
        Self {
            orders: web::Data::new(OrderService::new(DieselOrderRepository::new(pool.clone()))),
            products: web::Data::new(ProductService::new(DieselProductRepository::new(
                pool.clone(),
            ))),
            storefronts: web::Data::new(StorefrontService::new(
                DieselStorefrontRepository::new(pool),
                cipher,
            )),
        }
    }

    /// Mounts the `/api` routes and their extractor settings.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
            )
            .into()
        });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
            )
            .into()
        });

        cfg.app_data(self.orders.clone())
            .app_data(self.products.clone())
            .app_data(self.storefronts.clone())
            .app_data(json_config)
            .app_data(query_config)
            .service(
                web::scope("/api")
                    .route("/create_order", web::post().to(handlers::orders::create_order))
                    .route("/get_order", web::get().to(handlers::orders::get_order))
                    .route("/get_orders", web::get().to(handlers::orders::get_orders))
                    .route("/add_product", web::post().to(handlers::products::add_product))
                    .route("/get_product", web::get().to(handlers::products::get_product))
                    .route("/get_products", web::get().to(handlers::products::get_products))
                    .route("/update_product", web::put().to(handlers::products::update_product))
                    .route("/delete_product", web::delete().to(handlers::products::delete_product))
                    .route("/add_storefront", web::post().to(handlers::storefronts::add_storefront))
                    .route("/get_storefronts", web::get().to(handlers::storefronts::get_storefronts))
                    .route(
                        "/update_storefront",
                        web::put().to(handlers::storefronts::update_storefront),
                    )
                    .route(
                        "/delete_storefront",
                        web::delete().to(handlers::storefronts::delete_storefront),
                    ),
            );
    }
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: &Config) -> std::io::Result<actix_web::dev::Server> {
    let state = AppState::new(pool, config.cipher.clone());
    let session_key = config.session_key.clone();
    let secure = config.session_cookie_secure;

    Ok(HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(auth::session_middleware(session_key.clone(), secure))
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", handlers::ApiDoc::openapi()),
            )
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
