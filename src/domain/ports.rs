use uuid::Uuid;

use super::errors::DomainError;
use super::order::{Cart, OrderView};
use super::product::{NewProduct, Product, ProductChanges};
use super::storefront::{NewStorefrontRecord, StorefrontLink, StorefrontRecordChanges};

pub trait OrderRepository: Send + Sync + 'static {
    /// Atomically checks stock, records the order with its owners and lines,
    /// and decrements stock. Nothing is written unless everything is.
    fn place(&self, cart: &Cart) -> Result<Uuid, DomainError>;
    fn find_for_seller(&self, order_id: Uuid, seller_id: Uuid) -> Result<OrderView, DomainError>;
    fn list_for_seller(&self, seller_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, seller_id: Uuid, product: NewProduct) -> Result<Product, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list_for_seller(&self, seller_id: Uuid) -> Result<Vec<Product>, DomainError>;
    fn update(&self, id: Uuid, changes: ProductChanges) -> Result<Product, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait StorefrontRepository: Send + Sync + 'static {
    fn create(&self, link: NewStorefrontRecord) -> Result<StorefrontLink, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<StorefrontLink>, DomainError>;
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StorefrontLink>, DomainError>;
    fn update(
        &self,
        id: Uuid,
        changes: StorefrontRecordChanges,
    ) -> Result<StorefrontLink, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
