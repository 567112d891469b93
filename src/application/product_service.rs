use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductChanges};

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_product(&self, seller_id: Uuid, product: NewProduct) -> Result<Product, DomainError> {
        product.validate()?;
        self.repo.create(seller_id, product)
    }

    pub fn get_product(&self, seller_id: Uuid, id: Uuid) -> Result<Product, DomainError> {
        self.owned(seller_id, id)
    }

    pub fn list_products(&self, seller_id: Uuid) -> Result<Vec<Product>, DomainError> {
        self.repo.list_for_seller(seller_id)
    }

    pub fn update_product(
        &self,
        seller_id: Uuid,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Product, DomainError> {
        changes.validate()?;
        self.owned(seller_id, id)?;
        self.repo.update(id, changes)
    }

    pub fn delete_product(&self, seller_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.owned(seller_id, id)?;
        self.repo.delete(id)
    }

    fn owned(&self, seller_id: Uuid, id: Uuid) -> Result<Product, DomainError> {
        let product = self.repo.find(id)?.ok_or(DomainError::NotFound("product"))?;
        if product.seller_id != seller_id {
            log::warn!(
                "User {} attempted to access product {} owned by {}",
                seller_id,
                id,
                product.seller_id
            );
            return Err(DomainError::Forbidden);
        }
        Ok(product)
    }
}
