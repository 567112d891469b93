use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::StorefrontRepository;
use crate::domain::storefront::{NewStorefrontRecord, StorefrontLink, StorefrontRecordChanges};
use crate::schema::storefront_links;

use super::models::{NewStorefrontLinkRow, StorefrontLinkChangeset, StorefrontLinkRow};

pub struct DieselStorefrontRepository {
    pool: DbPool,
}

impl DieselStorefrontRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StorefrontRepository for DieselStorefrontRepository {
    fn create(&self, link: NewStorefrontRecord) -> Result<StorefrontLink, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(storefront_links::table)
            .values(&NewStorefrontLinkRow {
                id: Uuid::new_v4(),
                user_id: link.user_id,
                store_type: link.store_type,
                store_name: link.store_name,
                credentials: link.credentials,
                store_id: link.store_id,
                store_url: link.store_url,
            })
            .returning(StorefrontLinkRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find(&self, id: Uuid) -> Result<Option<StorefrontLink>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = storefront_links::table
            .find(id)
            .select(StorefrontLinkRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(StorefrontLink::from))
    }

    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StorefrontLink>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = storefront_links::table
            .filter(storefront_links::user_id.eq(user_id))
            .order((storefront_links::store_type.asc(), storefront_links::store_name.asc()))
            .select(StorefrontLinkRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(StorefrontLink::from).collect())
    }

    fn update(
        &self,
        id: Uuid,
        changes: StorefrontRecordChanges,
    ) -> Result<StorefrontLink, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(storefront_links::table.find(id))
            .set(&StorefrontLinkChangeset {
                store_name: changes.store_name,
                store_id: changes.store_id,
                store_url: changes.store_url,
                credentials: changes.credentials,
                updated_at: Utc::now(),
            })
            .returning(StorefrontLinkRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .ok_or(DomainError::NotFound("storefront link"))?;
        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(storefront_links::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            log::warn!("Delete of storefront link {} affected no rows", id);
        }
        Ok(())
    }
}
