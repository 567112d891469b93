use uuid::Uuid;

use crate::crypto::{CipherError, CredentialCipher};
use crate::domain::errors::DomainError;
use crate::domain::ports::StorefrontRepository;
use crate::domain::storefront::{
    display_name, NewStorefrontRecord, StoreCredentials, StorefrontInput, StorefrontLink,
    StorefrontRecordChanges, StorefrontUpdate,
};

impl From<CipherError> for DomainError {
    fn from(e: CipherError) -> Self {
        DomainError::Internal(e.to_string())
    }
}

pub struct StorefrontService<R> {
    repo: R,
    cipher: CredentialCipher,
}

impl<R: StorefrontRepository> StorefrontService<R> {
    pub fn new(repo: R, cipher: CredentialCipher) -> Self {
        Self { repo, cipher }
    }

    pub fn add_storefront(
        &self,
        user_id: Uuid,
        input: StorefrontInput,
    ) -> Result<StorefrontLink, DomainError> {
        input.validate()?;

        let creds =
            StoreCredentials::from_api_pair(input.api_key.as_deref(), input.api_secret.as_deref());
        if creds.fields.is_empty() {
            log::warn!(
                "No credentials provided for storefront type {} for user {}",
                input.store_type,
                user_id
            );
        }

        let store_type = input.store_type.trim().to_string();
        self.repo.create(NewStorefrontRecord {
            user_id,
            store_name: display_name(&input.store_name, &store_type),
            store_type,
            credentials: self.seal(&creds)?,
            store_id: input.store_id,
            store_url: input.store_url,
        })
    }

    pub fn list_storefronts(&self, user_id: Uuid) -> Result<Vec<StorefrontLink>, DomainError> {
        self.repo.list_for_user(user_id)
    }

    pub fn update_storefront(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: StorefrontUpdate,
    ) -> Result<StorefrontLink, DomainError> {
        update.validate()?;
        let link = self.owned(user_id, id)?;

        let credentials = if update.rotates_credentials() {
            let mut creds = self.open(&link.credentials)?;
            creds.merge_api_pair(update.api_key.as_deref(), update.api_secret.as_deref());
            Some(self.seal(&creds)?)
        } else {
            None
        };

        self.repo.update(
            id,
            StorefrontRecordChanges {
                store_name: display_name(&update.store_name, &link.store_type),
                store_id: update.store_id,
                store_url: update.store_url,
                credentials,
            },
        )
    }

    pub fn delete_storefront(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.owned(user_id, id)?;
        self.repo.delete(id)
    }

    fn owned(&self, user_id: Uuid, id: Uuid) -> Result<StorefrontLink, DomainError> {
        let link = self
            .repo
            .find(id)?
            .ok_or(DomainError::NotFound("storefront link"))?;
        if link.user_id != user_id {
            log::warn!(
                "User {} attempted to modify storefront link {} owned by {}",
                user_id,
                id,
                link.user_id
            );
            return Err(DomainError::Forbidden);
        }
        Ok(link)
    }

    fn seal(&self, creds: &StoreCredentials) -> Result<String, DomainError> {
        let json = serde_json::to_vec(creds)
            .map_err(|e| DomainError::Internal(format!("encoding credentials: {e}")))?;
        Ok(self.cipher.encrypt(&json)?)
    }

    fn open(&self, token: &str) -> Result<StoreCredentials, DomainError> {
        let json = self.cipher.decrypt(token).inspect_err(|_| {
            log::error!("Stored storefront credentials could not be decrypted");
        })?;
        serde_json::from_slice(&json)
            .map_err(|_| DomainError::Internal("stored credentials are unreadable".to_string()))
    }
}
