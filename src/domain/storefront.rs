use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::limits::{check_length, NAME_MAX_CHARS, STORE_TYPE_MAX_CHARS};

pub const CREDENTIALS_VERSION: u32 = 1;

/// A linked external storefront. `credentials` is always a cipher token.
#[derive(Debug, Clone)]
pub struct StorefrontLink {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_type: String,
    pub store_name: String,
    pub credentials: String,
    pub store_id: String,
    pub store_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plaintext credential map, only ever held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCredentials {
    pub version: u32,
    pub fields: BTreeMap<String, String>,
}

impl Default for StoreCredentials {
    fn default() -> Self {
        Self {
            version: CREDENTIALS_VERSION,
            fields: BTreeMap::new(),
        }
    }
}

impl StoreCredentials {
    pub fn from_api_pair(api_key: Option<&str>, api_secret: Option<&str>) -> Self {
        let mut creds = Self::default();
        creds.merge_api_pair(api_key, api_secret);
        creds
    }

    /// Overwrites `apiKey`/`apiSecret` with any non-empty value given.
    pub fn merge_api_pair(&mut self, api_key: Option<&str>, api_secret: Option<&str>) {
        for (name, value) in [("apiKey", api_key), ("apiSecret", api_secret)] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                self.fields.insert(name.to_string(), value.to_string());
            }
        }
    }
}

/// What a user submits when linking a storefront.
#[derive(Debug, Clone, Default)]
pub struct StorefrontInput {
    pub store_type: String,
    pub store_name: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub store_id: String,
    pub store_url: String,
}

impl StorefrontInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.store_type.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Missing required field: storeType".to_string(),
            ));
        }
        let store_type = self.store_type.trim();
        check_length("storeType", store_type, STORE_TYPE_MAX_CHARS)?;
        let blank = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
        if store_type == "amazon" && (blank(&self.api_key) || blank(&self.api_secret)) {
            return Err(DomainError::InvalidInput(
                "apiKey and apiSecret are required for Amazon links".to_string(),
            ));
        }
        check_listing_fields(&self.store_name, &self.store_id)
    }
}

fn check_listing_fields(store_name: &str, store_id: &str) -> Result<(), DomainError> {
    check_length("storeName", store_name.trim(), NAME_MAX_CHARS)?;
    check_length("storeId", store_id, NAME_MAX_CHARS)
}

/// Editable fields of an existing link. The store type is fixed once linked.
#[derive(Debug, Clone, Default)]
pub struct StorefrontUpdate {
    pub store_name: String,
    pub store_id: String,
    pub store_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl StorefrontUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_listing_fields(&self.store_name, &self.store_id)
    }

    pub fn rotates_credentials(&self) -> bool {
        [&self.api_key, &self.api_secret]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

/// Row-level values handed to the repository; `credentials` already encrypted.
#[derive(Debug, Clone)]
pub struct NewStorefrontRecord {
    pub user_id: Uuid,
    pub store_type: String,
    pub store_name: String,
    pub credentials: String,
    pub store_id: String,
    pub store_url: String,
}

#[derive(Debug, Clone)]
pub struct StorefrontRecordChanges {
    pub store_name: String,
    pub store_id: String,
    pub store_url: String,
    pub credentials: Option<String>,
}

/// Falls back to "<store type> Link" for a blank name.
pub fn display_name(store_name: &str, store_type: &str) -> String {
    let trimmed = store_name.trim();
    if trimmed.is_empty() {
        format!("{} Link", store_type)
    } else {
        trimmed.to_string()
    }
}
