// file: src/database/mod.rs

use crate::error::AppResult;
use crate::models::Document;
use crate::provider::memory::MemoryStore;
use crate::provider::{permission, DocumentStore, Query};
use crate::schema::collections;
use crate::utils::logging::log_provider_call;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

// Declare submodules
pub mod categories;
pub mod filter;
pub mod items;
pub mod meetings;
pub mod notifications;
pub mod reminders;
pub mod tasks;
pub mod users;

/// Handle on one provider database. Cheap to clone; every service function takes it by reference.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    database_id: String,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>, database_id: &str) -> Self {
        Self {
            store,
            database_id: database_id.to_string(),
        }
    }

    /// A database backed by a fresh [`MemoryStore`].
    pub fn in_memory(database_id: &str) -> Self {
        Self::new(Arc::new(MemoryStore::new()), database_id)
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Confirms the database has been provisioned by listing a single user document.
    pub async fn check_connection(&self) -> AppResult<()> {
        match self
            .store
            .list_documents(&self.database_id, collections::USERS, vec![Query::limit(1)])
            .await
        {
            Ok(_) => {
                info!("Database '{}' is reachable", self.database_id);
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Database '{}' is not available, run setup-database first: {}",
                    self.database_id, e
                );
                Err(e)
            }
        }
    }

    // --- Generic document access used by the services ---

    /// Creates a document readable and writable only by `owner_id`.
    pub(crate) async fn create<T>(&self, collection: &str, owner_id: &str, data: &T) -> AppResult<Document<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let started = Instant::now();
        let value = self
            .store
            .create_document(
                &self.database_id,
                collection,
                permission::UNIQUE_ID,
                serde_json::to_value(data)?,
                permission::owner(owner_id),
            )
            .await?;
        log_provider_call("create", collection, started.elapsed().as_millis() as u64);
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> AppResult<Document<T>> {
        let started = Instant::now();
        let value = self.store.get_document(&self.database_id, collection, id).await?;
        log_provider_call("get", collection, started.elapsed().as_millis() as u64);
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn update<P, T>(&self, collection: &str, id: &str, patch: &P) -> AppResult<Document<T>>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let value = self
            .store
            .update_document(&self.database_id, collection, id, serde_json::to_value(patch)?)
            .await?;
        log_provider_call("update", collection, started.elapsed().as_millis() as u64);
        Ok(serde_json::from_value(value)?)
    }

    pub(crate) async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let started = Instant::now();
        self.store.delete_document(&self.database_id, collection, id).await?;
        log_provider_call("delete", collection, started.elapsed().as_millis() as u64);
        Ok(())
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        queries: Vec<Query>,
    ) -> AppResult<Vec<Document<T>>> {
        let started = Instant::now();
        let page = self.store.list_documents(&self.database_id, collection, queries).await?;
        log_provider_call("list", collection, started.elapsed().as_millis() as u64);

        page.documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    /// Lists with the queries the provider can express, then applies `keep` locally.
    pub(crate) async fn list_filtered<T, F>(
        &self,
        collection: &str,
        queries: Vec<Query>,
        keep: F,
    ) -> AppResult<Vec<Document<T>>>
    where
        T: DeserializeOwned,
        F: Fn(&Document<T>) -> bool,
    {
        let superset = self.list(collection, queries).await?;
        Ok(filter::filter_superset(collection, superset, keep))
    }
}
