use crate::services::store::{DocumentStore, StoreError};
use mongodb::bson::{self, DateTime, Document};
use serde::Serialize;
use std::sync::Arc;

/// Thin, untyped access to the document store. Holds no store when the
/// service runs without a database, in which case every operation fails with
/// [`StoreError::NotConnected`].
#[derive(Clone)]
pub struct Documents {
    store: Option<Arc<dyn DocumentStore>>,
}

impl Documents {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    pub fn connected(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disconnected() -> Self {
        Self { store: None }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.store.as_deref().map(|store| store.database_name())
    }

    fn store(&self) -> Result<&dyn DocumentStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::NotConnected)
    }

    /// Serializes an already validated `record`, stamps `created_at` and
    /// `updated_at`, and inserts it. Returns the assigned identifier.
    pub async fn create_document<T>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<String, StoreError>
    where
        T: Serialize + ?Sized,
    {
        let store = self.store()?;

        let mut document = bson::to_document(record)?;
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let id = store.insert(collection, document).await?;
        tracing::debug!(collection = %collection, id = %id, "Document created");
        Ok(id)
    }

    /// Returns at most `limit` raw documents matching `filter`, in storage
    /// order. A non-positive limit returns nothing.
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let store = self.store()?;
        if limit <= 0 {
            return Ok(Vec::new());
        }
        store.find(collection, filter, limit).await
    }

    pub async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.store()?.collection_names().await
    }
}
