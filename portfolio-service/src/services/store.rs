use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use thiserror::Error;

/// Failures at the storage boundary. Handlers decide what each one means for
/// the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.")]
    NotConnected,

    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    #[error("{0}")]
    Database(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Untyped document store: named collections of raw BSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn database_name(&self) -> &str;

    /// Inserts `document` and returns the identifier assigned to it.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Returns up to `limit` documents matching `filter`, in storage order.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    async fn collection_names(&self) -> Result<Vec<String>, StoreError>;
}

/// Renders a storage-assigned `_id` the way callers see it.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Process-local test double for [`MongoStore`](super::MongoStore). The
/// service never selects it on its own; without a database it runs with no
/// store at all. Keeps insertion order per collection; filters match on
/// top-level field equality only.
pub struct InMemoryStore {
    database: String,
    collections: DashMap<String, Vec<Document>>,
    failure: Option<String>,
}

impl InMemoryStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: DashMap::new(),
            failure: None,
        }
    }

    /// A store whose every operation fails with `message`.
    pub fn failing(database: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(database)
        }
    }

    /// Appends documents as-is, bypassing id assignment.
    pub fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.value().clone())
            .unwrap_or_default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Database(message.clone())),
            None => Ok(()),
        }
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        self.check_available()?;

        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id_to_string(&id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;

        let limit = usize::try_from(limit).unwrap_or(0);
        let found = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(found)
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.check_available()?;

        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
