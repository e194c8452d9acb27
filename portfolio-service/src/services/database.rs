use crate::config::DatabaseConfig;
use crate::services::store::{id_to_string, DocumentStore, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Database,
};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

impl MongoStore {
    /// Builds a client for `uri` and pings the server once. The driver
    /// connects lazily, so the ping is what surfaces an unreachable server.
    pub async fn connect(
        uri: &str,
        database: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("portfolio-service".to_string());
        options.server_selection_timeout = Some(server_selection_timeout);

        let client = MongoClient::with_options(options)?;
        let store = Self {
            db: client.database(database),
            client,
        };
        store.health_check().await?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

/// Makes the single startup connection attempt. Missing configuration or a
/// failed attempt yields `None`; the service then runs without a database.
pub async fn connect(config: &DatabaseConfig) -> Option<MongoStore> {
    let (Some(uri), Some(name)) = (config.url.as_deref(), config.name.as_deref()) else {
        tracing::warn!(
            url_set = config.url.is_some(),
            name_set = config.name.is_some(),
            "DATABASE_URL or DATABASE_NAME not set; running without a database"
        );
        return None;
    };

    match MongoStore::connect(uri, name, config.connect_timeout()).await {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(
                database = %name,
                error = %e,
                "Could not connect to MongoDB; running without a database"
            );
            None
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to insert document: {}", e);
                StoreError::from(e)
            })?;

        Ok(id_to_string(&result.inserted_id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let find_options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter, find_options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to query documents: {}", e);
                StoreError::from(e)
            })?;

        let documents: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!(collection = %collection, "Failed to collect documents: {}", e);
            StoreError::from(e)
        })?;

        Ok(documents)
    }

    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.db.list_collection_names(None).await.map_err(|e| {
            tracing::error!("Failed to list collections: {}", e);
            StoreError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_configuration_yields_no_store() {
        assert!(connect(&DatabaseConfig::disabled()).await.is_none());

        let only_url = DatabaseConfig {
            url: Some("mongodb://localhost:27017".to_string()),
            ..DatabaseConfig::disabled()
        };
        assert!(connect(&only_url).await.is_none());
    }

    #[tokio::test]
    async fn malformed_url_yields_no_store() {
        let config = DatabaseConfig {
            url: Some("not-a-mongo-url".to_string()),
            name: Some("portfolio".to_string()),
            connect_timeout_secs: 1,
        };
        assert!(connect(&config).await.is_none());
    }
}
