#![allow(dead_code)]

use portfolio_service::config::{CorsConfig, DatabaseConfig, ObservabilityConfig, PortfolioConfig};
use portfolio_service::services::{Documents, InMemoryStore};
use portfolio_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn test_config(database: DatabaseConfig) -> PortfolioConfig {
    // Use random port for testing (port 0)
    PortfolioConfig {
        common: CoreConfig { port: 0 },
        database,
        cors: CorsConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

/// Config that looks like a configured database, for apps built around an
/// injected store.
pub fn configured_database() -> DatabaseConfig {
    DatabaseConfig {
        url: Some("mongodb://in-memory".to_string()),
        name: Some("portfolio_test".to_string()),
        connect_timeout_secs: 1,
    }
}

impl TestApp {
    /// App with no database configured at all.
    pub async fn spawn() -> Self {
        Self::spawn_with(
            test_config(DatabaseConfig::disabled()),
            Documents::disconnected(),
        )
        .await
    }

    /// App backed by the given in-memory store.
    pub async fn spawn_with_store(store: Arc<InMemoryStore>) -> Self {
        Self::spawn_with(
            test_config(configured_database()),
            Documents::connected(store),
        )
        .await
    }

    pub async fn spawn_with(config: PortfolioConfig, documents: Documents) -> Self {
        let app = Application::build_with_documents(config, documents)
            .await
            .expect("Failed to build test application");

        Self::run(app).await
    }

    pub async fn run(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the root endpoint
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/contact", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
