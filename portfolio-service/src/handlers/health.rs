use crate::startup::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Portfolio API is running" }))
}

/// Diagnostic snapshot of the backend and its database. Every field is
/// best-effort text; the endpoint itself never fails.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

#[tracing::instrument(skip(state))]
pub async fn database_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let mut response = StatusResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_marker(state.config.database.url.is_some()),
        database_name: set_marker(state.config.database.name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if state.documents.is_connected() {
        response.connection_status = "Connected".to_string();

        match state.documents.list_collections().await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                response.collections = names;
                response.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Connected but listing collections failed");
                response.database = format!(
                    "⚠️  Connected but Error: {}",
                    truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
                );
            }
        }
    }

    Json(response)
}

fn set_marker(is_set: bool) -> String {
    let marker = if is_set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
