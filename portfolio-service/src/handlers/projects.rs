use axum::{extract::State, Json};
use mongodb::bson::{self, doc};
use thiserror::Error;

use crate::models::{fallback_projects, project::PROJECT_COLLECTION, Project, ProjectRecord};
use crate::services::metrics::record_projects_fallback;
use crate::services::{Documents, StoreError};
use crate::startup::AppState;

pub const PROJECT_LIMIT: i64 = 50;

#[derive(Debug, Error)]
enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Malformed project record: {0}")]
    Decode(#[from] bson::de::Error),
}

impl LoadError {
    fn reason(&self) -> &'static str {
        match self {
            LoadError::Store(StoreError::NotConnected) => "not_connected",
            LoadError::Store(_) => "database",
            LoadError::Decode(_) => "decode",
        }
    }
}

async fn load_projects(documents: &Documents) -> Result<Vec<Project>, LoadError> {
    documents
        .get_documents(PROJECT_COLLECTION, doc! {}, PROJECT_LIMIT)
        .await?
        .into_iter()
        .map(|document| -> Result<Project, LoadError> {
            let record: ProjectRecord = bson::from_document(document)?;
            Ok(Project::from(record))
        })
        .collect()
}

/// Lists stored projects. When they cannot be read for any reason the sample
/// projects are served instead, so the site never renders an empty list or an
/// error; the cause is only visible in logs and the fallback counter.
#[tracing::instrument(skip(state))]
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    match load_projects(&state.documents).await {
        Ok(projects) => Json(projects),
        Err(e) => {
            let reason = e.reason();
            record_projects_fallback(reason);
            tracing::warn!(reason, error = %e, "Serving fallback projects");
            Json(fallback_projects())
        }
    }
}
