use axum::{extract::State, Json};
use serde::Serialize;
use service_core::error::AppError;

use crate::models::{contact::CONTACT_COLLECTION, Contact};
use crate::services::metrics::record_contact_submission;
use crate::startup::AppState;
use crate::utils::ValidatedJson;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: String,
    pub id: String,
}

/// Stores one contact submission per call. There is no deduplication, so a
/// repeated submission is stored again.
#[tracing::instrument(skip(state, contact))]
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(contact): ValidatedJson<Contact>,
) -> Result<Json<ContactResponse>, AppError> {
    match state
        .documents
        .create_document(CONTACT_COLLECTION, &contact)
        .await
    {
        Ok(id) => {
            record_contact_submission("ok");
            tracing::info!(id = %id, "Contact submission stored");
            Ok(Json(ContactResponse {
                status: "ok".to_string(),
                id,
            }))
        }
        Err(e) => {
            record_contact_submission("error");
            tracing::error!(error = %e, "Failed to store contact submission");
            Err(e.into())
        }
    }
}
