use serde::{Deserialize, Serialize};
use validator::Validate;

pub const CONTACT_COLLECTION: &str = "contact";

/// A contact-form submission. Stored once per submission and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(length(min = 2, max = 80, message = "Name must be between 2 and 80 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(
        min = 5,
        max = 2000,
        message = "Message must be between 5 and 2000 characters"
    ))]
    pub message: String,
}
