pub mod contact;
pub mod project;

pub use contact::Contact;
pub use project::{fallback_projects, Project, ProjectRecord};
