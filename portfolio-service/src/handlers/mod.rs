pub mod contact;
pub mod health;
pub mod metrics;
pub mod projects;

pub use contact::submit_contact;
pub use health::{database_status, root};
pub use metrics::metrics_endpoint;
pub use projects::list_projects;
