pub mod database;
pub mod documents;
pub mod metrics;
pub mod store;

pub use database::MongoStore;
pub use documents::Documents;
pub use metrics::{get_metrics, init_metrics};
pub use store::{DocumentStore, InMemoryStore, StoreError};
