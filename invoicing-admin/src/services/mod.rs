//! Services module for invoicing-admin.

pub mod api_client;
pub mod editor;
pub mod metrics;
pub mod repository;

pub use api_client::{ApiClient, ApiResource};
pub use editor::DetailEditor;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{DocumentRepository, ProductCatalog};
