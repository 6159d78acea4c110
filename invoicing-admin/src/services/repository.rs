//! Collaborators the detail editor loads from and saves to.

use crate::models::{DetailRecord, DocumentRecord, Product};
use crate::services::api_client::ApiClient;
use admin_core::error::AppError;
use async_trait::async_trait;

/// Persistence for documents and their details.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn get_document(&self, document_id: i64) -> Result<DocumentRecord, AppError>;

    async fn list_details(&self, document_id: i64) -> Result<Vec<DetailRecord>, AppError>;

    /// Create the document when it has no id yet, replace it otherwise.
    async fn save_document(&self, document: &DocumentRecord) -> Result<DocumentRecord, AppError>;
}

/// Source of the products a line item can reference.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
}

#[async_trait]
impl DocumentRepository for ApiClient {
    async fn get_document(&self, document_id: i64) -> Result<DocumentRecord, AppError> {
        self.get::<DocumentRecord>(document_id).await
    }

    async fn list_details(&self, document_id: i64) -> Result<Vec<DetailRecord>, AppError> {
        ApiClient::list_details(self, document_id).await
    }

    async fn save_document(&self, document: &DocumentRecord) -> Result<DocumentRecord, AppError> {
        match document.id {
            Some(id) => self.update(id, document).await,
            None => self.create(document).await,
        }
    }
}

#[async_trait]
impl ProductCatalog for ApiClient {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.list::<Product>().await
    }
}
