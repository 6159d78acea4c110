#![allow(dead_code)]

use admin_core::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use invoicing_admin::models::{DetailRecord, DocumentRecord, Product, ProductRef};
use invoicing_admin::services::{DocumentRepository, ProductCatalog};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Mutex;

pub const TEST_DOCUMENT_ID: i64 = 9;

pub fn test_header() -> DocumentRecord {
    DocumentRecord {
        id: Some(TEST_DOCUMENT_ID),
        issue_date: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        total_amount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        client_id: 1,
        company_id: 2,
        document_type_id: 1,
        payment_method_id: 1,
        details: None,
    }
}

pub fn detail(
    id: i64,
    product: i64,
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
    tax: Decimal,
) -> DetailRecord {
    DetailRecord {
        id: Some(id),
        document_id: Some(TEST_DOCUMENT_ID),
        product_ref: ProductRef(product),
        quantity,
        unit_price,
        discount,
        tax,
    }
}

/// The two lines of the reference invoice: 2 x 100 and 3 x 50 less 20.
pub fn test_details() -> Vec<DetailRecord> {
    vec![
        detail(1, 1, 2, dec!(100), dec!(0), dec!(36.00)),
        detail(2, 2, 3, dec!(50), dec!(20), dec!(23.40)),
    ]
}

pub fn test_products() -> Vec<Product> {
    vec![
        Product {
            id: Some(1),
            name: "Laptop".to_string(),
            code: "LP-01".to_string(),
            price: dec!(100),
            stock: 5,
            category: "Computo".to_string(),
            description: "Laptop 14 pulgadas".to_string(),
        },
        Product {
            id: Some(2),
            name: "Monitor".to_string(),
            code: "MN-02".to_string(),
            price: dec!(50),
            stock: 12,
            category: "Computo".to_string(),
            description: "Monitor 24 pulgadas".to_string(),
        },
    ]
}

/// Repository backed by maps; assigns ids to new details on save.
#[derive(Default)]
pub struct InMemoryRepository {
    documents: Mutex<HashMap<i64, DocumentRecord>>,
    details: Mutex<HashMap<i64, Vec<DetailRecord>>>,
    saved: Mutex<Vec<DocumentRecord>>,
}

impl InMemoryRepository {
    pub fn with_document(header: DocumentRecord, details: Vec<DetailRecord>) -> Self {
        let repo = Self::default();
        let id = header.id.expect("seeded document needs an id");
        repo.documents.lock().unwrap().insert(id, header);
        repo.details.lock().unwrap().insert(id, details);
        repo
    }

    pub fn saved(&self) -> Vec<DocumentRecord> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryRepository {
    async fn get_document(&self, document_id: i64) -> Result<DocumentRecord, AppError> {
        self.documents
            .lock()
            .unwrap()
            .get(&document_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("documentos not found")))
    }

    async fn list_details(&self, document_id: i64) -> Result<Vec<DetailRecord>, AppError> {
        Ok(self
            .details
            .lock()
            .unwrap()
            .get(&document_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_document(&self, document: &DocumentRecord) -> Result<DocumentRecord, AppError> {
        let mut saved = document.clone();
        let id = saved.id.unwrap_or(100);
        saved.id = Some(id);

        if let Some(details) = saved.details.as_mut() {
            let mut next_id = details.iter().filter_map(|d| d.id).max().unwrap_or(0) + 1;
            for detail in details.iter_mut() {
                detail.document_id = Some(id);
                if detail.id.is_none() {
                    detail.id = Some(next_id);
                    next_id += 1;
                }
            }
            self.details.lock().unwrap().insert(id, details.clone());
        }

        self.documents.lock().unwrap().insert(id, saved.clone());
        self.saved.lock().unwrap().push(saved.clone());
        Ok(saved)
    }
}

pub struct StaticCatalog(pub Vec<Product>);

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.0.clone())
    }
}
