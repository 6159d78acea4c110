//! Clients, companies and products managed by the CRUD screens.

use crate::models::line_item::ProductRef;
use crate::models::search::Searchable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Label shown for a line whose product is missing from the catalog.
pub const UNKNOWN_PRODUCT_LABEL: &str = "Product not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(rename = "apellido")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            format!("{} {}", self.first_name, self.last_name),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "razonSocial")]
    #[validate(length(min = 1, message = "Legal name is required"))]
    pub legal_name: String,
    #[validate(length(min = 1, message = "RUC is required"))]
    pub ruc: String,
    #[serde(rename = "direccion")]
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.legal_name.clone(),
            self.ruc.clone(),
            self.address.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(rename = "codigo")]
    #[validate(length(min = 1, max = 20, message = "Code must be 1-20 characters"))]
    pub code: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i64,
    #[serde(rename = "categoria")]
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("negative_price");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}

impl Product {
    /// "name - code", as shown in the product picker.
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.code)
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone(), self.category.clone()]
    }
}

/// Display labels for line items, keyed by product reference.
#[derive(Debug, Clone, Default)]
pub struct ProductLabels {
    labels: HashMap<ProductRef, String>,
}

impl ProductLabels {
    /// Products without an id cannot be referenced and are skipped.
    pub fn from_products(products: &[Product]) -> Self {
        let labels = products
            .iter()
            .filter_map(|product| product.id.map(|id| (ProductRef(id), product.label())))
            .collect();
        Self { labels }
    }

    pub fn contains(&self, product_ref: ProductRef) -> bool {
        self.labels.contains_key(&product_ref)
    }

    pub fn label(&self, product_ref: ProductRef) -> &str {
        self.labels
            .get(&product_ref)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PRODUCT_LABEL)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
