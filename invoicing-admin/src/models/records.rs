//! Wire records exchanged with the invoicing REST API.
//!
//! Field names follow the API's JSON (`idProducto`, `importeIGV`, ...);
//! money travels as JSON numbers.

use crate::error::EditError;
use crate::models::document::{Document, DocumentTotals};
use crate::models::line_item::{LineItem, ProductRef};
use crate::models::search::Searchable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted document detail (one line item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        rename = "idDocumento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub document_id: Option<i64>,
    #[serde(rename = "idProducto")]
    pub product_ref: ProductRef,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precioUnitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(rename = "descuento", with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(rename = "igvDetalle", with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl DetailRecord {
    pub fn from_line_item(item: &LineItem, document_id: Option<i64>) -> Self {
        Self {
            id: item.id(),
            document_id,
            product_ref: item.product_ref(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            discount: item.discount(),
            tax: item.tax(),
        }
    }
}

/// Rebuilds the line from its inputs; the stored `tax` is recomputed, not trusted.
impl TryFrom<&DetailRecord> for LineItem {
    type Error = EditError;

    fn try_from(record: &DetailRecord) -> Result<Self, Self::Error> {
        let item = LineItem::create(
            record.product_ref,
            record.quantity,
            record.unit_price,
            record.discount,
        )?;
        Ok(match record.id {
            Some(id) => item.with_id(id),
            None => item,
        })
    }
}

/// Document header as stored by the API, with its persisted totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "fechaEmision")]
    pub issue_date: NaiveDate,
    #[serde(rename = "importeTotal", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "importeIGV", with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(rename = "idCliente")]
    pub client_id: i64,
    #[serde(rename = "idEmpresa")]
    pub company_id: i64,
    #[serde(rename = "idTipoDocumento")]
    pub document_type_id: i64,
    #[serde(rename = "idFormaPago")]
    pub payment_method_id: i64,
    #[serde(rename = "detalles", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<DetailRecord>>,
}

impl DocumentRecord {
    /// Overwrite the persisted totals with freshly computed ones.
    pub fn apply_totals(&mut self, totals: &DocumentTotals) {
        self.tax_amount = totals.total_tax;
        self.total_amount = totals.grand_total;
    }
}

impl Searchable for DocumentRecord {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.client_id.to_string(),
            self.company_id.to_string(),
        ]
    }
}

impl Document {
    pub fn from_records(records: &[DetailRecord]) -> Result<Self, EditError> {
        records.iter().map(LineItem::try_from).collect()
    }

    pub fn to_records(&self, document_id: Option<i64>) -> Vec<DetailRecord> {
        self.line_items()
            .iter()
            .map(|item| DetailRecord::from_line_item(item, document_id))
            .collect()
    }
}
