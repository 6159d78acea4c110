//! Domain models for invoicing-admin.

mod catalog;
mod document;
mod line_item;
mod records;
mod search;
mod tax;

pub use catalog::{Client, Company, Product, ProductLabels, UNKNOWN_PRODUCT_LABEL};
pub use document::{Document, DocumentTotals};
pub use line_item::{FieldUpdate, LineItem, ProductRef};
pub use records::{DetailRecord, DocumentRecord};
pub use search::{filter_by_term, Searchable};
pub use tax::{compute_tax, line_net, round_money, taxable_base, MONEY_SCALE, TAX_RATE};
