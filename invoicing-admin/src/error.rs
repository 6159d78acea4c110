//! Errors raised while editing a document's line items.

use admin_core::error::AppError;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Numeric line item fields that must never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Quantity,
    UnitPrice,
    Discount,
}

impl NumericField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::Quantity => "quantity",
            NumericField::UnitPrice => "unit_price",
            NumericField::Discount => "discount",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected line item edit. The edited value is always left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Validation error: {field} cannot be negative (got {value})")]
    Validation { field: NumericField, value: Decimal },

    #[error("Index error: line {index} is out of bounds for a document with {len} lines")]
    Index { index: usize, len: usize },

    /// An amount does not fit in a `Decimal`.
    #[error("Overflow error: {amount} exceeds the supported range")]
    Overflow { amount: &'static str },
}

impl EditError {
    pub fn error_type(&self) -> &'static str {
        match self {
            EditError::Validation { .. } => "validation",
            EditError::Index { .. } => "index",
            EditError::Overflow { .. } => "overflow",
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}
