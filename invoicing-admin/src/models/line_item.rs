//! Line item model: one product row on a document.

use crate::error::{EditError, NumericField};
use crate::models::tax::{ensure_non_negative, line_amounts};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog product. Opaque to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(pub i64);

impl From<i64> for ProductRef {
    fn from(id: i64) -> Self {
        ProductRef(id)
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single-field edit, as produced by one input of the detail form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    ProductRef(ProductRef),
    Quantity(i64),
    UnitPrice(Decimal),
    Discount(Decimal),
}

/// One product/quantity/price/discount row and its derived tax.
///
/// Fields are private so that `tax` can only change through recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    id: Option<i64>,
    product_ref: ProductRef,
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
    net: Decimal,
    tax: Decimal,
}

impl LineItem {
    /// A fresh line with one unit, no price and no discount.
    pub fn new(product_ref: ProductRef) -> Self {
        Self {
            id: None,
            product_ref,
            quantity: 1,
            unit_price: Decimal::ZERO,
            discount: Decimal::ZERO,
            net: Decimal::ZERO,
            tax: Decimal::ZERO,
        }
    }

    pub fn create(
        product_ref: ProductRef,
        quantity: i64,
        unit_price: Decimal,
        discount: Decimal,
    ) -> Result<Self, EditError> {
        ensure_non_negative(NumericField::Quantity, Decimal::from(quantity))?;
        ensure_non_negative(NumericField::UnitPrice, unit_price)?;
        ensure_non_negative(NumericField::Discount, discount)?;
        let amounts = line_amounts(quantity, unit_price, discount)?;

        Ok(Self {
            id: None,
            product_ref,
            quantity,
            unit_price,
            discount,
            net: amounts.net,
            tax: amounts.tax,
        })
    }

    /// Attach the identifier the API assigned to this line.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn product_ref(&self) -> ProductRef {
        self.product_ref
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// `quantity * unit_price - discount` rounded to cents. Negative when the
    /// discount exceeds the gross amount.
    pub fn net(&self) -> Decimal {
        self.net
    }

    /// Net plus tax. Known to fit since the line was last computed.
    pub fn total(&self) -> Decimal {
        self.net + self.tax
    }

    /// Apply one field edit in place.
    ///
    /// On error the item is left exactly as it was.
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), EditError> {
        let (quantity, unit_price, discount) = match update {
            FieldUpdate::ProductRef(product_ref) => {
                self.product_ref = product_ref;
                return Ok(());
            }
            FieldUpdate::Quantity(quantity) => {
                ensure_non_negative(NumericField::Quantity, Decimal::from(quantity))?;
                (quantity, self.unit_price, self.discount)
            }
            FieldUpdate::UnitPrice(unit_price) => {
                ensure_non_negative(NumericField::UnitPrice, unit_price)?;
                (self.quantity, unit_price, self.discount)
            }
            FieldUpdate::Discount(discount) => {
                ensure_non_negative(NumericField::Discount, discount)?;
                (self.quantity, self.unit_price, discount)
            }
        };

        let amounts = line_amounts(quantity, unit_price, discount)?;
        self.quantity = quantity;
        self.unit_price = unit_price;
        self.discount = discount;
        self.net = amounts.net;
        self.tax = amounts.tax;
        Ok(())
    }

    /// Like [`LineItem::set_field`] but returns the edited copy.
    pub fn with_field(&self, update: FieldUpdate) -> Result<Self, EditError> {
        let mut item = self.clone();
        item.set_field(update)?;
        Ok(item)
    }
}
