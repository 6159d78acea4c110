//! Document aggregate: an ordered set of line items and the totals derived
//! from them.

use crate::error::EditError;
use crate::models::line_item::{FieldUpdate, LineItem};
use crate::models::tax::checked_sum;
use rust_decimal::Decimal;
use serde::Serialize;

/// Subtotal, tax and grand total of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub grand_total: Decimal,
}

/// Line items of one document, in display order.
///
/// Totals are never stored; every call to [`Document::totals`] recomputes them
/// from the current items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    line_items: Vec<LineItem>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_line_items(line_items: Vec<LineItem>) -> Self {
        Self { line_items }
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.line_items.get(index)
    }

    /// Append a line and return its index. The same product may appear on
    /// several lines.
    pub fn add_line_item(&mut self, item: LineItem) -> usize {
        self.line_items.push(item);
        self.line_items.len() - 1
    }

    pub fn update_line_item(
        &mut self,
        index: usize,
        update: FieldUpdate,
    ) -> Result<&LineItem, EditError> {
        let len = self.line_items.len();
        let item = self
            .line_items
            .get_mut(index)
            .ok_or(EditError::Index { index, len })?;
        item.set_field(update)?;
        Ok(&*item)
    }

    /// Remove the line at `index`. Lines after it move down by one.
    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem, EditError> {
        if index >= self.line_items.len() {
            return Err(EditError::Index {
                index,
                len: self.line_items.len(),
            });
        }
        Ok(self.line_items.remove(index))
    }

    /// Fails with [`EditError::Overflow`] when a sum does not fit in a
    /// `Decimal`; the document itself is never affected.
    pub fn totals(&self) -> Result<DocumentTotals, EditError> {
        let subtotal = checked_sum(self.line_items.iter().map(LineItem::net), "subtotal")?;
        let total_tax = checked_sum(self.line_items.iter().map(LineItem::tax), "total tax")?;
        let grand_total = subtotal
            .checked_add(total_tax)
            .ok_or(EditError::Overflow {
                amount: "grand total",
            })?;

        Ok(DocumentTotals {
            subtotal,
            total_tax,
            grand_total,
        })
    }
}

impl FromIterator<LineItem> for Document {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self::from_line_items(iter.into_iter().collect())
    }
}
