//! IGV computation and money rounding.

use crate::error::{EditError, NumericField};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Value-added tax applied to every line's taxable base.
pub const TAX_RATE: Decimal = dec!(0.18);

/// Decimal places kept for money amounts at the line item boundary.
pub const MONEY_SCALE: u32 = 2;

/// Round to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `quantity * unit_price - discount`, unrounded and possibly negative.
pub fn line_net(quantity: i64, unit_price: Decimal, discount: Decimal) -> Result<Decimal, EditError> {
    Decimal::from(quantity)
        .checked_mul(unit_price)
        .and_then(|gross| gross.checked_sub(discount))
        .ok_or(EditError::Overflow { amount: "line net" })
}

/// Line net floored at zero.
pub fn taxable_base(
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
) -> Result<Decimal, EditError> {
    Ok(line_net(quantity, unit_price, discount)?.max(Decimal::ZERO))
}

/// Tax owed on one line, rounded to cents.
pub fn compute_tax(
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
) -> Result<Decimal, EditError> {
    taxable_base(quantity, unit_price, discount)?
        .checked_mul(TAX_RATE)
        .map(round_money)
        .ok_or(EditError::Overflow { amount: "line tax" })
}

/// Rounded net and tax of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineAmounts {
    pub net: Decimal,
    pub tax: Decimal,
}

/// Net and tax for the given inputs. Fails unless `net + tax` is representable
/// too, so a line's total never overflows afterwards.
pub(crate) fn line_amounts(
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
) -> Result<LineAmounts, EditError> {
    let net = round_money(line_net(quantity, unit_price, discount)?);
    let tax = compute_tax(quantity, unit_price, discount)?;
    net.checked_add(tax)
        .ok_or(EditError::Overflow { amount: "line total" })?;
    Ok(LineAmounts { net, tax })
}

/// Sum of `amounts`, failing instead of overflowing.
pub(crate) fn checked_sum<I>(amounts: I, amount: &'static str) -> Result<Decimal, EditError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value)
            .ok_or(EditError::Overflow { amount })
    })
}

pub(crate) fn ensure_non_negative(field: NumericField, value: Decimal) -> Result<(), EditError> {
    if value < Decimal::ZERO {
        return Err(EditError::Validation { field, value });
    }
    Ok(())
}
