//! Marginal tax calculation over a bracket schedule.
//!
//! # Boundary arithmetic
//!
//! Starting at the bracket that contains the taxable income and walking down
//! to the first bracket, each bracket taxes
//!
//! ```text
//! amount = min(remaining, upper_bound) - lower_bound + 1
//! ```
//!
//! and `amount` is then subtracted from the remaining income. The `+ 1`
//! makes each bracket's span one unit wider than `upper - lower`, so the
//! boundary value itself is counted exactly once across adjacent brackets.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::BracketSchedule;
//!
//! let schedule = BracketSchedule::default();
//! let result = schedule.calculate(dec!(440000));
//!
//! assert_eq!(result.total, dec!(29000));
//! assert_eq!(result.levels[1].tax, dec!(29000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{TAX_BRACKETS, TaxBracket, TaxLevel};

/// Total tax plus the per-bracket breakdown it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub total: Decimal,
    /// One entry per bracket, ascending, zero for brackets not reached.
    pub levels: Vec<TaxLevel>,
}

/// Calculator over an ordered, contiguous set of brackets.
#[derive(Debug, Clone, Copy)]
pub struct BracketSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketSchedule<'a> {
    /// Brackets must be sorted ascending and contiguous, with only the last
    /// one open-ended.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Index of the bracket that holds `taxable_income`, or `None` when the
    /// income is negative.
    ///
    /// Incomes that fall between an upper bound and the next lower bound
    /// (fractional amounts such as `150000.50`) belong to the higher bracket.
    pub fn find_bracket(
        &self,
        taxable_income: Decimal,
    ) -> Option<usize> {
        if taxable_income < Decimal::ZERO {
            return None;
        }

        self.brackets
            .iter()
            .position(|b| b.upper_bound.is_none_or(|upper| taxable_income <= upper))
    }

    /// Computes the tax owed on `taxable_income` and its breakdown.
    pub fn calculate(
        &self,
        taxable_income: Decimal,
    ) -> BracketTax {
        let mut taxes = vec![Decimal::ZERO; self.brackets.len()];

        match self.find_bracket(taxable_income) {
            Some(top) => {
                tracing::trace!(%taxable_income, bracket = self.brackets[top].ordinal, "bracket matched");

                let mut remaining = taxable_income;
                for index in (0..=top).rev() {
                    let bracket = &self.brackets[index];
                    let ceiling = bracket
                        .upper_bound
                        .map_or(remaining, |upper| remaining.min(upper));
                    let amount = ceiling - bracket.lower_bound + Decimal::ONE;

                    taxes[index] = round_half_up(amount * bracket.rate);
                    remaining -= amount;
                }
            }
            None => {
                tracing::trace!(%taxable_income, "no bracket matched; nothing owed");
            }
        }

        let total = taxes.iter().copied().sum();
        let levels = self
            .brackets
            .iter()
            .zip(taxes)
            .map(|(bracket, tax)| TaxLevel {
                label: bracket.label.to_string(),
                tax,
            })
            .collect();

        BracketTax { total, levels }
    }
}

impl Default for BracketSchedule<'static> {
    fn default() -> Self {
        Self::new(&TAX_BRACKETS)
    }
}
