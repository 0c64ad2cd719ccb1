use rust_decimal::Decimal;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::AllowanceKind;

/// Errors that abort a tax calculation. None of them carry partial results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxCalculationError {
    /// Withholding is negative or larger than the total income.
    #[error("invalid withholding {withholding} for total income {total_income}")]
    InvalidWithholding {
        withholding: Decimal,
        total_income: Decimal,
    },

    #[error("allowance '{kind}' has negative amount {amount}")]
    NegativeAllowance { kind: AllowanceKind, amount: Decimal },

    /// Summing the allowances, or subtracting them from the income, left the
    /// representable decimal range.
    #[error("allowance total is out of range")]
    AllowanceOverflow,

    /// A batch row could not be parsed or failed validation. `row` is the
    /// zero-based index in the input, where row 0 is the header.
    #[error("row {row}: {reason}")]
    RowParse { row: usize, reason: String },

    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(#[from] RepositoryError),
}
