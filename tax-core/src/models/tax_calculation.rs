use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AllowanceEntry;

/// Input for a single-taxpayer calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationRequest {
    pub total_income: Decimal,
    pub withholding: Decimal,
    pub allowances: Vec<AllowanceEntry>,
}

/// Tax attributed to one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub label: String,
    pub tax: Decimal,
}

/// Outcome of a single-taxpayer calculation.
///
/// At most one of `tax` and `refund` is non-zero. `breakdown` always lists
/// every bracket in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub refund: Decimal,
    pub tax: Decimal,
    pub breakdown: Vec<TaxLevel>,
}

/// Outcome of one row of a batch calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTaxResult {
    pub total_income: Decimal,
    pub tax: Decimal,
    pub refund: Decimal,
}
