//! Batch calculation over raw CSV rows.
//!
//! Rows arrive as plain string fields in the order
//! `totalIncome, wht, donation`. Row 0 is the header and is skipped. The
//! first row that fails to parse or validate aborts the whole batch and no
//! results are returned.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::calculations::{TaxCalculationError, TaxCalculator};
use crate::models::{AllowanceEntry, AllowanceKind, BatchTaxResult, TaxCalculationRequest};

const FIELD_NAMES: [&str; 3] = ["totalIncome", "wht", "donation"];

/// Runs [`TaxCalculator`] over every data row in `rows`, in order.
///
/// Each row is taxed on its total income less the personal allowance and
/// the capped donation. The receipt-deduction cap plays no part here.
///
/// # Errors
///
/// [`TaxCalculationError::RowParse`] naming the first offending row.
pub fn calculate_batch(
    calculator: &TaxCalculator<'_>,
    rows: &[Vec<String>],
) -> Result<Vec<BatchTaxResult>, TaxCalculationError> {
    let mut results = Vec::with_capacity(rows.len().saturating_sub(1));

    for (index, fields) in rows.iter().enumerate().skip(1) {
        let request = parse_row(index, fields)?;

        let result = calculator.calculate(&request).map_err(|e| {
            tracing::debug!(row = index, error = %e, "batch row rejected");
            TaxCalculationError::RowParse {
                row: index,
                reason: e.to_string(),
            }
        })?;

        results.push(BatchTaxResult {
            total_income: request.total_income,
            tax: result.tax,
            refund: result.refund,
        });
    }

    tracing::debug!(rows = results.len(), "batch calculated");
    Ok(results)
}

fn parse_row(
    row: usize,
    fields: &[String],
) -> Result<TaxCalculationRequest, TaxCalculationError> {
    if fields.len() < FIELD_NAMES.len() {
        return Err(TaxCalculationError::RowParse {
            row,
            reason: format!(
                "expected {} fields, found {}",
                FIELD_NAMES.len(),
                fields.len()
            ),
        });
    }

    let total_income = parse_amount(row, FIELD_NAMES[0], &fields[0])?;
    let withholding = parse_amount(row, FIELD_NAMES[1], &fields[1])?;
    let donation = parse_amount(row, FIELD_NAMES[2], &fields[2])?;

    Ok(TaxCalculationRequest {
        total_income,
        withholding,
        allowances: vec![AllowanceEntry::new(AllowanceKind::Donation, donation)],
    })
}

fn parse_amount(
    row: usize,
    name: &str,
    raw: &str,
) -> Result<Decimal, TaxCalculationError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TaxCalculationError::RowParse {
            row,
            reason: format!("invalid {name} '{raw}'"),
        })
}
