use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::TaxCalculationError;

/// Liability after withholding has been netted off.
///
/// At most one of the two fields is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub tax: Decimal,
    pub refund: Decimal,
}

/// Withholding must be non-negative and may not exceed the total income.
pub fn validate_withholding(
    withholding: Decimal,
    total_income: Decimal,
) -> Result<Decimal, TaxCalculationError> {
    if withholding < Decimal::ZERO || withholding > total_income {
        return Err(TaxCalculationError::InvalidWithholding {
            withholding,
            total_income,
        });
    }
    Ok(withholding)
}

/// Nets `withholding` against the computed `tax`.
pub fn reconcile(
    tax: Decimal,
    withholding: Decimal,
) -> Reconciliation {
    let net = tax - withholding;
    if net < Decimal::ZERO {
        Reconciliation {
            tax: Decimal::ZERO,
            refund: -net,
        }
    } else {
        Reconciliation {
            tax: net,
            refund: Decimal::ZERO,
        }
    }
}
