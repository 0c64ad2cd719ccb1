use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The two admin-tunable settings shared by every calculation.
///
/// Values held here are already clamped; see
/// [`crate::calculations::load_settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    pub personal_allowance: Decimal,
    pub k_receipt_cap: Decimal,
}

impl TaxSettings {
    /// Personal allowance written to a freshly bootstrapped store.
    pub const DEFAULT_PERSONAL_ALLOWANCE: Decimal = dec!(60000);
    /// Receipt-deduction cap written to a freshly bootstrapped store.
    pub const DEFAULT_K_RECEIPT_CAP: Decimal = dec!(50000);
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            personal_allowance: Self::DEFAULT_PERSONAL_ALLOWANCE,
            k_receipt_cap: Self::DEFAULT_K_RECEIPT_CAP,
        }
    }
}
