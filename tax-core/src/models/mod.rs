mod allowance;
mod tax_bracket;
mod tax_calculation;
mod tax_settings;

pub use allowance::{AllowanceEntry, AllowanceKind};
pub use tax_bracket::{TAX_BRACKETS, TaxBracket};
pub use tax_calculation::{BatchTaxResult, TaxCalculationRequest, TaxCalculationResult, TaxLevel};
pub use tax_settings::TaxSettings;
