//! Single-taxpayer tax engine.
//!
//! A calculation runs in a fixed order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Validate withholding against total income |
//! | 2    | Reject negative allowance amounts |
//! | 3    | Cap each allowance according to its kind |
//! | 4    | Total allowance = capped allowances + personal allowance |
//! | 5    | Taxable income = total income - total allowance |
//! | 6    | Tax from the bracket schedule |
//! | 7    | Net withholding off into tax due or refund |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculator;
//! use tax_core::{AllowanceEntry, AllowanceKind, TaxCalculationRequest, TaxSettings};
//!
//! let calculator = TaxCalculator::new(TaxSettings::default());
//! let request = TaxCalculationRequest {
//!     total_income: dec!(500000),
//!     withholding: dec!(0),
//!     allowances: vec![AllowanceEntry::new(AllowanceKind::Donation, dec!(0))],
//! };
//!
//! let result = calculator.calculate(&request).unwrap();
//!
//! assert_eq!(result.tax, dec!(29000));
//! assert_eq!(result.refund, dec!(0));
//! ```

use rust_decimal::Decimal;

use crate::calculations::allowance::{clamp_k_receipt_cap, clamp_personal_allowance, normalize};
use crate::calculations::withholding::{reconcile, validate_withholding};
use crate::calculations::{BracketSchedule, TaxCalculationError};
use crate::db::ConfigStore;
use crate::models::{TaxCalculationRequest, TaxCalculationResult, TaxSettings};

/// Reads both settings from `store`, clamping each on the way out.
///
/// # Errors
///
/// Any store failure is reported as
/// [`TaxCalculationError::ConfigUnavailable`]; no defaults are substituted.
pub async fn load_settings(store: &dyn ConfigStore) -> Result<TaxSettings, TaxCalculationError> {
    let personal_allowance = store.get_personal_allowance().await?;
    let k_receipt_cap = store.get_k_receipt_cap().await?;

    let settings = TaxSettings {
        personal_allowance: clamp_personal_allowance(personal_allowance),
        k_receipt_cap: clamp_k_receipt_cap(k_receipt_cap),
    };
    tracing::debug!(
        personal_allowance = %settings.personal_allowance,
        k_receipt_cap = %settings.k_receipt_cap,
        "settings loaded"
    );
    Ok(settings)
}

/// Computes tax for one taxpayer using a fixed snapshot of the settings.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    schedule: BracketSchedule<'a>,
    settings: TaxSettings,
}

impl TaxCalculator<'static> {
    /// Creates a calculator over the standard bracket table.
    pub fn new(settings: TaxSettings) -> Self {
        Self::with_schedule(BracketSchedule::default(), settings)
    }
}

impl<'a> TaxCalculator<'a> {
    /// Settings are clamped here as well, so a calculator never sees an
    /// out-of-range personal allowance or receipt cap.
    pub fn with_schedule(
        schedule: BracketSchedule<'a>,
        settings: TaxSettings,
    ) -> Self {
        Self {
            schedule,
            settings: TaxSettings {
                personal_allowance: clamp_personal_allowance(settings.personal_allowance),
                k_receipt_cap: clamp_k_receipt_cap(settings.k_receipt_cap),
            },
        }
    }

    pub fn settings(&self) -> &TaxSettings {
        &self.settings
    }

    /// Runs the full calculation for `request`.
    ///
    /// # Errors
    ///
    /// * [`TaxCalculationError::InvalidWithholding`] when withholding is
    ///   negative or exceeds total income.
    /// * [`TaxCalculationError::NegativeAllowance`] when any allowance amount
    ///   is below zero.
    pub fn calculate(
        &self,
        request: &TaxCalculationRequest,
    ) -> Result<TaxCalculationResult, TaxCalculationError> {
        let withholding = validate_withholding(request.withholding, request.total_income)?;
        let taxable_income = self.taxable_income(request)?;

        let bracket_tax = self.schedule.calculate(taxable_income);
        let reconciliation = reconcile(bracket_tax.total, withholding);

        tracing::debug!(
            %taxable_income,
            computed_tax = %bracket_tax.total,
            tax = %reconciliation.tax,
            refund = %reconciliation.refund,
            "tax calculated"
        );

        Ok(TaxCalculationResult {
            refund: reconciliation.refund,
            tax: reconciliation.tax,
            breakdown: bracket_tax.levels,
        })
    }

    /// Total income minus every capped allowance and the personal allowance.
    /// May be negative.
    fn taxable_income(
        &self,
        request: &TaxCalculationRequest,
    ) -> Result<Decimal, TaxCalculationError> {
        let mut total_allowance = self.settings.personal_allowance;

        for entry in &request.allowances {
            if entry.amount < Decimal::ZERO {
                return Err(TaxCalculationError::NegativeAllowance {
                    kind: entry.kind,
                    amount: entry.amount,
                });
            }
            total_allowance = total_allowance
                .checked_add(normalize(*entry, self.settings.k_receipt_cap).amount)
                .ok_or(TaxCalculationError::AllowanceOverflow)?;
        }

        request
            .total_income
            .checked_sub(total_allowance)
            .ok_or(TaxCalculationError::AllowanceOverflow)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::RepositoryError;
    use crate::models::{AllowanceEntry, AllowanceKind};

    // ── in-memory store ──────────────────────────────────────────────────
    struct FixedStore {
        personal_allowance: Result<Decimal, RepositoryError>,
        k_receipt_cap: Result<Decimal, RepositoryError>,
    }

    impl FixedStore {
        fn new(
            personal_allowance: Decimal,
            k_receipt_cap: Decimal,
        ) -> Self {
            Self {
                personal_allowance: Ok(personal_allowance),
                k_receipt_cap: Ok(k_receipt_cap),
            }
        }
    }

    #[async_trait]
    impl ConfigStore for FixedStore {
        async fn get_personal_allowance(&self) -> Result<Decimal, RepositoryError> {
            self.personal_allowance.clone()
        }
        async fn get_k_receipt_cap(&self) -> Result<Decimal, RepositoryError> {
            self.k_receipt_cap.clone()
        }
        async fn set_personal_allowance(
            &self,
            _amount: Decimal,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn set_k_receipt_cap(
            &self,
            _amount: Decimal,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }
    }

    fn request(
        total_income: Decimal,
        withholding: Decimal,
        allowances: Vec<AllowanceEntry>,
    ) -> TaxCalculationRequest {
        TaxCalculationRequest {
            total_income,
            withholding,
            allowances,
        }
    }

    fn breakdown(result: &TaxCalculationResult) -> Vec<Decimal> {
        result.breakdown.iter().map(|l| l.tax).collect()
    }

    // =========================================================================
    // load_settings tests
    // =========================================================================

    #[tokio::test]
    async fn load_settings_passes_through_values_in_range() {
        let store = FixedStore::new(dec!(60000), dec!(50000));

        let settings = load_settings(&store).await;

        assert_eq!(settings, Ok(TaxSettings::default()));
    }

    #[tokio::test]
    async fn load_settings_clamps_low_personal_allowance() {
        let store = FixedStore::new(dec!(5000), dec!(50000));

        let settings = load_settings(&store).await.unwrap();

        assert_eq!(settings.personal_allowance, dec!(10001));
    }

    #[tokio::test]
    async fn load_settings_clamps_high_k_receipt_cap() {
        let store = FixedStore::new(dec!(60000), dec!(200000));

        let settings = load_settings(&store).await.unwrap();

        assert_eq!(settings.k_receipt_cap, dec!(100000));
    }

    #[tokio::test]
    async fn load_settings_reports_store_failure() {
        let store = FixedStore {
            personal_allowance: Ok(dec!(60000)),
            k_receipt_cap: Err(RepositoryError::Database("disk I/O error".to_string())),
        };

        let settings = load_settings(&store).await;

        assert_eq!(
            settings,
            Err(TaxCalculationError::ConfigUnavailable(
                RepositoryError::Database("disk I/O error".to_string())
            ))
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_income_only() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(
                dec!(500000),
                dec!(0),
                vec![AllowanceEntry::new(AllowanceKind::Donation, dec!(0))],
            ))
            .unwrap();

        assert_eq!(result.tax, dec!(29000));
        assert_eq!(result.refund, dec!(0));
        assert_eq!(
            breakdown(&result),
            vec![dec!(0), dec!(29000), dec!(0), dec!(0), dec!(0)]
        );
    }

    #[test]
    fn calculate_withholding_reduces_tax_due() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(dec!(500000), dec!(25000), vec![]))
            .unwrap();

        assert_eq!(result.tax, dec!(4000));
        assert_eq!(result.refund, dec!(0));
    }

    #[test]
    fn calculate_excess_withholding_becomes_refund() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(dec!(500000), dec!(30000), vec![]))
            .unwrap();

        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.refund, dec!(1000));
    }

    #[test]
    fn calculate_caps_donation() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(
                dec!(500000),
                dec!(0),
                vec![AllowanceEntry::new(AllowanceKind::Donation, dec!(200000))],
            ))
            .unwrap();

        // 500000 - 60000 - 100000 = 340000 -> (340000 - 150001 + 1) * 0.10
        assert_eq!(result.tax, dec!(19000));
    }

    #[test]
    fn calculate_caps_k_receipt_at_configured_limit() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(
                dec!(500000),
                dec!(0),
                vec![
                    AllowanceEntry::new(AllowanceKind::KReceipt, dec!(200000)),
                    AllowanceEntry::new(AllowanceKind::Donation, dec!(100000)),
                ],
            ))
            .unwrap();

        // 500000 - 60000 - 50000 - 100000 = 290000 -> 14000
        assert_eq!(result.tax, dec!(14000));
    }

    #[test]
    fn calculate_uses_custom_personal_allowance() {
        let calculator = TaxCalculator::new(TaxSettings {
            personal_allowance: dec!(100000),
            k_receipt_cap: dec!(50000),
        });

        let result = calculator
            .calculate(&request(dec!(500000), dec!(0), vec![]))
            .unwrap();

        // 400000 taxable -> 25000
        assert_eq!(result.tax, dec!(25000));
    }

    #[test]
    fn calculate_clamps_settings_given_directly() {
        let calculator = TaxCalculator::new(TaxSettings {
            personal_allowance: dec!(5000),
            k_receipt_cap: dec!(200000),
        });

        assert_eq!(
            calculator.settings(),
            &TaxSettings {
                personal_allowance: dec!(10001),
                k_receipt_cap: dec!(100000),
            }
        );
    }

    #[test]
    fn calculate_allowances_exceeding_income_owe_nothing() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(
                dec!(50000),
                dec!(1000),
                vec![AllowanceEntry::new(AllowanceKind::Other, dec!(10000))],
            ))
            .unwrap();

        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.refund, dec!(1000));
        assert_eq!(breakdown(&result), vec![dec!(0); 5]);
    }

    #[test]
    fn calculate_rejects_withholding_above_income() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator.calculate(&request(dec!(100000), dec!(100001), vec![]));

        assert_eq!(
            result,
            Err(TaxCalculationError::InvalidWithholding {
                withholding: dec!(100001),
                total_income: dec!(100000),
            })
        );
    }

    #[test]
    fn calculate_rejects_negative_withholding() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator.calculate(&request(dec!(100000), dec!(-1), vec![]));

        assert!(matches!(
            result,
            Err(TaxCalculationError::InvalidWithholding { .. })
        ));
    }

    #[test]
    fn calculate_rejects_negative_allowance() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator.calculate(&request(
            dec!(500000),
            dec!(0),
            vec![AllowanceEntry::new(AllowanceKind::Donation, dec!(-100))],
        ));

        assert_eq!(
            result,
            Err(TaxCalculationError::NegativeAllowance {
                kind: AllowanceKind::Donation,
                amount: dec!(-100),
            })
        );
    }

    #[test]
    fn calculate_rejects_allowance_total_beyond_decimal_range() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator.calculate(&request(
            dec!(500000),
            dec!(0),
            vec![
                AllowanceEntry::new(AllowanceKind::Other, dec!(50000000000000000000000000000)),
                AllowanceEntry::new(AllowanceKind::Other, dec!(50000000000000000000000000000)),
            ],
        ));

        assert_eq!(result, Err(TaxCalculationError::AllowanceOverflow));
    }

    #[test]
    fn calculate_accepts_single_allowance_near_decimal_limit() {
        let calculator = TaxCalculator::new(TaxSettings::default());

        let result = calculator
            .calculate(&request(
                dec!(500000),
                dec!(0),
                vec![AllowanceEntry::new(
                    AllowanceKind::Other,
                    dec!(50000000000000000000000000000),
                )],
            ))
            .unwrap();

        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.refund, dec!(0));
    }

    #[test]
    fn calculate_reconciliation_invariant_holds() {
        let calculator = TaxCalculator::new(TaxSettings::default());
        let incomes = [dec!(0), dec!(210000), dec!(500000), dec!(1500000), dec!(4000000)];

        for income in incomes {
            let computed = calculator
                .calculate(&request(income, dec!(0), vec![]))
                .unwrap()
                .tax;

            for withholding in [dec!(0), income / dec!(20), income / dec!(2), income] {
                let result = calculator
                    .calculate(&request(income, withholding, vec![]))
                    .unwrap();

                assert_eq!(result.tax - result.refund, computed - withholding);
                assert!(result.tax.is_zero() || result.refund.is_zero());
            }
        }
    }
}
