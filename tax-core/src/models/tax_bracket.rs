use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A single marginal tax bracket.
///
/// Both bounds are inclusive. The top bracket has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    pub ordinal: u8,
    pub label: &'static str,
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns `true` when `income` lies inside this bracket's inclusive bounds.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.lower_bound && self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// The progressive income tax schedule, ascending by ordinal.
pub const TAX_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        ordinal: 1,
        label: "0 - 150,000",
        lower_bound: dec!(0),
        upper_bound: Some(dec!(150000)),
        rate: dec!(0.00),
    },
    TaxBracket {
        ordinal: 2,
        label: "150,001 - 500,000",
        lower_bound: dec!(150001),
        upper_bound: Some(dec!(500000)),
        rate: dec!(0.10),
    },
    TaxBracket {
        ordinal: 3,
        label: "500,001 - 1,000,000",
        lower_bound: dec!(500001),
        upper_bound: Some(dec!(1000000)),
        rate: dec!(0.15),
    },
    TaxBracket {
        ordinal: 4,
        label: "1,000,001 - 2,000,000",
        lower_bound: dec!(1000001),
        upper_bound: Some(dec!(2000000)),
        rate: dec!(0.20),
    },
    TaxBracket {
        ordinal: 5,
        label: "2,000,001 ขึ้นไป",
        lower_bound: dec!(2000001),
        upper_bound: None,
        rate: dec!(0.35),
    },
];
