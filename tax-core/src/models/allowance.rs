use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllowanceKind {
    Donation,
    /// Receipt-based deduction, capped by the admin-configured limit.
    KReceipt,
    #[serde(other)]
    Other,
}

impl AllowanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AllowanceKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deductible amount claimed by the taxpayer for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub kind: AllowanceKind,
    pub amount: Decimal,
}

impl AllowanceEntry {
    pub fn new(
        kind: AllowanceKind,
        amount: Decimal,
    ) -> Self {
        Self { kind, amount }
    }
}
