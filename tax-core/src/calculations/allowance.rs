//! Per-type allowance caps and the clamping rules for the admin settings.
//!
//! Every function here is total: out-of-range input is pulled back into
//! range instead of being rejected.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::clamp;
use crate::models::{AllowanceEntry, AllowanceKind};

/// Largest donation that may be deducted.
pub const DONATION_CAP: Decimal = dec!(100000);

/// Bounds applied to the configured personal allowance.
pub const PERSONAL_ALLOWANCE_FLOOR: Decimal = dec!(10001);
pub const PERSONAL_ALLOWANCE_CEILING: Decimal = dec!(100000);

/// Bounds applied to the configured receipt-deduction cap.
pub const K_RECEIPT_CAP_FLOOR: Decimal = dec!(1);
pub const K_RECEIPT_CAP_CEILING: Decimal = dec!(100000);

pub fn cap_donation(amount: Decimal) -> Decimal {
    amount.min(DONATION_CAP)
}

/// `cap` is expected to have gone through [`clamp_k_receipt_cap`] already.
pub fn cap_k_receipt(
    amount: Decimal,
    cap: Decimal,
) -> Decimal {
    amount.min(cap)
}

pub fn clamp_personal_allowance(amount: Decimal) -> Decimal {
    clamp(amount, PERSONAL_ALLOWANCE_FLOOR, PERSONAL_ALLOWANCE_CEILING)
}

pub fn clamp_k_receipt_cap(amount: Decimal) -> Decimal {
    clamp(amount, K_RECEIPT_CAP_FLOOR, K_RECEIPT_CAP_CEILING)
}

/// Applies the cap matching the entry's kind. Unknown kinds pass through.
pub fn normalize(
    entry: AllowanceEntry,
    k_receipt_cap: Decimal,
) -> AllowanceEntry {
    let amount = match entry.kind {
        AllowanceKind::Donation => cap_donation(entry.amount),
        AllowanceKind::KReceipt => cap_k_receipt(entry.amount, k_receipt_cap),
        AllowanceKind::Other => entry.amount,
    };
    AllowanceEntry { amount, ..entry }
}
