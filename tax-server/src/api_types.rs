//! Request and response bodies for every tax-server endpoint.
//!
//! Amounts travel as JSON numbers and are converted to `Decimal` at this
//! boundary. No business logic lives here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{
    AllowanceEntry, AllowanceKind, BatchTaxResult, TaxCalculationRequest, TaxCalculationResult,
    TaxLevel,
};

/// `None` when there is nothing to refund, so the field is left out.
fn refund_field(refund: Decimal) -> Option<Decimal> {
    if refund.is_zero() { None } else { Some(refund) }
}

// ---------------------------------------------------------------------------
// POST /tax/calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowancePayload {
    pub allowance_type: AllowanceKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub wht: Decimal,
    #[serde(default)]
    pub allowances: Vec<AllowancePayload>,
}

impl From<TaxCalculationPayload> for TaxCalculationRequest {
    fn from(payload: TaxCalculationPayload) -> Self {
        Self {
            total_income: payload.total_income,
            withholding: payload.wht,
            allowances: payload
                .allowances
                .into_iter()
                .map(|a| AllowanceEntry::new(a.allowance_type, a.amount))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLevelPayload {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<TaxLevel> for TaxLevelPayload {
    fn from(level: TaxLevel) -> Self {
        Self {
            level: level.label,
            tax: level.tax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResponse {
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_refund: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    pub tax_level: Vec<TaxLevelPayload>,
}

impl From<TaxCalculationResult> for TaxCalculationResponse {
    fn from(result: TaxCalculationResult) -> Self {
        Self {
            tax_refund: refund_field(result.refund),
            tax: result.tax,
            tax_level: result.breakdown.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// POST /tax/calculations/upload-csv
// ---------------------------------------------------------------------------

/// One entry of the upload response, in input row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTaxPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_refund: Option<Decimal>,
}

impl From<BatchTaxResult> for BatchTaxPayload {
    fn from(result: BatchTaxResult) -> Self {
        Self {
            total_income: result.total_income,
            tax: result.tax,
            tax_refund: refund_field(result.refund),
        }
    }
}

// ---------------------------------------------------------------------------
// /admin/deductions/*
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDeductionResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KReceiptResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt: Decimal,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
