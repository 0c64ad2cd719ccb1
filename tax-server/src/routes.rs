//! Axum router and all HTTP handlers for tax-server.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. The admin routes carry their own basic-auth layer so
//! tests exercising the bare router still see it.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    routing::post,
};
use tax_core::calculations::allowance::{clamp_k_receipt_cap, clamp_personal_allowance};
use tax_core::calculations::{TaxCalculator, calculate_batch, load_settings};
use tax_core::TaxCalculationRequest;
use tower_http::validate_request::ValidateRequestHeaderLayer;
use tracing::info;

use crate::{
    api_types::{
        BatchTaxPayload, DeductionUpdate, KReceiptResponse, PersonalDeductionResponse,
        TaxCalculationPayload, TaxCalculationResponse,
    },
    csv_loader,
    error::ApiError,
    state::AppState,
};

/// Multipart field carrying the uploaded CSV.
pub const TAX_FILE_FIELD: &str = "taxFile";

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Tracing and CORS layers are **not** applied here; `main.rs` attaches
/// them after this call.
pub fn build_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/deductions/personal", post(update_personal_deduction))
        .route("/deductions/k-receipt", post(update_k_receipt_cap))
        .route_layer(ValidateRequestHeaderLayer::basic(
            &state.admin.username,
            &state.admin.password,
        ));

    Router::new()
        .route("/tax/calculations", post(calculate_tax))
        .route("/tax/calculations/upload-csv", post(upload_csv))
        .nest("/admin", admin)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// POST /tax/calculations
// ---------------------------------------------------------------------------

pub(crate) async fn calculate_tax(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<TaxCalculationPayload>, JsonRejection>,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    let Json(payload) = payload?;
    let request = TaxCalculationRequest::from(payload);

    let settings = load_settings(st.store.as_ref()).await?;
    let result = TaxCalculator::new(settings).calculate(&request)?;

    Ok(Json(result.into()))
}

// ---------------------------------------------------------------------------
// POST /tax/calculations/upload-csv
// ---------------------------------------------------------------------------

pub(crate) async fn upload_csv(
    State(st): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<BatchTaxPayload>>, ApiError> {
    let mut multipart = multipart?;
    let contents = read_tax_file(&mut multipart).await?;
    let rows = csv_loader::load_rows(&contents)?;

    let settings = load_settings(st.store.as_ref()).await?;
    let results = calculate_batch(&TaxCalculator::new(settings), &rows)?;

    info!(rows = results.len(), "csv upload calculated");
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

/// Contents of the first part named [`TAX_FILE_FIELD`]; other parts are
/// skipped.
async fn read_tax_file(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(TAX_FILE_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::BadRequest(format!(
        "missing file field '{TAX_FILE_FIELD}'"
    )))
}

// ---------------------------------------------------------------------------
// POST /admin/deductions/personal
// ---------------------------------------------------------------------------

/// Clamps the submitted amount, stores it and echoes what was stored.
pub(crate) async fn update_personal_deduction(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<DeductionUpdate>, JsonRejection>,
) -> Result<Json<PersonalDeductionResponse>, ApiError> {
    let Json(update) = payload?;
    let amount = clamp_personal_allowance(update.amount);

    st.store.set_personal_allowance(amount).await?;

    info!(requested = %update.amount, %amount, "personal deduction updated");
    Ok(Json(PersonalDeductionResponse {
        personal_deduction: amount,
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/deductions/k-receipt
// ---------------------------------------------------------------------------

pub(crate) async fn update_k_receipt_cap(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<DeductionUpdate>, JsonRejection>,
) -> Result<Json<KReceiptResponse>, ApiError> {
    let Json(update) = payload?;
    let amount = clamp_k_receipt_cap(update.amount);

    st.store.set_k_receipt_cap(amount).await?;

    info!(requested = %update.amount, %amount, "k-receipt cap updated");
    Ok(Json(KReceiptResponse { k_receipt: amount }))
}
