// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::finance::StatementQuery,
    middleware::rbac::{PermChargesView, PermExtractsView, RequirePermission},
};

// GET /api/statements/pdf — extrato do período para download.
#[utoipa::path(
    get,
    path = "/api/statements/pdf",
    tag = "Finance",
    params(StatementQuery),
    responses(
        (status = 200, description = "PDF do extrato", content_type = "application/pdf")
    ),
    security(("api_jwt" = []))
)]
pub async fn statement_pdf(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermExtractsView>,
    Query(query): Query<StatementQuery>,
) -> Result<Response, AppError> {
    let pdf_bytes = app_state
        .document_service
        .generate_statement_pdf(query.account_id, query.from, query.to)
        .await?;

    // Headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"extrato_{}.pdf\"", query.account_id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

// GET /api/charges/{id}/qrcode.png — QR de pagamento da cobrança.
#[utoipa::path(
    get,
    path = "/api/charges/{id}/qrcode.png",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "PNG do QR Code", content_type = "image/png"),
        (status = 404, description = "Cobrança ou chave PIX não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn charge_qrcode(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesView>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let png_bytes = app_state.document_service.generate_charge_qr_png(id).await?;

    let headers = [(header::CONTENT_TYPE, "image/png".to_string())];
    Ok((headers, png_bytes).into_response())
}
