// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{
        PermAccountsManage, PermAccountsView, PermChargesEdit, PermChargesView,
        PermExtractsView, RequirePermission,
    },
    models::finance::{BankAccount, Charge, ChargeStatus, StatementMovement},
};

// ---
// Validação customizada
// ---
fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    #[schema(example = "Centro")]
    pub unit: String,

    #[serde(default = "default_bank_name")]
    #[schema(example = "BTG Pactual")]
    pub bank_name: String,

    #[validate(length(min = 1, message = "A agência é obrigatória."))]
    #[schema(example = "0050")]
    pub branch: String,

    #[validate(length(min = 1, message = "O número da conta é obrigatório."))]
    #[schema(example = "1234567-8")]
    pub account_number: String,

    #[schema(example = "financeiro@autoescolaideal.com.br")]
    pub pix_key: Option<String>,
}

fn default_bank_name() -> String {
    "BTG Pactual".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChargePayload {
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    #[schema(example = "Centro")]
    pub unit: String,

    pub account_id: Uuid,

    #[validate(length(min = 1, message = "O nome do aluno é obrigatório."))]
    #[schema(example = "João da Silva")]
    pub customer_name: String,

    #[validate(length(min = 1, message = "O documento do aluno é obrigatório."))]
    #[schema(example = "123.456.789-00")]
    pub customer_document: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "350.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-10")]
    pub due_date: NaiveDate,

    pub digitable_line: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChargePayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,

    pub digitable_line: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListAccountsQuery {
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListChargesQuery {
    pub unit: Option<String>,
    pub status: Option<ChargeStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StatementQuery {
    pub account_id: Uuid,

    #[param(value_type = String, format = Date)]
    pub from: NaiveDate,

    #[param(value_type = String, format = Date)]
    pub to: NaiveDate,
}

// ---
// Contas
// ---

// POST /api/accounts
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Finance",
    request_body = CreateAccountPayload,
    responses(
        (status = 201, description = "Conta cadastrada", body = BankAccount),
        (status = 409, description = "Agência/conta já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermAccountsManage>,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let account = app_state
        .finance_repo
        .create_account(
            &payload.unit,
            &payload.bank_name,
            &payload.branch,
            &payload.account_number,
            payload.pix_key.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

// GET /api/accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Finance",
    params(ListAccountsQuery),
    responses(
        (status = 200, description = "Lista de contas", body = [BankAccount])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermAccountsView>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = app_state
        .finance_repo
        .list_accounts(query.unit.as_deref())
        .await?;
    Ok(Json(accounts))
}

// ---
// Cobranças
// ---

// POST /api/charges
#[utoipa::path(
    post,
    path = "/api/charges",
    tag = "Finance",
    request_body = CreateChargePayload,
    responses(
        (status = 201, description = "Cobrança criada", body = Charge),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_charge(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesEdit>,
    Json(payload): Json<CreateChargePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // A conta de destino precisa existir e estar ativa
    let account = app_state
        .finance_repo
        .find_account(payload.account_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta".to_string()))?;

    if !account.active {
        return Err(AppError::AccountInactive);
    }

    let charge = app_state
        .finance_repo
        .create_charge(
            &payload.unit,
            payload.account_id,
            &payload.customer_name,
            &payload.customer_document,
            payload.amount,
            payload.due_date,
            payload.digitable_line.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(charge)))
}

// GET /api/charges
#[utoipa::path(
    get,
    path = "/api/charges",
    tag = "Finance",
    params(ListChargesQuery),
    responses(
        (status = 200, description = "Lista de cobranças", body = [Charge])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_charges(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesView>,
    Query(query): Query<ListChargesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let charges = app_state
        .finance_repo
        .list_charges(query.unit.as_deref(), query.status)
        .await?;
    Ok(Json(charges))
}

// GET /api/charges/{id}
#[utoipa::path(
    get,
    path = "/api/charges/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "Cobrança", body = Charge),
        (status = 404, description = "Cobrança não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_charge(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let charge = app_state
        .finance_repo
        .find_charge(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cobrança".to_string()))?;
    Ok(Json(charge))
}

// PUT /api/charges/{id} — só cobrança em aberto pode ser alterada.
#[utoipa::path(
    put,
    path = "/api/charges/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    request_body = UpdateChargePayload,
    responses(
        (status = 200, description = "Cobrança atualizada", body = Charge),
        (status = 404, description = "Cobrança não encontrada"),
        (status = 409, description = "Cobrança quitada ou cancelada não pode ser alterada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_charge(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesEdit>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateChargePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Distingue 404 de 409 antes do UPDATE guardado
    let existing = app_state
        .finance_repo
        .find_charge(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cobrança".to_string()))?;

    if !existing.status.is_open() {
        return Err(AppError::ChargeNotOpen);
    }

    let charge = app_state
        .finance_repo
        .update_charge(id, payload.amount, payload.due_date, payload.digitable_line.as_deref())
        .await?;

    Ok(Json(charge))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverdueReport {
    #[schema(example = 3)]
    pub updated: u64,
}

// POST /api/charges/refresh-overdue — marca pendentes vencidas como 'overdue'.
#[utoipa::path(
    post,
    path = "/api/charges/refresh-overdue",
    tag = "Finance",
    responses(
        (status = 200, description = "Quantidade de cobranças marcadas", body = OverdueReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn refresh_overdue(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesEdit>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.finance_service.refresh_overdue().await?;
    Ok(Json(OverdueReport { updated }))
}

// POST /api/charges/{id}/settle — baixa com lançamento no extrato.
#[utoipa::path(
    post,
    path = "/api/charges/{id}/settle",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "Cobrança paga", body = Charge),
        (status = 409, description = "Cobrança não está em aberto")
    ),
    security(("api_jwt" = []))
)]
pub async fn settle_charge(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesEdit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let charge = app_state.finance_service.settle_charge(id).await?;
    Ok(Json(charge))
}

// POST /api/charges/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/charges/{id}/cancel",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da cobrança")),
    responses(
        (status = 200, description = "Cobrança cancelada", body = Charge),
        (status = 409, description = "Cobrança não está em aberto")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_charge(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermChargesEdit>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let charge = app_state.finance_service.cancel_charge(id).await?;
    Ok(Json(charge))
}

// ---
// Extrato
// ---

// GET /api/statements
#[utoipa::path(
    get,
    path = "/api/statements",
    tag = "Finance",
    params(StatementQuery),
    responses(
        (status = 200, description = "Movimentos do período", body = [StatementMovement])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_statement(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermExtractsView>,
    Query(query): Query<StatementQuery>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state
        .finance_repo
        .list_movements(query.account_id, query.from, query.to)
        .await?;
    Ok(Json(movements))
}
