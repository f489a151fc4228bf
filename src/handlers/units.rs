// src/handlers/units.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermUnitsManage, PermUsersView, RequirePermission},
    models::unit::BusinessUnit,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Zona Norte")]
    pub name: String,

    #[schema(example = "Fortaleza")]
    pub city: Option<String>,
}

// POST /api/units
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Units",
    request_body = CreateUnitPayload,
    responses(
        (status = 201, description = "Unidade criada", body = BusinessUnit),
        (status = 409, description = "Nome já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermUnitsManage>,
    Json(payload): Json<CreateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .unit_repo
        .create_unit(&payload.name, payload.city.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(unit)))
}

// GET /api/units — qualquer um que enxerga usuários pode listar as filiais.
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Units",
    responses(
        (status = 200, description = "Lista de unidades", body = [BusinessUnit])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_units(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermUsersView>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state.unit_repo.list_units().await?;
    Ok(Json(units))
}
