// src/handlers/rbac.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermUsersManage, RequirePermission},
    },
    models::rbac::{MenuEntryResponse, NormalizationReport, PermissionInfo},
    services::permissions,
};

// GET /api/menu — entradas de navegação visíveis para o usuário logado.
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "RBAC",
    responses(
        (status = 200, description = "Menu visível", body = [MenuEntryResponse])
    ),
    security(("api_jwt" = []))
)]
pub async fn get_menu(user: AuthenticatedUser) -> impl IntoResponse {
    let effective = permissions::resolve_effective_permissions(&user.0);
    Json(permissions::visible_menu(&effective))
}

// GET /api/permissions — catálogo para o frontend montar a tela de edição.
#[utoipa::path(
    get,
    path = "/api/permissions",
    tag = "RBAC",
    responses(
        (status = 200, description = "Catálogo de permissões", body = [PermissionInfo])
    )
)]
pub async fn list_permissions() -> impl IntoResponse {
    Json(permissions::CATALOG)
}

// POST /api/admin/normalize-permissions
// Migração única do vocabulário legado para o canônico.
#[utoipa::path(
    post,
    path = "/api/admin/normalize-permissions",
    tag = "RBAC",
    responses(
        (status = 200, description = "Relatório da normalização", body = NormalizationReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn normalize_permissions(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermUsersManage>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.user_service.normalize_legacy_permissions().await?;
    Ok(Json(report))
}
