// src/handlers/messages.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermMessagesSend, PermMessagesView, RequirePermission},
    },
    models::message::Message,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub recipient_id: Uuid,

    #[schema(example = "Centro")]
    pub unit: Option<String>,

    #[validate(length(min = 1, message = "O assunto é obrigatório."))]
    #[schema(example = "Repasse BTG da semana")]
    pub subject: String,

    #[validate(length(min = 1, message = "O corpo é obrigatório."))]
    pub body: String,
}

// POST /api/messages
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Mensagem enviada", body = Message)
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _perm: RequirePermission<PermMessagesSend>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Destinatário precisa existir; mensagem para usuário removido não faz sentido.
    app_state
        .user_repo
        .find_by_id(payload.recipient_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let message = app_state
        .message_repo
        .create_message(
            user.0.id,
            payload.recipient_id,
            payload.unit.as_deref(),
            &payload.subject,
            &payload.body,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/messages — caixa de entrada do usuário logado.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    responses(
        (status = 200, description = "Caixa de entrada", body = [Message])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_inbox(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _perm: RequirePermission<PermMessagesView>,
) -> Result<impl IntoResponse, AppError> {
    let messages = app_state.message_repo.list_inbox(user.0.id).await?;
    Ok(Json(messages))
}

// POST /api/messages/{id}/read
#[utoipa::path(
    post,
    path = "/api/messages/{id}/read",
    tag = "Messages",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem marcada como lida", body = Message),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _perm: RequirePermission<PermMessagesView>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let message = app_state.message_repo.mark_read(id, user.0.id).await?;
    Ok(Json(message))
}
