// src/models/message.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mensagem interna entre usuários do back-office
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440010")]
    pub id: Uuid,

    pub sender_id: Uuid,
    pub recipient_id: Uuid,

    // Unidade relacionada, quando a mensagem é sobre uma filial
    #[schema(example = "Centro")]
    pub unit: Option<String>,

    #[schema(example = "Repasse BTG da semana")]
    pub subject: String,

    pub body: String,

    #[schema(example = false)]
    pub read: bool,

    pub created_at: DateTime<Utc>,
}
