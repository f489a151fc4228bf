// src/models/unit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Unidade (filial) da rede. Não tem comportamento próprio:
// serve apenas como chave de filtro para usuários, contas e cobranças.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnit {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440030")]
    pub id: Uuid,

    #[schema(example = "Zona Norte")]
    pub name: String,

    #[schema(example = "Fortaleza")]
    pub city: Option<String>,

    pub created_at: DateTime<Utc>,
}
