// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "charge_status", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum ChargeStatus {
    Pending,   // Em aberto
    Paid,      // Quitada
    Overdue,   // Vencida (ainda em aberto)
    Cancelled, // Cancelada
}

impl ChargeStatus {
    // Vencida continua em aberto: ainda pode ser paga ou cancelada.
    pub fn is_open(self) -> bool {
        matches!(self, ChargeStatus::Pending | ChargeStatus::Overdue)
    }
}

// --- Structs ---

// Conta bancária da rede (BTG) usada para receber as cobranças
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440020")]
    pub id: Uuid,

    #[schema(example = "Centro")]
    pub unit: String,

    #[schema(example = "BTG Pactual")]
    pub bank_name: String,

    #[schema(example = "0050")]
    pub branch: String,

    #[schema(example = "1234567-8")]
    pub account_number: String,

    #[schema(example = "financeiro@autoescolaideal.com.br")]
    pub pix_key: Option<String>,

    #[schema(example = true)]
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

// Cobrança emitida para um aluno
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: Uuid,

    #[schema(example = "Centro")]
    pub unit: String,

    pub account_id: Uuid,

    #[schema(example = "João da Silva")]
    pub customer_name: String,

    #[schema(example = "123.456.789-00")]
    pub customer_document: String,

    #[schema(example = "350.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-10")]
    pub due_date: NaiveDate,

    pub status: ChargeStatus,

    // Linha digitável do boleto, quando houver
    pub digitable_line: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Movimento do extrato de uma conta
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatementMovement {
    pub id: Uuid,

    pub account_id: Uuid,
    pub charge_id: Option<Uuid>,

    #[schema(example = "Recebimento cobrança João da Silva")]
    pub description: String,

    // Positivo = entrada, negativo = saída
    #[schema(example = "350.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-29")]
    pub movement_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vencida_continua_em_aberto_quitada_e_cancelada_nao() {
        assert!(ChargeStatus::Pending.is_open());
        assert!(ChargeStatus::Overdue.is_open());
        assert!(!ChargeStatus::Paid.is_open());
        assert!(!ChargeStatus::Cancelled.is_open());
    }

    #[test]
    fn status_serializa_em_camel_case() {
        assert_eq!(
            serde_json::to_value(ChargeStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
        assert_eq!(
            serde_json::to_value(ChargeStatus::Cancelled).unwrap(),
            serde_json::json!("cancelled")
        );
    }
}
