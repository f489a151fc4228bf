// src/services/finance_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{Charge, ChargeStatus},
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Baixa de cobrança: marca como paga e lança o movimento de entrada
    /// no extrato da conta, na mesma transação.
    pub async fn settle_charge(&self, charge_id: Uuid) -> Result<Charge, AppError> {
        let mut tx = self.pool.begin().await?;

        // Só sai de cobrança em aberto; já quitada não é paga duas vezes.
        let charge = self
            .repo
            .transition_charge(&mut *tx, charge_id, ChargeStatus::Paid)
            .await?
            .ok_or(AppError::ChargeNotOpen)?;

        let description = format!("Recebimento cobrança {}", charge.customer_name);
        self.repo
            .insert_movement(
                &mut *tx,
                charge.account_id,
                Some(charge.id),
                &description,
                charge.amount,
                Utc::now().date_naive(),
            )
            .await?;

        tx.commit().await?;

        Ok(charge)
    }

    /// Varredura explícita: cobranças pendentes com vencimento passado
    /// viram 'overdue'. Vencida continua em aberto para baixa e cancelamento.
    pub async fn refresh_overdue(&self) -> Result<u64, AppError> {
        let updated = self.repo.mark_overdue(Utc::now().date_naive()).await?;

        if updated > 0 {
            tracing::info!("⏰ {} cobrança(s) marcada(s) como vencida(s)", updated);
        }

        Ok(updated)
    }

    /// Cancelamento segue a mesma regra de transição: só cobrança em aberto.
    pub async fn cancel_charge(&self, charge_id: Uuid) -> Result<Charge, AppError> {
        let mut tx = self.pool.begin().await?;

        let charge = self
            .repo
            .transition_charge(&mut *tx, charge_id, ChargeStatus::Cancelled)
            .await?
            .ok_or(AppError::ChargeNotOpen)?;

        tx.commit().await?;

        Ok(charge)
    }
}
