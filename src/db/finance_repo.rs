// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{BankAccount, Charge, ChargeStatus, StatementMovement},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONTAS BANCÁRIAS (BTG)
    // =========================================================================

    pub async fn create_account(
        &self,
        unit: &str,
        bank_name: &str,
        branch: &str,
        account_number: &str,
        pix_key: Option<&str>,
    ) -> Result<BankAccount, AppError> {
        let account = sqlx::query_as::<_, BankAccount>(
            r#"
            INSERT INTO bank_accounts (unit, bank_name, branch, account_number, pix_key)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(unit)
        .bind(bank_name)
        .bind(branch)
        .bind(account_number)
        .bind(pix_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe uma conta com essa agência e número.".to_string(),
                    );
                }
            }
            e.into()
        })?;

        Ok(account)
    }

    pub async fn list_accounts(&self, unit: Option<&str>) -> Result<Vec<BankAccount>, AppError> {
        let accounts = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT * FROM bank_accounts
            WHERE ($1::text IS NULL OR unit = $1)
            ORDER BY unit, account_number
            "#,
        )
        .bind(unit)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn find_account(&self, id: Uuid) -> Result<Option<BankAccount>, AppError> {
        let account = sqlx::query_as::<_, BankAccount>(
            "SELECT * FROM bank_accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // =========================================================================
    //  COBRANÇAS
    // =========================================================================

    pub async fn create_charge(
        &self,
        unit: &str,
        account_id: Uuid,
        customer_name: &str,
        customer_document: &str,
        amount: Decimal,
        due_date: NaiveDate,
        digitable_line: Option<&str>,
    ) -> Result<Charge, AppError> {
        let charge = sqlx::query_as::<_, Charge>(
            r#"
            INSERT INTO charges
                (unit, account_id, customer_name, customer_document, amount, due_date, digitable_line)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(unit)
        .bind(account_id)
        .bind(customer_name)
        .bind(customer_document)
        .bind(amount)
        .bind(due_date)
        .bind(digitable_line)
        .fetch_one(&self.pool)
        .await?;

        Ok(charge)
    }

    pub async fn list_charges(
        &self,
        unit: Option<&str>,
        status: Option<ChargeStatus>,
    ) -> Result<Vec<Charge>, AppError> {
        let charges = sqlx::query_as::<_, Charge>(
            r#"
            SELECT * FROM charges
            WHERE ($1::text IS NULL OR unit = $1)
              AND ($2::charge_status IS NULL OR status = $2)
            ORDER BY due_date ASC, created_at ASC
            "#,
        )
        .bind(unit)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(charges)
    }

    pub async fn find_charge(&self, id: Uuid) -> Result<Option<Charge>, AppError> {
        let charge = sqlx::query_as::<_, Charge>("SELECT * FROM charges WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(charge)
    }

    // Cobrança quitada ou cancelada não pode mais ser alterada: o valor já
    // foi lançado no extrato pela baixa e os dois ficariam dessincronizados.
    pub async fn update_charge(
        &self,
        id: Uuid,
        amount: Decimal,
        due_date: NaiveDate,
        digitable_line: Option<&str>,
    ) -> Result<Charge, AppError> {
        let charge = sqlx::query_as::<_, Charge>(
            r#"
            UPDATE charges
            SET amount = $2, due_date = $3, digitable_line = $4, updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'overdue')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(due_date)
        .bind(digitable_line)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ChargeNotOpen)?;

        Ok(charge)
    }

    // Transição de status só a partir de cobrança em aberto (pendente ou
    // vencida); quem chama decide o que fazer quando não há linha afetada.
    pub async fn transition_charge<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        to: ChargeStatus,
    ) -> Result<Option<Charge>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let charge = sqlx::query_as::<_, Charge>(
            r#"
            UPDATE charges
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'overdue')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(to)
        .fetch_optional(executor)
        .await?;

        Ok(charge)
    }

    // Marca como vencidas as cobranças pendentes com data de vencimento
    // já passada. Retorna quantas foram atualizadas.
    pub async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE charges
            SET status = 'overdue', updated_at = NOW()
            WHERE status = 'pending' AND due_date < $1
            "#,
        )
        .bind(today)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  EXTRATO
    // =========================================================================

    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        account_id: Uuid,
        charge_id: Option<Uuid>,
        description: &str,
        amount: Decimal,
        movement_date: NaiveDate,
    ) -> Result<StatementMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StatementMovement>(
            r#"
            INSERT INTO statement_movements
                (account_id, charge_id, description, amount, movement_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(charge_id)
        .bind(description)
        .bind(amount)
        .bind(movement_date)
        .fetch_one(executor)
        .await?;

        Ok(movement)
    }

    pub async fn list_movements(
        &self,
        account_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<StatementMovement>, AppError> {
        let movements = sqlx::query_as::<_, StatementMovement>(
            r#"
            SELECT * FROM statement_movements
            WHERE account_id = $1
              AND movement_date BETWEEN $2 AND $3
            ORDER BY movement_date ASC, created_at ASC
            "#,
        )
        .bind(account_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }
}
