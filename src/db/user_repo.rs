// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

// Responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY display_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // Cria um novo usuário, com tratamento específico para e-mail duplicado.
    pub async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
        profile: &str,
        permissions: &[String],
        units: &[String],
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, display_name, password_hash, profile, permissions, units)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .bind(profile)
        .bind(permissions)
        .bind(units)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    // Edição administrativa: nome, perfil, permissões, unidades e ativo.
    pub async fn update_user(
        &self,
        id: Uuid,
        display_name: &str,
        profile: &str,
        permissions: &[String],
        units: &[String],
        active: bool,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET display_name = $2,
                profile = $3,
                permissions = $4,
                units = $5,
                active = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(display_name)
        .bind(profile)
        .bind(permissions)
        .bind(units)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    // Usado pela normalização única do vocabulário de permissões.
    // Só escreve se a lista ainda for a que a varredura leu; uma edição
    // administrativa concorrente não é sobrescrita com dado velho.
    // Retorna se a escrita aconteceu.
    pub async fn set_permissions_if_unchanged(
        &self,
        id: Uuid,
        new_permissions: &[String],
        old_permissions: &[String],
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET permissions = $2, updated_at = NOW()
            WHERE id = $1 AND permissions = $3
            "#,
        )
        .bind(id)
        .bind(new_permissions)
        .bind(old_permissions)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // Usuários nunca são removidos no fluxo normal: apenas desativados.
    pub async fn deactivate(&self, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }
}
