// src/db/message_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::message::Message};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        unit: Option<&str>,
        subject: &str,
        body: &str,
    ) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, unit, subject, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(unit)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    // Caixa de entrada do destinatário, não lidas primeiro.
    pub async fn list_inbox(&self, recipient_id: Uuid) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE recipient_id = $1
            ORDER BY read ASC, created_at DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    // Só o destinatário pode marcar como lida.
    pub async fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages SET read = TRUE
            WHERE id = $1 AND recipient_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Mensagem".to_string()))?;

        Ok(message)
    }
}
