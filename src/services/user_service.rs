// src/services/user_service.rs

use bcrypt::hash;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{auth::User, rbac::NormalizationReport},
    services::permissions,
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    // Provisionamento administrativo. Tokens legados que chegarem no
    // payload já entram reescritos no vocabulário canônico.
    pub async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
        profile: &str,
        permissions_list: Vec<String>,
        units: Vec<String>,
    ) -> Result<User, AppError> {
        let password_clone = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let (normalized, _) = permissions::normalize_permissions(permissions_list);

        self.repo
            .create_user(email, display_name, &password_hash, profile, &normalized, &units)
            .await
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        display_name: &str,
        profile: &str,
        permissions_list: Vec<String>,
        units: Vec<String>,
        active: bool,
    ) -> Result<User, AppError> {
        let (normalized, _) = permissions::normalize_permissions(permissions_list);

        self.repo
            .update_user(id, display_name, profile, &normalized, &units, active)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repo.list_all().await
    }

    pub async fn deactivate_user(&self, id: Uuid) -> Result<User, AppError> {
        self.repo.deactivate(id).await
    }

    /// Migração única e explícita: reescreve as listas de permissões de
    /// todos os usuários no vocabulário canônico. Substitui a checagem
    /// dupla em tempo de leitura que fazia o menu "sumir" nos dados
    /// legados. Idempotente: rodar de novo não muda nada.
    pub async fn normalize_legacy_permissions(&self) -> Result<NormalizationReport, AppError> {
        let users = self.repo.list_all().await?;

        let mut report = NormalizationReport {
            users_scanned: 0,
            users_updated: 0,
            tokens_rewritten: 0,
        };

        for user in users {
            report.users_scanned += 1;

            let (normalized, rewritten) =
                permissions::normalize_permissions(user.permissions.clone());

            if normalized != user.permissions {
                // Escrita condicionada à lista lida: se um admin editou o
                // usuário no meio da varredura, esta rodada pula e a
                // próxima (idempotente) o apanha.
                let applied = self
                    .repo
                    .set_permissions_if_unchanged(user.id, &normalized, &user.permissions)
                    .await?;

                if applied {
                    report.users_updated += 1;
                    report.tokens_rewritten += rewritten as u64;
                }
            }
        }

        tracing::info!(
            "🔧 Normalização de permissões: {} usuários lidos, {} atualizados, {} tokens reescritos",
            report.users_scanned,
            report.users_updated,
            report.tokens_rewritten
        );

        Ok(report)
    }

    // Garante que exista ao menos um admin ativo na subida do processo,
    // quando ADMIN_EMAIL/ADMIN_PASSWORD estão configurados.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let admin = self
            .create_user(email, "Administrador", password, "admin", vec![], vec![])
            .await?;

        tracing::info!("👤 Usuário admin inicial criado: {}", admin.email);
        Ok(())
    }
}
