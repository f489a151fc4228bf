// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{FinanceRepository, MessageRepository, UnitRepository, UserRepository},
    services::{
        auth::AuthService, document_service::DocumentService, finance_service::FinanceService,
        user_service::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
// Toda a configuração entra por aqui, uma única vez, via ambiente —
// nenhuma credencial fica no código.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub finance_service: FinanceService,
    pub document_service: DocumentService,
    pub message_repo: MessageRepository,
    pub finance_repo: FinanceRepository,
    pub unit_repo: UnitRepository,
    pub user_repo: UserRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let message_repo = MessageRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let unit_repo = UnitRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let user_service = UserService::new(user_repo.clone());
        let finance_service = FinanceService::new(finance_repo.clone(), db_pool.clone());
        let document_service = DocumentService::new(finance_repo.clone());

        Ok(Self {
            db_pool,
            auth_service,
            user_service,
            finance_service,
            document_service,
            message_repo,
            finance_repo,
            unit_repo,
            user_repo,
        })
    }
}
