//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::env;
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante o admin inicial quando configurado via ambiente
    if let (Ok(admin_email), Ok(admin_password)) =
        (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD"))
    {
        app_state
            .user_service
            .ensure_admin(&admin_email, &admin_password)
            .await
            .expect("Falha ao garantir o usuário admin inicial.");
    }

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::deactivate_user),
        );

    let unit_routes = Router::new().route(
        "/",
        post(handlers::units::create_unit).get(handlers::units::list_units),
    );

    let message_routes = Router::new()
        .route(
            "/",
            post(handlers::messages::send_message).get(handlers::messages::list_inbox),
        )
        .route("/{id}/read", post(handlers::messages::mark_read));

    let account_routes = Router::new().route(
        "/",
        post(handlers::finance::create_account).get(handlers::finance::list_accounts),
    );

    let charge_routes = Router::new()
        .route(
            "/",
            post(handlers::finance::create_charge).get(handlers::finance::list_charges),
        )
        .route(
            "/{id}",
            get(handlers::finance::get_charge).put(handlers::finance::update_charge),
        )
        .route("/refresh-overdue", post(handlers::finance::refresh_overdue))
        .route("/{id}/settle", post(handlers::finance::settle_charge))
        .route("/{id}/cancel", post(handlers::finance::cancel_charge))
        .route("/{id}/qrcode.png", get(handlers::documents::charge_qrcode));

    let statement_routes = Router::new()
        .route("/", get(handlers::finance::list_statement))
        .route("/pdf", get(handlers::documents::statement_pdf));

    let admin_routes = Router::new().route(
        "/normalize-permissions",
        post(handlers::rbac::normalize_permissions),
    );

    // Tudo que exige usuário logado fica atrás do auth_guard
    let protected = Router::new()
        .route("/api/menu", get(handlers::rbac::get_menu))
        .nest("/api/users", user_routes)
        .nest("/api/units", unit_routes)
        .nest("/api/messages", message_routes)
        .nest("/api/accounts", account_routes)
        .nest("/api/charges", charge_routes)
        .nest("/api/statements", statement_routes)
        .nest("/api/admin", admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/permissions", get(handlers::rbac::list_permissions))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
