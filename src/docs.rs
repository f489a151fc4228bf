// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::deactivate_user,

        // --- RBAC ---
        handlers::rbac::get_menu,
        handlers::rbac::list_permissions,
        handlers::rbac::normalize_permissions,

        // --- Units ---
        handlers::units::create_unit,
        handlers::units::list_units,

        // --- Messages ---
        handlers::messages::send_message,
        handlers::messages::list_inbox,
        handlers::messages::mark_read,

        // --- Finance ---
        handlers::finance::create_account,
        handlers::finance::list_accounts,
        handlers::finance::create_charge,
        handlers::finance::list_charges,
        handlers::finance::get_charge,
        handlers::finance::update_charge,
        handlers::finance::refresh_overdue,
        handlers::finance::settle_charge,
        handlers::finance::cancel_charge,
        handlers::finance::list_statement,
        handlers::documents::statement_pdf,
        handlers::documents::charge_qrcode,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- RBAC ---
            models::rbac::MenuEntryResponse,
            models::rbac::PermissionInfo,
            models::rbac::NormalizationReport,

            // --- Units ---
            models::unit::BusinessUnit,
            handlers::units::CreateUnitPayload,

            // --- Messages ---
            models::message::Message,
            handlers::messages::SendMessagePayload,

            // --- Finance ---
            models::finance::ChargeStatus,
            models::finance::BankAccount,
            models::finance::Charge,
            models::finance::StatementMovement,
            handlers::finance::CreateAccountPayload,
            handlers::finance::CreateChargePayload,
            handlers::finance::UpdateChargePayload,
            handlers::finance::OverdueReport,

            // --- Payloads de usuários ---
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Gestão de Usuários"),
        (name = "RBAC", description = "Permissões, Menu e Normalização"),
        (name = "Units", description = "Unidades (Filiais)"),
        (name = "Messages", description = "Mensagens Internas"),
        (name = "Finance", description = "Contas BTG, Cobranças e Extratos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
