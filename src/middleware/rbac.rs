// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::User,
    services::permissions,
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião)
///
/// Decide com o avaliador puro sobre o usuário que o `auth_guard` já
/// buscou: nenhuma ida extra ao banco, nenhum estado compartilhado.
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário injetado pelo auth_guard
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        // B. Resolve a lista efetiva (explícita ou padrões do perfil)
        let effective = permissions::resolve_effective_permissions(user);

        // C. Decide (fail-closed)
        let required_perm = T::slug();
        if !permissions::has_permission(Some(&effective), required_perm) {
            return Err(AppError::Forbidden(required_perm.to_string()));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermUsersView;
impl PermissionDef for PermUsersView {
    fn slug() -> &'static str { permissions::USERS_VIEW }
}

pub struct PermUsersManage;
impl PermissionDef for PermUsersManage {
    fn slug() -> &'static str { permissions::USERS_MANAGE }
}

pub struct PermMessagesView;
impl PermissionDef for PermMessagesView {
    fn slug() -> &'static str { permissions::MESSAGES_VIEW }
}

pub struct PermMessagesSend;
impl PermissionDef for PermMessagesSend {
    fn slug() -> &'static str { permissions::MESSAGES_SEND }
}

pub struct PermAccountsView;
impl PermissionDef for PermAccountsView {
    fn slug() -> &'static str { permissions::ACCOUNTS_VIEW }
}

pub struct PermAccountsManage;
impl PermissionDef for PermAccountsManage {
    fn slug() -> &'static str { permissions::ACCOUNTS_MANAGE }
}

pub struct PermChargesView;
impl PermissionDef for PermChargesView {
    fn slug() -> &'static str { permissions::CHARGES_VIEW }
}

pub struct PermChargesEdit;
impl PermissionDef for PermChargesEdit {
    fn slug() -> &'static str { permissions::CHARGES_EDIT }
}

pub struct PermExtractsView;
impl PermissionDef for PermExtractsView {
    fn slug() -> &'static str { permissions::EXTRACTS_VIEW }
}

pub struct PermUnitsManage;
impl PermissionDef for PermUnitsManage {
    fn slug() -> &'static str { permissions::UNITS_MANAGE }
}
