// src/services/permissions.rs
//
// Ponto central de decisão de acesso: (usuário, capacidade) -> bool.
// Função pura, síncrona e sem efeitos colaterais; qualquer entrada
// indeterminada degrada para "sem acesso" (fail-closed).

use crate::models::{
    auth::User,
    rbac::{MenuEntry, MenuEntryResponse, PermissionInfo, RequiredPermissions},
};

// ---
// Vocabulário canônico (`area.acao`)
// ---
// O vocabulário legado em snake_case português ("gerenciar_usuarios")
// não é autoritativo: é reescrito uma única vez pela normalização
// (ver `canonicalize` abaixo e o endpoint /api/admin/normalize-permissions).

pub const USERS_VIEW: &str = "users.view";
pub const USERS_MANAGE: &str = "users.manage";
pub const MESSAGES_VIEW: &str = "messages.view";
pub const MESSAGES_SEND: &str = "messages.send";
pub const ACCOUNTS_VIEW: &str = "accounts.view";
pub const ACCOUNTS_MANAGE: &str = "accounts.manage";
pub const CHARGES_VIEW: &str = "charges.view";
pub const CHARGES_EDIT: &str = "charges.edit";
pub const EXTRACTS_VIEW: &str = "extracts.view";
pub const UNITS_MANAGE: &str = "units.manage";

// Catálogo completo (para o frontend montar a tela de edição de usuário)
pub const CATALOG: &[PermissionInfo] = &[
    PermissionInfo { slug: USERS_VIEW, description: "Visualizar usuários", area: "USUARIOS" },
    PermissionInfo { slug: USERS_MANAGE, description: "Criar, editar e desativar usuários", area: "USUARIOS" },
    PermissionInfo { slug: MESSAGES_VIEW, description: "Ler mensagens internas", area: "MENSAGENS" },
    PermissionInfo { slug: MESSAGES_SEND, description: "Enviar mensagens internas", area: "MENSAGENS" },
    PermissionInfo { slug: ACCOUNTS_VIEW, description: "Visualizar contas BTG", area: "CONTAS" },
    PermissionInfo { slug: ACCOUNTS_MANAGE, description: "Cadastrar contas BTG", area: "CONTAS" },
    PermissionInfo { slug: CHARGES_VIEW, description: "Visualizar cobranças", area: "COBRANCAS" },
    PermissionInfo { slug: CHARGES_EDIT, description: "Criar e editar cobranças", area: "COBRANCAS" },
    PermissionInfo { slug: EXTRACTS_VIEW, description: "Visualizar e exportar extratos", area: "EXTRATOS" },
    PermissionInfo { slug: UNITS_MANAGE, description: "Cadastrar unidades", area: "UNIDADES" },
];

// ---
// Tabela estática: perfil -> permissões padrão
// ---

const ADMIN_DEFAULTS: &[&str] = &[
    USERS_VIEW, USERS_MANAGE,
    MESSAGES_VIEW, MESSAGES_SEND,
    ACCOUNTS_VIEW, ACCOUNTS_MANAGE,
    CHARGES_VIEW, CHARGES_EDIT,
    EXTRACTS_VIEW,
    UNITS_MANAGE,
];

const MANAGER_DEFAULTS: &[&str] = &[
    USERS_VIEW,
    MESSAGES_VIEW, MESSAGES_SEND,
    ACCOUNTS_VIEW,
    CHARGES_VIEW, CHARGES_EDIT,
    EXTRACTS_VIEW,
];

const OPERATOR_DEFAULTS: &[&str] = &[
    MESSAGES_VIEW, MESSAGES_SEND,
    CHARGES_VIEW,
    EXTRACTS_VIEW,
];

const VIEWER_DEFAULTS: &[&str] = &[MESSAGES_VIEW, CHARGES_VIEW];

/// Permissões padrão de um perfil. Perfil desconhecido (tag livre nos
/// dados antigos) resolve para a lista vazia.
pub fn default_permissions_for(profile: &str) -> &'static [&'static str] {
    match profile {
        "admin" => ADMIN_DEFAULTS,
        "manager" => MANAGER_DEFAULTS,
        "operator" => OPERATOR_DEFAULTS,
        "viewer" => VIEWER_DEFAULTS,
        _ => &[],
    }
}

// ---
// O avaliador em si
// ---

/// Retorna true sse `required` aparece literalmente na lista efetiva.
/// Comparação por igualdade exata de strings: sem curinga, prefixo ou
/// hierarquia. Lista ausente (`None`) = sem acesso; nunca entra em pânico.
pub fn has_permission(effective: Option<&[String]>, required: &str) -> bool {
    match effective {
        Some(list) => list.iter().any(|p| p == required),
        None => false,
    }
}

/// Lista efetiva de um usuário: a lista explícita vence quando não-vazia
/// (mesmo que seja menor que os padrões); senão, os padrões do perfil.
pub fn resolve_effective_permissions(user: &User) -> Vec<String> {
    if !user.permissions.is_empty() {
        return user.permissions.clone();
    }
    default_permissions_for(&user.profile)
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Uma entrada de menu é visível quando não declara guarda (pública) ou
/// quando QUALQUER uma das permissões exigidas está presente (OU lógico).
pub fn can_access_menu_entry(effective: &[String], entry: &MenuEntry) -> bool {
    match entry.required {
        RequiredPermissions::Public => true,
        RequiredPermissions::One(slug) => has_permission(Some(effective), slug),
        RequiredPermissions::AnyOf(slugs) => {
            slugs.iter().any(|slug| has_permission(Some(effective), slug))
        }
    }
}

// ---
// Navegação (config estática da aplicação)
// ---

pub const MENU: &[MenuEntry] = &[
    MenuEntry { label: "Início", route: "/", required: RequiredPermissions::Public },
    MenuEntry { label: "Usuários", route: "/usuarios", required: RequiredPermissions::One(USERS_VIEW) },
    MenuEntry { label: "Mensagens", route: "/mensagens", required: RequiredPermissions::One(MESSAGES_VIEW) },
    MenuEntry { label: "Contas BTG", route: "/contas", required: RequiredPermissions::One(ACCOUNTS_VIEW) },
    MenuEntry { label: "Cobranças", route: "/cobrancas", required: RequiredPermissions::One(CHARGES_VIEW) },
    MenuEntry { label: "Extratos", route: "/extratos", required: RequiredPermissions::One(EXTRACTS_VIEW) },
    // Quem gerencia usuários também precisa enxergar as unidades
    MenuEntry {
        label: "Unidades",
        route: "/unidades",
        required: RequiredPermissions::AnyOf(&[UNITS_MANAGE, USERS_MANAGE]),
    },
];

/// Filtra o MENU estático para o que o usuário pode ver.
pub fn visible_menu(effective: &[String]) -> Vec<MenuEntryResponse> {
    MENU.iter()
        .filter(|entry| can_access_menu_entry(effective, entry))
        .map(MenuEntryResponse::from)
        .collect()
}

// ---
// Normalização do vocabulário legado
// ---

/// Converte um token legado para o slug canônico. Tokens já canônicos
/// ou desconhecidos retornam `None` (ficam como estão).
pub fn canonicalize(token: &str) -> Option<&'static str> {
    match token {
        "ver_usuarios" => Some(USERS_VIEW),
        "gerenciar_usuarios" => Some(USERS_MANAGE),
        "ver_mensagens" => Some(MESSAGES_VIEW),
        "enviar_mensagens" => Some(MESSAGES_SEND),
        "ver_contas" => Some(ACCOUNTS_VIEW),
        "gerenciar_contas" => Some(ACCOUNTS_MANAGE),
        "ver_cobrancas" => Some(CHARGES_VIEW),
        "editar_cobrancas" => Some(CHARGES_EDIT),
        "ver_extratos" => Some(EXTRACTS_VIEW),
        "gerenciar_unidades" => Some(UNITS_MANAGE),
        _ => None,
    }
}

/// Reescreve uma lista no vocabulário canônico, removendo duplicatas e
/// preservando a ordem de primeira ocorrência. Retorna também quantos
/// tokens legados foram reescritos.
pub fn normalize_permissions(permissions: Vec<String>) -> (Vec<String>, usize) {
    let mut rewritten = 0usize;
    let mut result: Vec<String> = Vec::with_capacity(permissions.len());

    for token in permissions {
        let canonical = match canonicalize(&token) {
            Some(slug) => {
                rewritten += 1;
                slug.to_string()
            }
            None => token,
        };
        if !result.contains(&canonical) {
            result.push(canonical);
        }
    }

    (result, rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn strings(slice: &[&str]) -> Vec<String> {
        slice.iter().map(|s| s.to_string()).collect()
    }

    fn user_with(profile: &str, permissions: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            email: "teste@autoescolaideal.com.br".to_string(),
            display_name: "Usuária de Teste".to_string(),
            password_hash: "$2b$12$xxxxxxxxxxxxxxxxxxxxxx".to_string(),
            profile: profile.to_string(),
            permissions: strings(permissions),
            units: vec![],
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // --- has_permission ---

    #[test]
    fn concede_quando_a_permissao_esta_na_lista() {
        let perms = strings(&["charges.view", "messages.send"]);
        assert!(has_permission(Some(&perms), "charges.view"));
        assert!(has_permission(Some(&perms), "messages.send"));
    }

    #[test]
    fn nega_quando_a_permissao_nao_esta_na_lista() {
        let perms = strings(&["charges.view"]);
        assert!(!has_permission(Some(&perms), "charges.edit"));
        assert!(!has_permission(Some(&[]), "charges.view"));
    }

    #[test]
    fn lista_ausente_nega_sem_entrar_em_panico() {
        assert!(!has_permission(None, "users.view"));
        assert!(!has_permission(None, ""));
    }

    #[test]
    fn comparacao_e_exata_sem_prefixo_ou_curinga() {
        let perms = strings(&["users.view"]);
        assert!(!has_permission(Some(&perms), "users"));
        assert!(!has_permission(Some(&perms), "users.*"));
        assert!(!has_permission(Some(&perms), "users.view.extra"));
        assert!(!has_permission(Some(&perms), "Users.View"));
    }

    // --- resolve_effective_permissions ---

    #[test]
    fn lista_vazia_cai_nos_padroes_do_perfil() {
        let user = user_with("admin", &[]);
        let effective = resolve_effective_permissions(&user);
        assert!(!effective.is_empty());
        assert_eq!(effective, strings(ADMIN_DEFAULTS));
    }

    #[test]
    fn lista_explicita_vence_mesmo_sendo_menor_que_os_padroes() {
        let user = user_with("admin", &["x.y"]);
        assert_eq!(resolve_effective_permissions(&user), strings(&["x.y"]));
    }

    #[test]
    fn perfil_desconhecido_resolve_para_lista_vazia() {
        let user = user_with("instrutor_chefe", &[]);
        assert!(resolve_effective_permissions(&user).is_empty());
    }

    #[test]
    fn padroes_do_manager_sao_subconjunto_do_admin() {
        for slug in MANAGER_DEFAULTS {
            assert!(ADMIN_DEFAULTS.contains(slug), "admin deveria conter {}", slug);
        }
        for slug in OPERATOR_DEFAULTS {
            assert!(MANAGER_DEFAULTS.contains(slug), "manager deveria conter {}", slug);
        }
    }

    // --- can_access_menu_entry ---

    #[test]
    fn entrada_publica_e_sempre_visivel() {
        let entry = MenuEntry {
            label: "Início",
            route: "/",
            required: RequiredPermissions::Public,
        };
        assert!(can_access_menu_entry(&[], &entry));
        assert!(can_access_menu_entry(&strings(&["qualquer.coisa"]), &entry));
    }

    #[test]
    fn entrada_guardada_exige_a_permissao() {
        let entry = MenuEntry {
            label: "Cobranças",
            route: "/cobrancas",
            required: RequiredPermissions::One("a.b"),
        };
        assert!(!can_access_menu_entry(&[], &entry));
        assert!(can_access_menu_entry(&strings(&["a.b"]), &entry));
    }

    #[test]
    fn qualquer_uma_da_lista_basta() {
        let entry = MenuEntry {
            label: "Unidades",
            route: "/unidades",
            required: RequiredPermissions::AnyOf(&["a.b", "c.d"]),
        };
        assert!(can_access_menu_entry(&strings(&["a.b"]), &entry));
        assert!(can_access_menu_entry(&strings(&["c.d"]), &entry));
        assert!(!can_access_menu_entry(&strings(&["e.f"]), &entry));
    }

    #[test]
    fn menu_do_viewer_mostra_so_o_publico_e_o_permitido() {
        let user = user_with("viewer", &[]);
        let effective = resolve_effective_permissions(&user);
        let rotas: Vec<String> = visible_menu(&effective).into_iter().map(|e| e.route).collect();
        assert_eq!(rotas, vec!["/", "/mensagens", "/cobrancas"]);
    }

    #[test]
    fn menu_do_admin_mostra_tudo() {
        let user = user_with("admin", &[]);
        let effective = resolve_effective_permissions(&user);
        assert_eq!(visible_menu(&effective).len(), MENU.len());
    }

    // --- normalização ---

    #[test]
    fn todos_os_tokens_legados_tem_slug_canonico() {
        let legados = [
            "ver_usuarios", "gerenciar_usuarios",
            "ver_mensagens", "enviar_mensagens",
            "ver_contas", "gerenciar_contas",
            "ver_cobrancas", "editar_cobrancas",
            "ver_extratos", "gerenciar_unidades",
        ];
        for token in legados {
            let slug = canonicalize(token).expect(token);
            assert!(CATALOG.iter().any(|p| p.slug == slug));
        }
    }

    #[test]
    fn slug_canonico_nao_e_reescrito() {
        assert_eq!(canonicalize("users.view"), None);
        assert_eq!(canonicalize("coisa_desconhecida"), None);
    }

    #[test]
    fn normalizacao_reescreve_deduplica_e_preserva_ordem() {
        let entrada = strings(&[
            "enviar_mensagens",
            "messages.send", // duplicata após reescrita
            "charges.view",
            "gerenciar_usuarios",
        ]);
        let (saida, reescritos) = normalize_permissions(entrada);
        assert_eq!(saida, strings(&["messages.send", "charges.view", "users.manage"]));
        assert_eq!(reescritos, 2);
    }

    #[test]
    fn normalizacao_e_idempotente() {
        let entrada = strings(&["ver_extratos", "accounts.view", "token_livre"]);
        let (primeira, _) = normalize_permissions(entrada);
        let (segunda, reescritos) = normalize_permissions(primeira.clone());
        assert_eq!(primeira, segunda);
        assert_eq!(reescritos, 0);
    }
}
