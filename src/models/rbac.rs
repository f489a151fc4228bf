// src/models/rbac.rs

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// Permissão exigida por uma entrada de menu.
// `Public` = entrada sem guarda; `AnyOf` = basta ter UMA das listadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredPermissions {
    Public,
    One(&'static str),
    AnyOf(&'static [&'static str]),
}

// Entrada da navegação. A lista completa é estática (config da aplicação).
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: &'static str,
    pub required: RequiredPermissions,
}

// O que o frontend recebe: apenas as entradas visíveis, sem as guardas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntryResponse {
    #[schema(example = "Cobranças")]
    pub label: String,

    #[schema(example = "/cobrancas")]
    pub route: String,
}

impl From<&MenuEntry> for MenuEntryResponse {
    fn from(entry: &MenuEntry) -> Self {
        Self {
            label: entry.label.to_string(),
            route: entry.route.to_string(),
        }
    }
}

// Item do catálogo de permissões (para o frontend montar a tela de edição)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionInfo {
    #[schema(example = "charges.edit")]
    pub slug: &'static str,

    #[schema(example = "Criar e editar cobranças")]
    pub description: &'static str,

    #[schema(example = "COBRANCAS")]
    pub area: &'static str,
}

// Resultado da normalização única do vocabulário legado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationReport {
    #[schema(example = 42)]
    pub users_scanned: u64,

    #[schema(example = 7)]
    pub users_updated: u64,

    #[schema(example = 13)]
    pub tokens_rewritten: u64,
}

/// Desserializa um campo `permissions` tolerando dados malformados do
/// frontend legado: qualquer coisa que não seja uma lista de strings
/// vira `None` (que o avaliador trata como "sem acesso").
pub fn lenient_permissions<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    serde_json::Value::String(s) => list.push(s),
                    // Lista com lixo no meio = lista indeterminada
                    _ => return Ok(None),
                }
            }
            Ok(Some(list))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "lenient_permissions")]
        permissions: Option<Vec<String>>,
    }

    fn parse(raw: &str) -> Option<Vec<String>> {
        serde_json::from_str::<Wrapper>(raw).unwrap().permissions
    }

    #[test]
    fn lista_de_strings_e_aceita() {
        assert_eq!(
            parse(r#"{"permissions": ["users.view", "charges.edit"]}"#),
            Some(vec!["users.view".to_string(), "charges.edit".to_string()])
        );
    }

    #[test]
    fn lista_vazia_e_aceita() {
        assert_eq!(parse(r#"{"permissions": []}"#), Some(vec![]));
    }

    #[test]
    fn valores_malformados_degradam_para_none() {
        assert_eq!(parse(r#"{"permissions": "not-an-array"}"#), None);
        assert_eq!(parse(r#"{"permissions": 42}"#), None);
        assert_eq!(parse(r#"{"permissions": {"a": true}}"#), None);
        assert_eq!(parse(r#"{"permissions": null}"#), None);
        assert_eq!(parse(r#"{"permissions": ["ok", 1]}"#), None);
    }

    #[test]
    fn campo_ausente_degrada_para_none() {
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn menu_entry_response_descarta_a_guarda() {
        let entry = MenuEntry {
            label: "Extratos",
            route: "/extratos",
            required: RequiredPermissions::One("extracts.view"),
        };
        let response = MenuEntryResponse::from(&entry);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"label": "Extratos", "route": "/extratos"}));
    }
}
