// src/models/usuario.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::somente_digitos;

// Mapeia o CREATE TYPE papel_usuario do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "papel_usuario", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PapelTipo {
    Vigia,
    Administrador,
}

impl fmt::Display for PapelTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PapelTipo::Vigia => f.write_str("VIGIA"),
            PapelTipo::Administrador => f.write_str("ADMINISTRADOR"),
        }
    }
}

// Identidade base: todo vigia e todo administrador é um usuário
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[schema(example = "(11) 98888-7777")]
    pub telefone: Option<String>,
    #[schema(example = "joao@vigilancia.com")]
    pub email: String,
    #[schema(example = "joao.silva")]
    pub login: String,

    #[serde(skip_serializing, default)] // Nunca sai na resposta
    #[schema(ignore)]
    pub senha_hash: String,

    pub ativo: bool,
    pub papel: Option<PapelTipo>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuarioPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João da Silva")]
    pub nome: String,

    #[validate(length(equal = 11, message = "invalid_cpf"), custom(function = "somente_digitos"))]
    #[schema(example = "12345678901")]
    pub cpf: String,

    pub telefone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "joao@vigilancia.com")]
    pub email: String,

    #[validate(length(min = 3, message = "O login deve ter no mínimo 3 caracteres"))]
    #[schema(example = "joao.silva")]
    pub login: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    #[schema(example = "s3nh4-f0rte")]
    pub senha: String,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

fn ativo_padrao() -> bool {
    true
}

// PUT parcial: campos ausentes mantêm o valor gravado
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuarioPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,

    #[validate(length(equal = 11, message = "invalid_cpf"), custom(function = "somente_digitos"))]
    pub cpf: Option<String>,

    pub telefone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(min = 3, message = "O login deve ter no mínimo 3 caracteres"))]
    pub login: Option<String>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres"))]
    pub senha: Option<String>,

    pub ativo: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> CreateUsuarioPayload {
        serde_json::from_value(json!({
            "nome": "João da Silva",
            "cpf": "12345678901",
            "email": "joao@vigilancia.com",
            "login": "joao.silva",
            "senha": "s3nh4-f0rte"
        }))
        .unwrap()
    }

    #[test]
    fn valid_payload_defaults_to_active() {
        let p = payload();
        assert!(p.validate().is_ok());
        assert!(p.ativo);
    }

    #[test]
    fn rejects_formatted_cpf_and_short_password() {
        let mut p = payload();
        p.cpf = "123.456.789".to_string();
        p.senha = "123".to_string();
        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("cpf"));
        assert!(fields.contains_key("senha"));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let usuario = Usuario {
            id: Uuid::new_v4(),
            nome: "Ana".into(),
            cpf: "12345678901".into(),
            telefone: None,
            email: "ana@x.com".into(),
            login: "ana".into(),
            senha_hash: "$2b$12$segredo".into(),
            ativo: true,
            papel: Some(PapelTipo::Vigia),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        };
        let value = serde_json::to_value(&usuario).unwrap();
        assert!(value.get("senhaHash").is_none());
        assert_eq!(value["papel"], "VIGIA");
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateUsuarioPayload::default().validate().is_ok());
    }
}
