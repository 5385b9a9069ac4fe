// src/models/papel.rs
//
// Subtipos de Usuario. Um usuário tem no máximo um papel: vigia OU administrador.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::usuario::PapelTipo;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vigia {
    pub usuario_id: Uuid,
    #[schema(example = true)]
    pub disponivel: bool,
    pub data_criacao: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Administrador {
    pub usuario_id: Uuid,
    #[schema(example = 3)]
    pub nivel_acesso: i32,
}

/// O papel do usuário como variante: cada caso carrega os próprios atributos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "tipo", content = "dados", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PapelUsuario {
    Vigia(Vigia),
    Administrador(Administrador),
}

impl PapelUsuario {
    pub fn tipo(&self) -> PapelTipo {
        match self {
            PapelUsuario::Vigia(_) => PapelTipo::Vigia,
            PapelUsuario::Administrador(_) => PapelTipo::Administrador,
        }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVigiaPayload {
    pub usuario_id: Uuid,
    #[serde(default = "disponivel_padrao")]
    pub disponivel: bool,
}

fn disponivel_padrao() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVigiaPayload {
    pub disponivel: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdministradorPayload {
    pub usuario_id: Uuid,
    #[validate(range(min = 1, max = 10, message = "O nível de acesso vai de 1 a 10"))]
    #[serde(default = "nivel_padrao")]
    #[schema(example = 1)]
    pub nivel_acesso: i32,
}

fn nivel_padrao() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdministradorPayload {
    #[validate(range(min = 1, max = 10, message = "O nível de acesso vai de 1 a 10"))]
    pub nivel_acesso: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_variant_is_tagged_in_json() {
        let id = Uuid::new_v4();
        let papel = PapelUsuario::Administrador(Administrador { usuario_id: id, nivel_acesso: 5 });
        assert_eq!(papel.tipo(), PapelTipo::Administrador);

        let value = serde_json::to_value(&papel).unwrap();
        assert_eq!(value["tipo"], "ADMINISTRADOR");
        assert_eq!(value["dados"]["nivelAcesso"], 5);
        assert_eq!(value["dados"]["usuarioId"], json!(id));
    }

    #[test]
    fn access_level_must_be_in_range() {
        let payload: CreateAdministradorPayload =
            serde_json::from_value(json!({ "usuarioId": Uuid::new_v4(), "nivelAcesso": 11 })).unwrap();
        assert!(payload.validate().is_err());

        let padrao: CreateAdministradorPayload =
            serde_json::from_value(json!({ "usuarioId": Uuid::new_v4() })).unwrap();
        assert_eq!(padrao.nivel_acesso, 1);
        assert!(padrao.validate().is_ok());
    }
}
