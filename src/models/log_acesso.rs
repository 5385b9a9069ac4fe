// src/models/log_acesso.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::endereco_ip;

// Registro de auditoria de cada tentativa de acesso
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogAcesso {
    pub id: Uuid,
    pub data: NaiveDate,
    #[schema(value_type = String, example = "08:01:12")]
    pub hora: NaiveTime,
    pub sucesso: bool,
    #[schema(example = "189.6.10.22")]
    pub ip: String,
    pub usuario_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogAcessoPayload {
    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "08:01:12")]
    pub hora: Option<NaiveTime>,

    pub sucesso: bool,

    #[validate(custom(function = "endereco_ip"))]
    #[schema(example = "189.6.10.22")]
    pub ip: String,

    pub usuario_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogAcessoPayload {
    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub hora: Option<NaiveTime>,
    pub sucesso: Option<bool>,

    #[validate(custom(function = "endereco_ip"))]
    pub ip: Option<String>,

    pub usuario_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_ip_is_rejected() {
        let payload: CreateLogAcessoPayload = serde_json::from_value(json!({
            "sucesso": false,
            "ip": "999.1.1.1",
            "usuarioId": Uuid::new_v4()
        }))
        .unwrap();
        assert!(payload.validate().unwrap_err().field_errors().contains_key("ip"));
    }
}
