// src/models/empresa.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::somente_digitos;

// Organização cliente que contrata as rondas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    pub id: Uuid,
    #[schema(example = "Acme Condomínios")]
    pub nome: String,
    #[schema(example = "12345678000199")]
    pub cnpj: String,
    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub endereco: Option<String>,
    #[schema(example = "(11) 3333-4444")]
    pub telefone: Option<String>,
    #[schema(example = "contato@acme.com")]
    pub email: Option<String>,
    pub criado_em: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmpresaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Acme Condomínios")]
    pub nome: String,

    #[validate(length(equal = 14, message = "invalid_cnpj"), custom(function = "somente_digitos"))]
    #[schema(example = "12345678000199")]
    pub cnpj: String,

    pub endereco: Option<String>,
    pub telefone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmpresaPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,

    #[validate(length(equal = 14, message = "invalid_cnpj"), custom(function = "somente_digitos"))]
    pub cnpj: Option<String>,

    pub endereco: Option<String>,
    pub telefone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_email_is_validated_only_when_present() {
        let sem_email = CreateEmpresaPayload {
            nome: "Acme".into(),
            cnpj: "12345678000199".into(),
            endereco: None,
            telefone: None,
            email: None,
        };
        assert!(sem_email.validate().is_ok());

        let email_ruim = CreateEmpresaPayload { email: Some("acme".into()), ..sem_email };
        assert!(email_ruim.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn short_cnpj_is_rejected() {
        let update = UpdateEmpresaPayload { cnpj: Some("123".into()), ..Default::default() };
        assert!(update.validate().is_err());
    }
}
