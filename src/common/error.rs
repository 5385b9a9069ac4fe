// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro interno. Os handlers convertem para ApiError com o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // A chave é o nome da entidade (ex: "empresa"), traduzido na resposta
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    #[error("Registro duplicado: {0}")]
    UniqueConstraintViolation(String),

    #[error("Restrição do banco violada: {0}")]
    CheckViolation(String),

    #[error("Vigia indisponível")]
    VigiaIndisponivel,

    #[error("Vigia já atribuído a este percurso")]
    VigiaJaAtribuido,

    // Percurso com janela de horário sobreposta
    #[error("Vigia já escalado no percurso {0}")]
    ConflitoDeEscala(Uuid),

    #[error("Usuário já possui o papel {0}")]
    PapelJaAtribuido(String),

    #[error("Parâmetro de caminho inválido: {0}")]
    InvalidPathParameter(String),

    #[error("Parâmetro de consulta inválido: {0}")]
    InvalidQueryParameter(String),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados")]
    DatabaseError(sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// Classifica o erro do Postgres pelo tipo de restrição violada
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return AppError::NotFound("registro");
        }
        if let sqlx::Error::Database(db_err) = &e {
            let constraint = db_err.constraint().unwrap_or("desconhecida").to_string();
            if db_err.is_unique_violation() {
                return AppError::UniqueConstraintViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return AppError::ForeignKeyViolation(constraint);
            }
            if db_err.is_check_violation() {
                return AppError::CheckViolation(constraint);
            }
        }
        AppError::DatabaseError(e)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidPathParameter(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQueryParameter(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl AppError {
    /// Código estável, usado pelo frontend e como chave de tradução.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ForeignKeyViolation(_) => "foreign_key_violation",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            AppError::CheckViolation(_) => "check_violation",
            AppError::VigiaIndisponivel => "vigia_indisponivel",
            AppError::VigiaJaAtribuido => "vigia_ja_atribuido",
            AppError::ConflitoDeEscala(_) => "conflito_de_escala",
            AppError::PapelJaAtribuido(_) => "papel_ja_atribuido",
            AppError::InvalidPathParameter(_) => "invalid_path_parameter",
            AppError::InvalidQueryParameter(_) => "invalid_query_parameter",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::FontNotFound(_) => "font_not_found",
            AppError::DatabaseError(_)
            | AppError::BcryptError(_)
            | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidPathParameter(_)
            | AppError::InvalidQueryParameter(_)
            | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ForeignKeyViolation(_)
            | AppError::UniqueConstraintViolation(_)
            | AppError::VigiaIndisponivel
            | AppError::VigiaJaAtribuido
            | AppError::ConflitoDeEscala(_)
            | AppError::PapelJaAtribuido(_) => StatusCode::CONFLICT,
            AppError::CheckViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::BcryptError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta HTTP, traduzindo a mensagem para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let lang = locale.0.as_str();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica só no log
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let template = store.translate(lang, self.code());
        let message = match self {
            AppError::NotFound(entity) => template.replace("{0}", store.translate(lang, entity)),
            AppError::ForeignKeyViolation(arg)
            | AppError::UniqueConstraintViolation(arg)
            | AppError::CheckViolation(arg)
            | AppError::PapelJaAtribuido(arg) => template.replace("{0}", arg),
            AppError::ConflitoDeEscala(percurso_id) => {
                template.replace("{0}", &percurso_id.to_string())
            }
            _ => template.to_string(),
        };

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            AppError::InvalidPathParameter(reason)
            | AppError::InvalidQueryParameter(reason)
            | AppError::InvalidBody(reason) => {
                Some(json!({ "reason": reason }))
            }
            _ => None,
        };

        ApiError {
            status,
            error: message,
            code: self.code().to_string(),
            details,
        }
    }
}

// Retorna todos os detalhes da validação, campo a campo.
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

// Sem Accept-Language disponível (ex: rejeição de extrator), responde no idioma padrão
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::global())
            .into_response()
    }
}

/// Corpo de erro devolvido ao cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub code: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "code": self.code, "details": details }),
            None => json!({ "error": self.error, "code": self.code }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Exemplo {
        #[validate(length(min = 1, message = "required"))]
        nome: String,
    }

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn not_found_maps_to_404_with_translated_entity() {
        let api = AppError::NotFound("empresa").to_api_error(&pt(), I18nStore::global());
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.code, "not_found");
        assert!(api.error.contains("Empresa"), "mensagem: {}", api.error);
    }

    #[test]
    fn english_locale_translates_message() {
        let api = AppError::NotFound("percurso")
            .to_api_error(&Locale("en".to_string()), I18nStore::global());
        assert!(api.error.contains("Patrol run"), "mensagem: {}", api.error);
    }

    #[test]
    fn conflicts_map_to_409() {
        let id = Uuid::new_v4();
        for err in [
            AppError::VigiaIndisponivel,
            AppError::VigiaJaAtribuido,
            AppError::ConflitoDeEscala(id),
            AppError::ForeignKeyViolation("vigias_usuario_id_fkey".into()),
            AppError::UniqueConstraintViolation("empresas_cnpj_key".into()),
        ] {
            assert_eq!(err.status(), StatusCode::CONFLICT, "{:?}", err);
        }
    }

    #[test]
    fn double_booking_message_names_the_other_run() {
        let id = Uuid::new_v4();
        let api = AppError::ConflitoDeEscala(id).to_api_error(&pt(), I18nStore::global());
        assert!(api.error.contains(&id.to_string()));
    }

    #[test]
    fn validation_error_carries_field_details() {
        let errors = Exemplo { nome: String::new() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&pt(), I18nStore::global());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes");
        assert_eq!(details["nome"][0], "required");
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"))
            .to_api_error(&pt(), I18nStore::global());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("hunter2"));
    }
}
