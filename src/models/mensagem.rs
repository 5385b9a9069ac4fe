// src/models/mensagem.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mensagem do chat de uma ronda
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mensagem {
    pub id: Uuid,
    #[schema(example = "Chegando no ponto 3")]
    pub conteudo: String,
    pub data: NaiveDate,
    #[schema(value_type = String, example = "23:40:00")]
    pub hora: NaiveTime,
    pub ronda_id: Uuid,
    pub usuario_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMensagemPayload {
    #[validate(length(min = 1, max = 2000, message = "A mensagem deve ter entre 1 e 2000 caracteres"))]
    #[schema(example = "Chegando no ponto 3")]
    pub conteudo: String,

    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "23:40:00")]
    pub hora: Option<NaiveTime>,

    pub ronda_id: Uuid,
    pub usuario_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMensagemPayload {
    #[validate(length(min = 1, max = 2000, message = "A mensagem deve ter entre 1 e 2000 caracteres"))]
    pub conteudo: Option<String>,

    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub hora: Option<NaiveTime>,

    pub ronda_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
}
