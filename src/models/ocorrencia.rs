// src/models/ocorrencia.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Incidente registrado durante um percurso
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ocorrencia {
    pub id: Uuid,
    #[schema(example = "Invasão")]
    pub tipo: String,
    #[schema(example = "Pessoa estranha pulando o muro dos fundos")]
    pub descricao: String,
    pub data: NaiveDate,
    #[schema(value_type = String, example = "02:15:00")]
    pub hora: NaiveTime,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[schema(example = true)]
    pub sos: bool,
    pub percurso_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOcorrenciaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Invasão")]
    pub tipo: String,

    #[validate(length(min = 1, message = "required"))]
    pub descricao: String,

    /// Sem data/hora, vale o momento do registro.
    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "02:15:00")]
    pub hora: Option<NaiveTime>,

    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub sos: bool,

    pub percurso_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOcorrenciaPayload {
    #[validate(length(min = 1, message = "required"))]
    pub tipo: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub descricao: Option<String>,

    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub hora: Option<NaiveTime>,

    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    pub longitude: Option<f64>,

    pub sos: Option<bool>,
    pub percurso_id: Option<Uuid>,
}

// Filtros do GET /api/ocorrencias
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OcorrenciaFiltro {
    /// Só chamados de SOS (ou só os demais, com `false`).
    pub sos: Option<bool>,
    pub percurso_id: Option<Uuid>,
}
