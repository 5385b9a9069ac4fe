// src/models/ronda.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::db_utils::has_duplicates;

// --- RONDA (o modelo do trajeto) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ronda {
    pub id: Uuid,
    #[schema(example = "Ronda noturna - Bloco A")]
    pub nome: String,
    /// Pontos da ronda na ordem em que devem ser visitados.
    pub sequencia_pontos: Vec<Uuid>,
    /// Duração estimada, em minutos.
    #[schema(example = 45)]
    pub tempo_estimado: i32,
    #[schema(example = "Noturno")]
    pub periodo: String,
    pub empresa_id: Uuid,
    pub administrador_id: Option<Uuid>,
}

fn sequencia_sem_repeticao(pontos: &[Uuid]) -> Result<(), ValidationError> {
    if has_duplicates(pontos) {
        return Err(ValidationError::new("duplicated_checkpoint")
            .with_message("Um ponto não pode aparecer duas vezes na mesma ronda.".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRondaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ronda noturna - Bloco A")]
    pub nome: String,

    #[serde(default)]
    #[validate(custom(function = "sequencia_sem_repeticao"))]
    pub sequencia_pontos: Vec<Uuid>,

    #[validate(range(min = 0, message = "O tempo estimado não pode ser negativo"))]
    #[serde(default)]
    #[schema(example = 45)]
    pub tempo_estimado: i32,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Noturno")]
    pub periodo: String,

    pub empresa_id: Uuid,
    pub administrador_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRondaPayload {
    #[validate(length(min = 1, message = "required"))]
    pub nome: Option<String>,

    /// Quando presente, substitui a sequência inteira.
    #[validate(custom(function = "sequencia_sem_repeticao"))]
    pub sequencia_pontos: Option<Vec<Uuid>>,

    #[validate(range(min = 0, message = "O tempo estimado não pode ser negativo"))]
    pub tempo_estimado: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    pub periodo: Option<String>,

    pub empresa_id: Option<Uuid>,
    pub administrador_id: Option<Uuid>,
}

// --- PONTO DE RONDA (checkpoint) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PontoRonda {
    pub id: Uuid,
    #[schema(example = "Portaria principal")]
    pub descricao: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(example = "PORTARIA-001")]
    pub qrcode: String,
    pub obrigatorio: bool,
    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "22:30:00")]
    pub hora: Option<NaiveTime>,
}

// Ponto junto com a posição dele dentro de uma ronda
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PontoDaRonda {
    #[schema(example = 0)]
    pub ordem: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub ponto: PontoRonda,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePontoRondaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Portaria principal")]
    pub descricao: String,

    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    pub longitude: f64,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "PORTARIA-001")]
    pub qrcode: String,

    #[serde(default = "obrigatorio_padrao")]
    pub obrigatorio: bool,

    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "22:30:00")]
    pub hora: Option<NaiveTime>,
}

fn obrigatorio_padrao() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePontoRondaPayload {
    #[validate(length(min = 1, message = "required"))]
    pub descricao: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "invalid_latitude"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "invalid_longitude"))]
    pub longitude: Option<f64>,

    #[validate(length(min = 1, message = "required"))]
    pub qrcode: Option<String>,

    pub obrigatorio: Option<bool>,
    pub data: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "22:30:00")]
    pub hora: Option<NaiveTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repeated_checkpoint_in_sequence_is_invalid() {
        let ponto = Uuid::new_v4();
        let payload: CreateRondaPayload = serde_json::from_value(json!({
            "nome": "Ronda A",
            "periodo": "Noturno",
            "empresaId": Uuid::new_v4(),
            "sequenciaPontos": [ponto, Uuid::new_v4(), ponto]
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sequencia_pontos"));
    }

    #[test]
    fn sequence_defaults_to_empty() {
        let payload: CreateRondaPayload = serde_json::from_value(json!({
            "nome": "Ronda A",
            "periodo": "Diurno",
            "empresaId": Uuid::new_v4()
        }))
        .unwrap();
        assert!(payload.sequencia_pontos.is_empty());
        assert_eq!(payload.tempo_estimado, 0);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn coordinates_out_of_range_are_rejected() {
        let payload: CreatePontoRondaPayload = serde_json::from_value(json!({
            "descricao": "Portaria",
            "latitude": 95.0,
            "longitude": -200.0,
            "qrcode": "P-1"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("longitude"));
    }

    #[test]
    fn checkpoint_in_route_flattens_with_its_position() {
        let ponto = PontoRonda {
            id: Uuid::new_v4(),
            descricao: "Garagem".into(),
            latitude: 0.0,
            longitude: 0.0,
            qrcode: "G-1".into(),
            obrigatorio: false,
            data: None,
            hora: NaiveTime::from_hms_opt(23, 0, 0),
        };
        let value = serde_json::to_value(PontoDaRonda { ordem: 2, ponto }).unwrap();
        assert_eq!(value["ordem"], 2);
        assert_eq!(value["qrcode"], "G-1");
        assert_eq!(value["hora"], "23:00:00");
    }
}
