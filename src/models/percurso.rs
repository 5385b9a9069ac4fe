// src/models/percurso.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::nao_negativo;

// Uma execução concreta de uma ronda
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Percurso {
    pub id: Uuid,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: Option<DateTime<Utc>>,
    #[schema(example = "12.50")]
    pub km_percorrido: Option<Decimal>,
    #[schema(example = "Portão lateral encontrado aberto")]
    pub observacoes: Option<String>,
    pub ronda_id: Uuid,
}

impl Percurso {
    /// Janela de tempo ocupada pelo percurso; sem `data_fim` ela fica aberta.
    pub fn janela(&self) -> Janela {
        Janela { inicio: self.data_inicio, fim: self.data_fim }
    }
}

/// Intervalo semiaberto `[inicio, fim)`; `fim = None` significa em andamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Janela {
    pub inicio: DateTime<Utc>,
    pub fim: Option<DateTime<Utc>>,
}

impl Janela {
    pub fn sobrepoe(&self, outra: &Janela) -> bool {
        let comeca_antes_do_fim_da_outra = outra.fim.is_none_or(|fim| self.inicio < fim);
        let termina_depois_do_inicio_da_outra = self.fim.is_none_or(|fim| fim > outra.inicio);
        comeca_antes_do_fim_da_outra && termina_depois_do_inicio_da_outra
    }

    pub fn valida(&self) -> bool {
        self.fim.is_none_or(|fim| fim >= self.inicio)
    }
}

fn validar_datas(payload: &CreatePercursoPayload) -> Result<(), ValidationError> {
    let janela = Janela { inicio: payload.data_inicio, fim: payload.data_fim };
    if !janela.valida() {
        return Err(ValidationError::new("invalid_date_range")
            .with_message("A data de fim não pode ser anterior à data de início.".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validar_datas", skip_on_field_errors = false))]
pub struct CreatePercursoPayload {
    pub data_inicio: DateTime<Utc>,
    pub data_fim: Option<DateTime<Utc>>,

    #[validate(custom(function = "nao_negativo"))]
    #[schema(example = "12.50")]
    pub km_percorrido: Option<Decimal>,

    pub observacoes: Option<String>,
    pub ronda_id: Uuid,
}

// A coerência das datas é conferida no registro já mesclado, no serviço
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePercursoPayload {
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,

    #[validate(custom(function = "nao_negativo"))]
    pub km_percorrido: Option<Decimal>,

    pub observacoes: Option<String>,
    pub ronda_id: Option<Uuid>,
}

// --- ATRIBUIÇÃO DE VIGIAS (RealizaPercurso) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealizaPercurso {
    pub percurso_id: Uuid,
    pub vigia_id: Uuid,
    pub atribuido_em: DateTime<Utc>,
}

// Vigia escalado, com o nome do usuário para exibição
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VigiaEscalado {
    pub vigia_id: Uuid,
    #[schema(example = "João da Silva")]
    pub nome: String,
    pub disponivel: bool,
    pub atribuido_em: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtribuirVigiaPayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub vigia_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hora(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap()
    }

    fn janela(inicio: u32, fim: Option<u32>) -> Janela {
        Janela { inicio: hora(inicio), fim: fim.map(hora) }
    }

    #[test]
    fn overlapping_windows() {
        assert!(janela(20, Some(23)).sobrepoe(&janela(22, Some(23))));
        assert!(janela(22, Some(23)).sobrepoe(&janela(20, Some(23))));
        assert!(janela(20, Some(23)).sobrepoe(&janela(21, Some(22))));
    }

    #[test]
    fn back_to_back_windows_do_not_overlap() {
        assert!(!janela(20, Some(22)).sobrepoe(&janela(22, Some(23))));
        assert!(!janela(22, Some(23)).sobrepoe(&janela(20, Some(22))));
    }

    #[test]
    fn open_window_overlaps_everything_after_its_start() {
        assert!(janela(20, None).sobrepoe(&janela(22, Some(23))));
        assert!(janela(22, Some(23)).sobrepoe(&janela(20, None)));
        assert!(!janela(20, None).sobrepoe(&janela(18, Some(19))));
        assert!(janela(20, None).sobrepoe(&janela(10, None)));
    }

    #[test]
    fn end_before_start_is_invalid() {
        assert!(!janela(22, Some(20)).valida());
        assert!(janela(22, Some(22)).valida());
        assert!(janela(22, None).valida());
    }

    #[test]
    fn create_payload_checks_date_order() {
        let payload = CreatePercursoPayload {
            data_inicio: hora(22),
            data_fim: Some(hora(21)),
            km_percorrido: None,
            observacoes: None,
            ronda_id: Uuid::new_v4(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let payload = UpdatePercursoPayload {
            km_percorrido: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }
}
