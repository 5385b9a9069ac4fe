pub mod empresa;
pub mod log_acesso;
pub mod mensagem;
pub mod ocorrencia;
pub mod papel;
pub mod percurso;
pub mod ronda;
pub mod usuario;

use std::net::IpAddr;

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// Data e hora informadas pelo cliente; o que faltar vira o instante atual (UTC).
pub(crate) fn data_hora_ou_agora(data: Option<NaiveDate>, hora: Option<NaiveTime>) -> (NaiveDate, NaiveTime) {
    let agora = Utc::now().naive_utc();
    (data.unwrap_or(agora.date()), hora.unwrap_or(agora.time()))
}

// --- Validadores compartilhados pelos payloads ---

pub(crate) fn somente_digitos(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("only_digits").with_message("Informe apenas dígitos.".into()))
    }
}

pub(crate) fn nao_negativo(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative").with_message("O valor não pode ser negativo.".into()));
    }
    Ok(())
}

pub(crate) fn endereco_ip(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_ip").with_message("Endereço IP inválido.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_date_and_time_default_to_now() {
        let data = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let hora = NaiveTime::from_hms_opt(22, 30, 0).unwrap();
        assert_eq!(data_hora_ou_agora(Some(data), Some(hora)), (data, hora));

        let (hoje, _) = data_hora_ou_agora(None, Some(hora));
        assert_eq!(hoje, Utc::now().date_naive());
    }

    #[test]
    fn digits_only() {
        assert!(somente_digitos("12345678901").is_ok());
        assert!(somente_digitos("123.456.789-01").is_err());
    }

    #[test]
    fn negative_decimals_are_rejected() {
        assert!(nao_negativo(&Decimal::new(-150, 2)).is_err());
        assert!(nao_negativo(&Decimal::ZERO).is_ok());
        assert!(nao_negativo(&Decimal::new(1250, 2)).is_ok());
    }

    #[test]
    fn ip_accepts_v4_and_v6() {
        assert!(endereco_ip("192.168.0.10").is_ok());
        assert!(endereco_ip("::1").is_ok());
        assert!(endereco_ip("localhost").is_err());
    }
}
