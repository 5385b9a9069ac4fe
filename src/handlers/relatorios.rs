// src/handlers/relatorios.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// GET /api/pontos-ronda/{id}/qrcode
#[utoipa::path(
    get,
    path = "/api/pontos-ronda/{id}/qrcode",
    tag = "Relatórios",
    params(("id" = Uuid, Path, description = "ID do ponto")),
    responses(
        (status = 200, description = "QR Code do ponto", content_type = "image/png", body = Vec<u8>),
        (status = 404, description = "Ponto não encontrado")
    )
)]
pub async fn qrcode_do_ponto(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Response, ApiError> {

    let png = app_state.relatorio_service
        .qrcode_do_ponto(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (header::CONTENT_DISPOSITION, format!("inline; filename=\"ponto_{}.png\"", id)),
    ];

    Ok((headers, png).into_response())
}

// GET /api/percursos/{id}/relatorio
#[utoipa::path(
    get,
    path = "/api/percursos/{id}/relatorio",
    tag = "Relatórios",
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 200, description = "Relatório do percurso", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Percurso não encontrado"),
        (status = 500, description = "Fontes do relatório ausentes no servidor")
    )
)]
pub async fn relatorio_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Response, ApiError> {

    let pdf_bytes = app_state.relatorio_service
        .relatorio_percurso(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // Configura os Headers para o navegador baixar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"percurso_{}.pdf\"", id)),
    ];

    Ok((headers, pdf_bytes).into_response())
}
