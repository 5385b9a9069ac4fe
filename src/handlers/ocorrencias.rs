// src/handlers/ocorrencias.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::ocorrencia::{
        CreateOcorrenciaPayload, Ocorrencia, OcorrenciaFiltro, UpdateOcorrenciaPayload,
    },
};

// POST /api/ocorrencias
#[utoipa::path(
    post,
    path = "/api/ocorrencias",
    tag = "Ocorrências",
    request_body = CreateOcorrenciaPayload,
    responses(
        (status = 201, description = "Ocorrência registrada (data e hora atuais se omitidas)", body = Ocorrencia),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Percurso inexistente")
    )
)]
pub async fn create_ocorrencia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateOcorrenciaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ocorrencia = app_state.cadastro_service
        .create_ocorrencia(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ocorrencia)))
}

// GET /api/ocorrencias?sos=true&percursoId=...
#[utoipa::path(
    get,
    path = "/api/ocorrencias",
    tag = "Ocorrências",
    params(OcorrenciaFiltro),
    responses(
        (status = 200, description = "Lista de ocorrências, mais recentes primeiro", body = Vec<Ocorrencia>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn list_ocorrencias(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Query(filtro), _): WithRejection<Query<OcorrenciaFiltro>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let ocorrencias = app_state.cadastro_service
        .list_ocorrencias(&filtro)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ocorrencias)))
}

// GET /api/ocorrencias/{id}
#[utoipa::path(
    get,
    path = "/api/ocorrencias/{id}",
    tag = "Ocorrências",
    params(("id" = Uuid, Path, description = "ID da ocorrência")),
    responses(
        (status = 200, description = "Ocorrência encontrada", body = Ocorrencia),
        (status = 404, description = "Ocorrência não encontrada")
    )
)]
pub async fn get_ocorrencia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let ocorrencia = app_state.cadastro_service
        .get_ocorrencia(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ocorrencia)))
}

// PUT /api/ocorrencias/{id}
#[utoipa::path(
    put,
    path = "/api/ocorrencias/{id}",
    tag = "Ocorrências",
    request_body = UpdateOcorrenciaPayload,
    params(("id" = Uuid, Path, description = "ID da ocorrência")),
    responses(
        (status = 200, description = "Ocorrência atualizada", body = Ocorrencia),
        (status = 404, description = "Ocorrência não encontrada")
    )
)]
pub async fn update_ocorrencia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateOcorrenciaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ocorrencia = app_state.cadastro_service
        .update_ocorrencia(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ocorrencia)))
}

// DELETE /api/ocorrencias/{id}
#[utoipa::path(
    delete,
    path = "/api/ocorrencias/{id}",
    tag = "Ocorrências",
    params(("id" = Uuid, Path, description = "ID da ocorrência")),
    responses(
        (status = 204, description = "Ocorrência removida"),
        (status = 404, description = "Ocorrência não encontrada")
    )
)]
pub async fn delete_ocorrencia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.cadastro_service
        .delete_ocorrencia(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
