// src/handlers/pontos_ronda.rs

use axum::{
    extract::{Path, State},
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
    models::ronda::{CreatePontoRondaPayload, PontoRonda, UpdatePontoRondaPayload},
};

// POST /api/pontos-ronda
#[utoipa::path(
    post,
    path = "/api/pontos-ronda",
    tag = "Pontos de Ronda",
    request_body = CreatePontoRondaPayload,
    responses(
        (status = 201, description = "Ponto cadastrado", body = PontoRonda),
        (status = 400, description = "Coordenadas ou dados inválidos"),
        (status = 409, description = "QR Code já usado por outro ponto")
    )
)]
pub async fn create_ponto(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePontoRondaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ponto = app_state.cadastro_service
        .create_ponto(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ponto)))
}

// GET /api/pontos-ronda
#[utoipa::path(
    get,
    path = "/api/pontos-ronda",
    tag = "Pontos de Ronda",
    responses(
        (status = 200, description = "Lista de pontos", body = Vec<PontoRonda>)
    )
)]
pub async fn list_pontos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let pontos = app_state.cadastro_service
        .list_pontos()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(pontos)))
}

// GET /api/pontos-ronda/{id}
#[utoipa::path(
    get,
    path = "/api/pontos-ronda/{id}",
    tag = "Pontos de Ronda",
    params(("id" = Uuid, Path, description = "ID do ponto")),
    responses(
        (status = 200, description = "Ponto encontrado", body = PontoRonda),
        (status = 404, description = "Ponto não encontrado")
    )
)]
pub async fn get_ponto(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let ponto = app_state.cadastro_service
        .get_ponto(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ponto)))
}

// PUT /api/pontos-ronda/{id}
#[utoipa::path(
    put,
    path = "/api/pontos-ronda/{id}",
    tag = "Pontos de Ronda",
    request_body = UpdatePontoRondaPayload,
    params(("id" = Uuid, Path, description = "ID do ponto")),
    responses(
        (status = 200, description = "Ponto atualizado", body = PontoRonda),
        (status = 404, description = "Ponto não encontrado")
    )
)]
pub async fn update_ponto(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePontoRondaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ponto = app_state.cadastro_service
        .update_ponto(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ponto)))
}

// DELETE /api/pontos-ronda/{id}
#[utoipa::path(
    delete,
    path = "/api/pontos-ronda/{id}",
    tag = "Pontos de Ronda",
    params(("id" = Uuid, Path, description = "ID do ponto")),
    responses(
        (status = 204, description = "Ponto removido"),
        (status = 404, description = "Ponto não encontrado"),
        (status = 409, description = "Ponto ainda faz parte de uma ronda")
    )
)]
pub async fn delete_ponto(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.cadastro_service
        .delete_ponto(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
