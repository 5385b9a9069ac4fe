// src/handlers/rondas.rs

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
    models::{
        mensagem::Mensagem,
        percurso::Percurso,
        ronda::{CreateRondaPayload, PontoDaRonda, Ronda, UpdateRondaPayload},
    },
};

// POST /api/rondas
#[utoipa::path(
    post,
    path = "/api/rondas",
    tag = "Rondas",
    request_body = CreateRondaPayload,
    responses(
        (status = 201, description = "Ronda criada com a sequência de pontos", body = Ronda),
        (status = 400, description = "Dados inválidos ou ponto repetido na sequência"),
        (status = 409, description = "Empresa, administrador ou ponto inexistente")
    )
)]
pub async fn create_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRondaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ronda = app_state.ronda_service
        .create(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(ronda)))
}

// GET /api/rondas
#[utoipa::path(
    get,
    path = "/api/rondas",
    tag = "Rondas",
    responses(
        (status = 200, description = "Lista de rondas", body = Vec<Ronda>)
    )
)]
pub async fn list_rondas(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let rondas = app_state.ronda_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rondas)))
}

// GET /api/rondas/{id}
#[utoipa::path(
    get,
    path = "/api/rondas/{id}",
    tag = "Rondas",
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 200, description = "Ronda encontrada", body = Ronda),
        (status = 404, description = "Ronda não encontrada")
    )
)]
pub async fn get_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let ronda = app_state.ronda_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ronda)))
}

// PUT /api/rondas/{id}
#[utoipa::path(
    put,
    path = "/api/rondas/{id}",
    tag = "Rondas",
    request_body = UpdateRondaPayload,
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 200, description = "Ronda atualizada", body = Ronda),
        (status = 404, description = "Ronda não encontrada")
    )
)]
pub async fn update_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateRondaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let ronda = app_state.ronda_service
        .update(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ronda)))
}

// DELETE /api/rondas/{id}
#[utoipa::path(
    delete,
    path = "/api/rondas/{id}",
    tag = "Rondas",
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 204, description = "Ronda removida"),
        (status = 404, description = "Ronda não encontrada"),
        (status = 409, description = "Ronda ainda possui percursos ou mensagens")
    )
)]
pub async fn delete_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.ronda_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/rondas/{id}/pontos
#[utoipa::path(
    get,
    path = "/api/rondas/{id}/pontos",
    tag = "Rondas",
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 200, description = "Pontos da ronda na ordem de visita", body = Vec<PontoDaRonda>),
        (status = 404, description = "Ronda não encontrada")
    )
)]
pub async fn list_pontos_da_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let pontos = app_state.ronda_service
        .list_pontos(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(pontos)))
}

// GET /api/rondas/{id}/percursos
#[utoipa::path(
    get,
    path = "/api/rondas/{id}/percursos",
    tag = "Rondas",
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 200, description = "Execuções da ronda, mais recentes primeiro", body = Vec<Percurso>),
        (status = 404, description = "Ronda não encontrada")
    )
)]
pub async fn list_percursos_da_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.ronda_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let percursos = app_state.percurso_service
        .list_by_ronda(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(percursos)))
}

// GET /api/rondas/{id}/mensagens
#[utoipa::path(
    get,
    path = "/api/rondas/{id}/mensagens",
    tag = "Rondas",
    params(("id" = Uuid, Path, description = "ID da ronda")),
    responses(
        (status = 200, description = "Mensagens trocadas na ronda", body = Vec<Mensagem>),
        (status = 404, description = "Ronda não encontrada")
    )
)]
pub async fn list_mensagens_da_ronda(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.ronda_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let mensagens = app_state.cadastro_service
        .list_mensagens_da_ronda(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mensagens)))
}
