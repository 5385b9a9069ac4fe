// src/handlers/mensagens.rs

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
    models::mensagem::{CreateMensagemPayload, Mensagem, UpdateMensagemPayload},
};

// POST /api/mensagens
#[utoipa::path(
    post,
    path = "/api/mensagens",
    tag = "Mensagens",
    request_body = CreateMensagemPayload,
    responses(
        (status = 201, description = "Mensagem enviada", body = Mensagem),
        (status = 400, description = "Conteúdo vazio ou longo demais"),
        (status = 409, description = "Ronda ou usuário inexistente")
    )
)]
pub async fn create_mensagem(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateMensagemPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mensagem = app_state.cadastro_service
        .create_mensagem(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(mensagem)))
}

// GET /api/mensagens
#[utoipa::path(
    get,
    path = "/api/mensagens",
    tag = "Mensagens",
    responses(
        (status = 200, description = "Lista de mensagens em ordem cronológica", body = Vec<Mensagem>)
    )
)]
pub async fn list_mensagens(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let mensagens = app_state.cadastro_service
        .list_mensagens()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mensagens)))
}

// GET /api/mensagens/{id}
#[utoipa::path(
    get,
    path = "/api/mensagens/{id}",
    tag = "Mensagens",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem encontrada", body = Mensagem),
        (status = 404, description = "Mensagem não encontrada")
    )
)]
pub async fn get_mensagem(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let mensagem = app_state.cadastro_service
        .get_mensagem(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mensagem)))
}

// PUT /api/mensagens/{id}
#[utoipa::path(
    put,
    path = "/api/mensagens/{id}",
    tag = "Mensagens",
    request_body = UpdateMensagemPayload,
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 200, description = "Mensagem atualizada", body = Mensagem),
        (status = 404, description = "Mensagem não encontrada")
    )
)]
pub async fn update_mensagem(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateMensagemPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let mensagem = app_state.cadastro_service
        .update_mensagem(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mensagem)))
}

// DELETE /api/mensagens/{id}
#[utoipa::path(
    delete,
    path = "/api/mensagens/{id}",
    tag = "Mensagens",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 204, description = "Mensagem removida"),
        (status = 404, description = "Mensagem não encontrada")
    )
)]
pub async fn delete_mensagem(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.cadastro_service
        .delete_mensagem(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
