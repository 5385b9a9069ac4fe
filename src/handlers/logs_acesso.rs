// src/handlers/logs_acesso.rs

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
    models::log_acesso::{CreateLogAcessoPayload, LogAcesso, UpdateLogAcessoPayload},
};

// POST /api/logs-acesso
#[utoipa::path(
    post,
    path = "/api/logs-acesso",
    tag = "Logs de Acesso",
    request_body = CreateLogAcessoPayload,
    responses(
        (status = 201, description = "Tentativa de acesso registrada", body = LogAcesso),
        (status = 400, description = "IP inválido"),
        (status = 409, description = "Usuário inexistente")
    )
)]
pub async fn create_log(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateLogAcessoPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let log = app_state.cadastro_service
        .create_log(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(log)))
}

// GET /api/logs-acesso
#[utoipa::path(
    get,
    path = "/api/logs-acesso",
    tag = "Logs de Acesso",
    responses(
        (status = 200, description = "Tentativas de acesso, mais recentes primeiro", body = Vec<LogAcesso>)
    )
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let logs = app_state.cadastro_service
        .list_logs()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(logs)))
}

// GET /api/logs-acesso/{id}
#[utoipa::path(
    get,
    path = "/api/logs-acesso/{id}",
    tag = "Logs de Acesso",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro encontrado", body = LogAcesso),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn get_log(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let log = app_state.cadastro_service
        .get_log(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(log)))
}

// PUT /api/logs-acesso/{id}
#[utoipa::path(
    put,
    path = "/api/logs-acesso/{id}",
    tag = "Logs de Acesso",
    request_body = UpdateLogAcessoPayload,
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro atualizado", body = LogAcesso),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn update_log(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateLogAcessoPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let log = app_state.cadastro_service
        .update_log(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(log)))
}

// DELETE /api/logs-acesso/{id}
#[utoipa::path(
    delete,
    path = "/api/logs-acesso/{id}",
    tag = "Logs de Acesso",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn delete_log(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.cadastro_service
        .delete_log(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
