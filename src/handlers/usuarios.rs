// src/handlers/usuarios.rs

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
        log_acesso::LogAcesso,
        papel::PapelUsuario,
        usuario::{CreateUsuarioPayload, UpdateUsuarioPayload, Usuario},
    },
};

// POST /api/usuarios
#[utoipa::path(
    post,
    path = "/api/usuarios",
    tag = "Usuários",
    request_body = CreateUsuarioPayload,
    responses(
        (status = 201, description = "Usuário criado (a senha nunca é devolvida)", body = Usuario),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF, e-mail ou login já cadastrado")
    )
)]
pub async fn create_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUsuarioPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let usuario = app_state.usuario_service
        .create(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

// GET /api/usuarios
#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "Usuários",
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<Usuario>)
    )
)]
pub async fn list_usuarios(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let usuarios = app_state.usuario_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(usuarios)))
}

// GET /api/usuarios/{id}
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = Usuario),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn get_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let usuario = app_state.usuario_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(usuario)))
}

// PUT /api/usuarios/{id}
#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    request_body = UpdateUsuarioPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado", body = Usuario),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn update_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateUsuarioPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let usuario = app_state.usuario_service
        .update(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(usuario)))
}

// DELETE /api/usuarios/{id}
#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "Usuário ainda referenciado (papel, mensagens ou logs)")
    )
)]
pub async fn delete_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.usuario_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/usuarios/{id}/papel
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}/papel",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Papel do usuário (vigia ou administrador)", body = PapelUsuario),
        (status = 404, description = "Usuário inexistente ou sem papel")
    )
)]
pub async fn get_papel_do_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let papel = app_state.usuario_service
        .get_papel(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(papel)))
}

// GET /api/usuarios/{id}/logs-acesso
#[utoipa::path(
    get,
    path = "/api/usuarios/{id}/logs-acesso",
    tag = "Usuários",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Tentativas de acesso do usuário, mais recentes primeiro", body = Vec<LogAcesso>),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn list_logs_do_usuario(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.usuario_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let logs = app_state.cadastro_service
        .list_logs_do_usuario(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(logs)))
}
