// src/handlers/papeis.rs
//
// Vigias e administradores. O {id} é sempre o ID do usuário.

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
    models::papel::{
        Administrador, CreateAdministradorPayload, CreateVigiaPayload, UpdateAdministradorPayload,
        UpdateVigiaPayload, Vigia,
    },
};

// =============================================================================
//  ÁREA 1: VIGIAS
// =============================================================================

// POST /api/vigias
#[utoipa::path(
    post,
    path = "/api/vigias",
    tag = "Vigias",
    request_body = CreateVigiaPayload,
    responses(
        (status = 201, description = "Usuário promovido a vigia", body = Vigia),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "Usuário já possui um papel")
    )
)]
pub async fn create_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateVigiaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let vigia = app_state.usuario_service
        .create_vigia(payload.usuario_id, payload.disponivel)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(vigia)))
}

// GET /api/vigias
#[utoipa::path(
    get,
    path = "/api/vigias",
    tag = "Vigias",
    responses(
        (status = 200, description = "Lista de vigias", body = Vec<Vigia>)
    )
)]
pub async fn list_vigias(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let vigias = app_state.usuario_service
        .list_vigias()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vigias)))
}

// GET /api/vigias/{id}
#[utoipa::path(
    get,
    path = "/api/vigias/{id}",
    tag = "Vigias",
    params(("id" = Uuid, Path, description = "ID do usuário vigia")),
    responses(
        (status = 200, description = "Vigia encontrado", body = Vigia),
        (status = 404, description = "Vigia não encontrado")
    )
)]
pub async fn get_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let vigia = app_state.usuario_service
        .get_vigia(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vigia)))
}

// PUT /api/vigias/{id}
#[utoipa::path(
    put,
    path = "/api/vigias/{id}",
    tag = "Vigias",
    request_body = UpdateVigiaPayload,
    params(("id" = Uuid, Path, description = "ID do usuário vigia")),
    responses(
        (status = 200, description = "Disponibilidade atualizada", body = Vigia),
        (status = 404, description = "Vigia não encontrado")
    )
)]
pub async fn update_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateVigiaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let vigia = app_state.usuario_service
        .update_vigia(id, payload.disponivel)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vigia)))
}

// DELETE /api/vigias/{id}
#[utoipa::path(
    delete,
    path = "/api/vigias/{id}",
    tag = "Vigias",
    params(("id" = Uuid, Path, description = "ID do usuário vigia")),
    responses(
        (status = 204, description = "Papel de vigia removido"),
        (status = 404, description = "Vigia não encontrado"),
        (status = 409, description = "Vigia ainda escalado em percursos")
    )
)]
pub async fn delete_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.usuario_service
        .delete_vigia(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: ADMINISTRADORES
// =============================================================================

// POST /api/administradores
#[utoipa::path(
    post,
    path = "/api/administradores",
    tag = "Administradores",
    request_body = CreateAdministradorPayload,
    responses(
        (status = 201, description = "Usuário promovido a administrador", body = Administrador),
        (status = 400, description = "Nível de acesso fora da faixa"),
        (status = 404, description = "Usuário não encontrado"),
        (status = 409, description = "Usuário já possui um papel")
    )
)]
pub async fn create_administrador(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAdministradorPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let administrador = app_state.usuario_service
        .create_administrador(payload.usuario_id, payload.nivel_acesso)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(administrador)))
}

// GET /api/administradores
#[utoipa::path(
    get,
    path = "/api/administradores",
    tag = "Administradores",
    responses(
        (status = 200, description = "Lista de administradores", body = Vec<Administrador>)
    )
)]
pub async fn list_administradores(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let administradores = app_state.usuario_service
        .list_administradores()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(administradores)))
}

// GET /api/administradores/{id}
#[utoipa::path(
    get,
    path = "/api/administradores/{id}",
    tag = "Administradores",
    params(("id" = Uuid, Path, description = "ID do usuário administrador")),
    responses(
        (status = 200, description = "Administrador encontrado", body = Administrador),
        (status = 404, description = "Administrador não encontrado")
    )
)]
pub async fn get_administrador(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let administrador = app_state.usuario_service
        .get_administrador(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(administrador)))
}

// PUT /api/administradores/{id}
#[utoipa::path(
    put,
    path = "/api/administradores/{id}",
    tag = "Administradores",
    request_body = UpdateAdministradorPayload,
    params(("id" = Uuid, Path, description = "ID do usuário administrador")),
    responses(
        (status = 200, description = "Nível de acesso atualizado", body = Administrador),
        (status = 404, description = "Administrador não encontrado")
    )
)]
pub async fn update_administrador(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateAdministradorPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let administrador = app_state.usuario_service
        .update_administrador(id, payload.nivel_acesso)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(administrador)))
}

// DELETE /api/administradores/{id}
#[utoipa::path(
    delete,
    path = "/api/administradores/{id}",
    tag = "Administradores",
    params(("id" = Uuid, Path, description = "ID do usuário administrador")),
    responses(
        (status = 204, description = "Papel de administrador removido"),
        (status = 404, description = "Administrador não encontrado"),
        (status = 409, description = "Administrador ainda responsável por rondas")
    )
)]
pub async fn delete_administrador(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.usuario_service
        .delete_administrador(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
