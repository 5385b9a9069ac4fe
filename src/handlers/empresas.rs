// src/handlers/empresas.rs

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
        empresa::{CreateEmpresaPayload, Empresa, UpdateEmpresaPayload},
        ronda::Ronda,
    },
};

// POST /api/empresas
#[utoipa::path(
    post,
    path = "/api/empresas",
    tag = "Empresas",
    request_body = CreateEmpresaPayload,
    responses(
        (status = 201, description = "Empresa cadastrada", body = Empresa),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CNPJ já cadastrado")
    )
)]
pub async fn create_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEmpresaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let empresa = app_state.cadastro_service
        .create_empresa(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(empresa)))
}

// GET /api/empresas (e /api/empresas/todos)
#[utoipa::path(
    get,
    path = "/api/empresas",
    tag = "Empresas",
    responses(
        (status = 200, description = "Lista de empresas", body = Vec<Empresa>)
    )
)]
pub async fn list_empresas(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let empresas = app_state.cadastro_service
        .list_empresas()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(empresas)))
}

// GET /api/empresas/{id}
#[utoipa::path(
    get,
    path = "/api/empresas/{id}",
    tag = "Empresas",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa encontrada", body = Empresa),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn get_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let empresa = app_state.cadastro_service
        .get_empresa(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(empresa)))
}

// PUT /api/empresas/{id}
#[utoipa::path(
    put,
    path = "/api/empresas/{id}",
    tag = "Empresas",
    request_body = UpdateEmpresaPayload,
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Empresa),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn update_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEmpresaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let empresa = app_state.cadastro_service
        .update_empresa(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(empresa)))
}

// DELETE /api/empresas/{id}
#[utoipa::path(
    delete,
    path = "/api/empresas/{id}",
    tag = "Empresas",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 204, description = "Empresa removida"),
        (status = 404, description = "Empresa não encontrada"),
        (status = 409, description = "Empresa ainda possui rondas")
    )
)]
pub async fn delete_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.cadastro_service
        .delete_empresa(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/empresas/{id}/rondas
#[utoipa::path(
    get,
    path = "/api/empresas/{id}/rondas",
    tag = "Empresas",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Rondas da empresa", body = Vec<Ronda>),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn list_rondas_da_empresa(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    // Empresa inexistente é 404, não lista vazia
    app_state.cadastro_service
        .get_empresa(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let rondas = app_state.ronda_service
        .list_by_empresa(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rondas)))
}
