// src/handlers/percursos.rs

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
        ocorrencia::Ocorrencia,
        percurso::{
            AtribuirVigiaPayload, CreatePercursoPayload, Percurso, RealizaPercurso,
            UpdatePercursoPayload, VigiaEscalado,
        },
    },
};

// =============================================================================
//  ÁREA 1: PERCURSOS
// =============================================================================

// POST /api/percursos
#[utoipa::path(
    post,
    path = "/api/percursos",
    tag = "Percursos",
    request_body = CreatePercursoPayload,
    responses(
        (status = 201, description = "Percurso aberto", body = Percurso),
        (status = 400, description = "Datas incoerentes ou distância negativa"),
        (status = 409, description = "Ronda inexistente")
    )
)]
pub async fn create_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePercursoPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let percurso = app_state.percurso_service
        .create(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(percurso)))
}

// GET /api/percursos
#[utoipa::path(
    get,
    path = "/api/percursos",
    tag = "Percursos",
    responses(
        (status = 200, description = "Lista de percursos, mais recentes primeiro", body = Vec<Percurso>)
    )
)]
pub async fn list_percursos(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let percursos = app_state.percurso_service
        .list()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(percursos)))
}

// GET /api/percursos/{id}
#[utoipa::path(
    get,
    path = "/api/percursos/{id}",
    tag = "Percursos",
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 200, description = "Percurso encontrado", body = Percurso),
        (status = 404, description = "Percurso não encontrado")
    )
)]
pub async fn get_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let percurso = app_state.percurso_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(percurso)))
}

// PUT /api/percursos/{id}
// Campos ausentes mantêm o valor gravado
#[utoipa::path(
    put,
    path = "/api/percursos/{id}",
    tag = "Percursos",
    request_body = UpdatePercursoPayload,
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 200, description = "Percurso atualizado", body = Percurso),
        (status = 400, description = "Datas incoerentes após a atualização"),
        (status = 404, description = "Percurso não encontrado")
    )
)]
pub async fn update_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePercursoPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let percurso = app_state.percurso_service
        .update(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(percurso)))
}

// DELETE /api/percursos/{id}
#[utoipa::path(
    delete,
    path = "/api/percursos/{id}",
    tag = "Percursos",
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 204, description = "Percurso removido"),
        (status = 404, description = "Percurso não encontrado"),
        (status = 409, description = "Percurso ainda possui vigias ou ocorrências")
    )
)]
pub async fn delete_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.percurso_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/percursos/{id}/ocorrencias
#[utoipa::path(
    get,
    path = "/api/percursos/{id}/ocorrencias",
    tag = "Percursos",
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 200, description = "Ocorrências registradas no percurso", body = Vec<Ocorrencia>),
        (status = 404, description = "Percurso não encontrado")
    )
)]
pub async fn list_ocorrencias_do_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let ocorrencias = app_state.percurso_service
        .list_ocorrencias(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ocorrencias)))
}

// =============================================================================
//  ÁREA 2: ESCALA DE VIGIAS
// =============================================================================

// POST /api/percursos/{id}/atribuir-vigia
#[utoipa::path(
    post,
    path = "/api/percursos/{id}/atribuir-vigia",
    tag = "Percursos",
    request_body = AtribuirVigiaPayload,
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 201, description = "Vigia escalado no percurso", body = RealizaPercurso),
        (status = 404, description = "Percurso ou vigia não encontrado"),
        (status = 409, description = "Vigia indisponível, já escalado ou com horário sobreposto")
    )
)]
pub async fn atribuir_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<AtribuirVigiaPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let atribuicao = app_state.percurso_service
        .atribuir_vigia(id, payload.vigia_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(atribuicao)))
}

// GET /api/percursos/{id}/vigias
#[utoipa::path(
    get,
    path = "/api/percursos/{id}/vigias",
    tag = "Percursos",
    params(("id" = Uuid, Path, description = "ID do percurso")),
    responses(
        (status = 200, description = "Vigias escalados", body = Vec<VigiaEscalado>),
        (status = 404, description = "Percurso não encontrado")
    )
)]
pub async fn list_vigias_do_percurso(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    let vigias = app_state.percurso_service
        .list_vigias(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(vigias)))
}

// DELETE /api/percursos/{id}/vigias/{vigiaId}
#[utoipa::path(
    delete,
    path = "/api/percursos/{id}/vigias/{vigiaId}",
    tag = "Percursos",
    params(
        ("id" = Uuid, Path, description = "ID do percurso"),
        ("vigiaId" = Uuid, Path, description = "ID do usuário vigia")
    ),
    responses(
        (status = 204, description = "Vigia retirado do percurso"),
        (status = 404, description = "Vigia não está escalado neste percurso")
    )
)]
pub async fn remover_vigia(
    State(app_state): State<AppState>,
    locale: Locale,
    WithRejection(Path((id, vigia_id)), _): WithRejection<Path<(Uuid, Uuid)>, AppError>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.percurso_service
        .remover_vigia(id, vigia_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
