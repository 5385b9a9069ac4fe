// src/db/ocorrencia_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ocorrencia::{CreateOcorrenciaPayload, Ocorrencia, OcorrenciaFiltro, UpdateOcorrenciaPayload},
};

#[derive(Clone)]
pub struct OcorrenciaRepository {
    pool: PgPool,
}

impl OcorrenciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: &CreateOcorrenciaPayload,
        data: NaiveDate,
        hora: NaiveTime,
    ) -> Result<Ocorrencia, AppError> {
        let ocorrencia = sqlx::query_as::<_, Ocorrencia>(
            r#"
            INSERT INTO ocorrencias (tipo, descricao, data, hora, latitude, longitude, sos, percurso_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.tipo)
        .bind(&input.descricao)
        .bind(data)
        .bind(hora)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.sos)
        .bind(input.percurso_id)
        .fetch_one(&self.pool)
        .await?;

        if ocorrencia.sos {
            tracing::warn!("🚨 SOS registrado no percurso {} ({})", ocorrencia.percurso_id, ocorrencia.tipo);
        }

        Ok(ocorrencia)
    }

    // Filtros ausentes não restringem nada
    pub async fn list(&self, filtro: &OcorrenciaFiltro) -> Result<Vec<Ocorrencia>, AppError> {
        let ocorrencias = sqlx::query_as::<_, Ocorrencia>(
            r#"
            SELECT * FROM ocorrencias
            WHERE ($1::BOOLEAN IS NULL OR sos = $1)
              AND ($2::UUID IS NULL OR percurso_id = $2)
            ORDER BY data DESC, hora DESC, id ASC
            "#,
        )
        .bind(filtro.sos)
        .bind(filtro.percurso_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ocorrencias)
    }

    pub async fn list_by_percurso<'e, E>(
        &self,
        executor: E,
        percurso_id: Uuid,
    ) -> Result<Vec<Ocorrencia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ocorrencias = sqlx::query_as::<_, Ocorrencia>(
            "SELECT * FROM ocorrencias WHERE percurso_id = $1 ORDER BY data ASC, hora ASC, id ASC",
        )
        .bind(percurso_id)
        .fetch_all(executor)
        .await?;

        Ok(ocorrencias)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ocorrencia>, AppError> {
        let ocorrencia = sqlx::query_as::<_, Ocorrencia>("SELECT * FROM ocorrencias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ocorrencia)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateOcorrenciaPayload,
    ) -> Result<Option<Ocorrencia>, AppError> {
        let ocorrencia = sqlx::query_as::<_, Ocorrencia>(
            r#"
            UPDATE ocorrencias SET
                tipo        = COALESCE($2, tipo),
                descricao   = COALESCE($3, descricao),
                data        = COALESCE($4, data),
                hora        = COALESCE($5, hora),
                latitude    = COALESCE($6, latitude),
                longitude   = COALESCE($7, longitude),
                sos         = COALESCE($8, sos),
                percurso_id = COALESCE($9, percurso_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.tipo)
        .bind(&input.descricao)
        .bind(input.data)
        .bind(input.hora)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.sos)
        .bind(input.percurso_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ocorrencia)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM ocorrencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
