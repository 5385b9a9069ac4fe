// src/db/ponto_ronda_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ronda::{CreatePontoRondaPayload, PontoRonda, UpdatePontoRondaPayload},
};

#[derive(Clone)]
pub struct PontoRondaRepository {
    pool: PgPool,
}

impl PontoRondaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreatePontoRondaPayload) -> Result<PontoRonda, AppError> {
        let ponto = sqlx::query_as::<_, PontoRonda>(
            r#"
            INSERT INTO pontos_ronda (descricao, latitude, longitude, qrcode, obrigatorio, data, hora)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.descricao)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.qrcode)
        .bind(input.obrigatorio)
        .bind(input.data)
        .bind(input.hora)
        .fetch_one(&self.pool)
        .await?;

        Ok(ponto)
    }

    pub async fn list(&self) -> Result<Vec<PontoRonda>, AppError> {
        let pontos = sqlx::query_as::<_, PontoRonda>("SELECT * FROM pontos_ronda ORDER BY descricao ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(pontos)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PontoRonda>, AppError> {
        let ponto = sqlx::query_as::<_, PontoRonda>("SELECT * FROM pontos_ronda WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ponto)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdatePontoRondaPayload,
    ) -> Result<Option<PontoRonda>, AppError> {
        let ponto = sqlx::query_as::<_, PontoRonda>(
            r#"
            UPDATE pontos_ronda SET
                descricao   = COALESCE($2, descricao),
                latitude    = COALESCE($3, latitude),
                longitude   = COALESCE($4, longitude),
                qrcode      = COALESCE($5, qrcode),
                obrigatorio = COALESCE($6, obrigatorio),
                data        = COALESCE($7, data),
                hora        = COALESCE($8, hora)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.descricao)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.qrcode)
        .bind(input.obrigatorio)
        .bind(input.data)
        .bind(input.hora)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ponto)
    }

    // Um ponto ainda usado em alguma ronda não sai (RESTRICT)
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM pontos_ronda WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
