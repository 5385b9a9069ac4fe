// src/db/mensagem_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::mensagem::{CreateMensagemPayload, Mensagem, UpdateMensagemPayload},
};

#[derive(Clone)]
pub struct MensagemRepository {
    pool: PgPool,
}

impl MensagemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: &CreateMensagemPayload,
        data: NaiveDate,
        hora: NaiveTime,
    ) -> Result<Mensagem, AppError> {
        let mensagem = sqlx::query_as::<_, Mensagem>(
            r#"
            INSERT INTO mensagens (conteudo, data, hora, ronda_id, usuario_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.conteudo)
        .bind(data)
        .bind(hora)
        .bind(input.ronda_id)
        .bind(input.usuario_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(mensagem)
    }

    pub async fn list(&self) -> Result<Vec<Mensagem>, AppError> {
        let mensagens =
            sqlx::query_as::<_, Mensagem>("SELECT * FROM mensagens ORDER BY data ASC, hora ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(mensagens)
    }

    // O chat de uma ronda, do mais antigo para o mais novo
    pub async fn list_by_ronda(&self, ronda_id: Uuid) -> Result<Vec<Mensagem>, AppError> {
        let mensagens = sqlx::query_as::<_, Mensagem>(
            "SELECT * FROM mensagens WHERE ronda_id = $1 ORDER BY data ASC, hora ASC, id ASC",
        )
        .bind(ronda_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(mensagens)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Mensagem>, AppError> {
        let mensagem = sqlx::query_as::<_, Mensagem>("SELECT * FROM mensagens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(mensagem)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateMensagemPayload,
    ) -> Result<Option<Mensagem>, AppError> {
        let mensagem = sqlx::query_as::<_, Mensagem>(
            r#"
            UPDATE mensagens SET
                conteudo   = COALESCE($2, conteudo),
                data       = COALESCE($3, data),
                hora       = COALESCE($4, hora),
                ronda_id   = COALESCE($5, ronda_id),
                usuario_id = COALESCE($6, usuario_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.conteudo)
        .bind(input.data)
        .bind(input.hora)
        .bind(input.ronda_id)
        .bind(input.usuario_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mensagem)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM mensagens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
