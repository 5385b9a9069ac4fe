// src/db/log_acesso_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::log_acesso::{CreateLogAcessoPayload, LogAcesso, UpdateLogAcessoPayload},
};

#[derive(Clone)]
pub struct LogAcessoRepository {
    pool: PgPool,
}

impl LogAcessoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: &CreateLogAcessoPayload,
        data: NaiveDate,
        hora: NaiveTime,
    ) -> Result<LogAcesso, AppError> {
        let log = sqlx::query_as::<_, LogAcesso>(
            r#"
            INSERT INTO logs_acesso (data, hora, sucesso, ip, usuario_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data)
        .bind(hora)
        .bind(input.sucesso)
        .bind(&input.ip)
        .bind(input.usuario_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    // Mais recentes primeiro
    pub async fn list(&self) -> Result<Vec<LogAcesso>, AppError> {
        let logs =
            sqlx::query_as::<_, LogAcesso>("SELECT * FROM logs_acesso ORDER BY data DESC, hora DESC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(logs)
    }

    pub async fn list_by_usuario(&self, usuario_id: Uuid) -> Result<Vec<LogAcesso>, AppError> {
        let logs = sqlx::query_as::<_, LogAcesso>(
            "SELECT * FROM logs_acesso WHERE usuario_id = $1 ORDER BY data DESC, hora DESC, id ASC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LogAcesso>, AppError> {
        let log = sqlx::query_as::<_, LogAcesso>("SELECT * FROM logs_acesso WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(log)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateLogAcessoPayload,
    ) -> Result<Option<LogAcesso>, AppError> {
        let log = sqlx::query_as::<_, LogAcesso>(
            r#"
            UPDATE logs_acesso SET
                data       = COALESCE($2, data),
                hora       = COALESCE($3, hora),
                sucesso    = COALESCE($4, sucesso),
                ip         = COALESCE($5, ip),
                usuario_id = COALESCE($6, usuario_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.data)
        .bind(input.hora)
        .bind(input.sucesso)
        .bind(&input.ip)
        .bind(input.usuario_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM logs_acesso WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
