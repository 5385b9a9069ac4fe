// src/db/ronda_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ronda::{CreateRondaPayload, PontoDaRonda, Ronda, UpdateRondaPayload},
};

// A sequência de pontos vem de 'ronda_pontos', já ordenada
const SELECT_RONDA: &str = r#"
    SELECT
        r.id, r.nome, r.tempo_estimado, r.periodo, r.empresa_id, r.administrador_id,
        ARRAY(
            SELECT rp.ponto_ronda_id FROM ronda_pontos rp
            WHERE rp.ronda_id = r.id
            ORDER BY rp.ordem
        ) AS sequencia_pontos
    FROM rondas r
"#;

#[derive(Clone)]
pub struct RondaRepository {
    pool: PgPool,
}

impl RondaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere só a linha da ronda; a sequência é gravada à parte.
    pub async fn insert<'e, E>(&self, executor: E, input: &CreateRondaPayload) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO rondas (nome, tempo_estimado, periodo, empresa_id, administrador_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.nome)
        .bind(input.tempo_estimado)
        .bind(&input.periodo)
        .bind(input.empresa_id)
        .bind(input.administrador_id)
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Ronda>, AppError> {
        let sql = format!("{SELECT_RONDA} ORDER BY r.nome ASC, r.id ASC");
        let rondas = sqlx::query_as::<_, Ronda>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rondas)
    }

    pub async fn list_by_empresa(&self, empresa_id: Uuid) -> Result<Vec<Ronda>, AppError> {
        let sql = format!("{SELECT_RONDA} WHERE r.empresa_id = $1 ORDER BY r.nome ASC, r.id ASC");
        let rondas = sqlx::query_as::<_, Ronda>(&sql)
            .bind(empresa_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rondas)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Ronda>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{SELECT_RONDA} WHERE r.id = $1");
        let ronda = sqlx::query_as::<_, Ronda>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(ronda)
    }

    /// Devolve `false` se a ronda não existe.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateRondaPayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE rondas SET
                nome             = COALESCE($2, nome),
                tempo_estimado   = COALESCE($3, tempo_estimado),
                periodo          = COALESCE($4, periodo),
                empresa_id       = COALESCE($5, empresa_id),
                administrador_id = COALESCE($6, administrador_id)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(input.tempo_estimado)
        .bind(&input.periodo)
        .bind(input.empresa_id)
        .bind(input.administrador_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn clear_sequencia<'e, E>(&self, executor: E, ronda_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM ronda_pontos WHERE ronda_id = $1")
            .bind(ronda_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Grava os pontos com `ordem` 0..n na ordem recebida.
    pub async fn insert_sequencia<'e, E>(
        &self,
        executor: E,
        ronda_id: Uuid,
        pontos: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO ronda_pontos (ronda_id, ponto_ronda_id, ordem)
            SELECT $1, p.ponto_id, (p.posicao - 1)::INTEGER
            FROM UNNEST($2::UUID[]) WITH ORDINALITY AS p(ponto_id, posicao)
            "#,
        )
        .bind(ronda_id)
        .bind(pontos)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn list_pontos(&self, ronda_id: Uuid) -> Result<Vec<PontoDaRonda>, AppError> {
        let pontos = sqlx::query_as::<_, PontoDaRonda>(
            r#"
            SELECT rp.ordem, p.*
            FROM ronda_pontos rp
            INNER JOIN pontos_ronda p ON p.id = rp.ponto_ronda_id
            WHERE rp.ronda_id = $1
            ORDER BY rp.ordem ASC
            "#,
        )
        .bind(ronda_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pontos)
    }

    // A sequência sai junto, por causa do ON DELETE CASCADE
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM rondas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
