// src/db/percurso_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::percurso::{CreatePercursoPayload, Percurso, RealizaPercurso, UpdatePercursoPayload, VigiaEscalado},
};

#[derive(Clone)]
pub struct PercursoRepository {
    pool: PgPool,
}

impl PercursoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PERCURSOS
    // =========================================================================

    pub async fn create(&self, input: &CreatePercursoPayload) -> Result<Percurso, AppError> {
        let percurso = sqlx::query_as::<_, Percurso>(
            r#"
            INSERT INTO percursos (data_inicio, data_fim, km_percorrido, observacoes, ronda_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.data_inicio)
        .bind(input.data_fim)
        .bind(input.km_percorrido)
        .bind(&input.observacoes)
        .bind(input.ronda_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(percurso)
    }

    pub async fn list(&self) -> Result<Vec<Percurso>, AppError> {
        let percursos =
            sqlx::query_as::<_, Percurso>("SELECT * FROM percursos ORDER BY data_inicio DESC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(percursos)
    }

    pub async fn list_by_ronda(&self, ronda_id: Uuid) -> Result<Vec<Percurso>, AppError> {
        let percursos = sqlx::query_as::<_, Percurso>(
            "SELECT * FROM percursos WHERE ronda_id = $1 ORDER BY data_inicio DESC, id ASC",
        )
        .bind(ronda_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(percursos)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Percurso>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let percurso = sqlx::query_as::<_, Percurso>("SELECT * FROM percursos WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(percurso)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdatePercursoPayload,
    ) -> Result<Option<Percurso>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let percurso = sqlx::query_as::<_, Percurso>(
            r#"
            UPDATE percursos SET
                data_inicio   = COALESCE($2, data_inicio),
                data_fim      = COALESCE($3, data_fim),
                km_percorrido = COALESCE($4, km_percorrido),
                observacoes   = COALESCE($5, observacoes),
                ronda_id      = COALESCE($6, ronda_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.data_inicio)
        .bind(input.data_fim)
        .bind(input.km_percorrido)
        .bind(&input.observacoes)
        .bind(input.ronda_id)
        .fetch_optional(executor)
        .await?;

        Ok(percurso)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM percursos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ESCALA DE VIGIAS (realiza_percurso)
    // =========================================================================

    pub async fn atribuicao_existe<'e, E>(
        &self,
        executor: E,
        percurso_id: Uuid,
        vigia_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM realiza_percurso
                WHERE percurso_id = $1 AND vigia_id = $2
            )
            "#,
        )
        .bind(percurso_id)
        .bind(vigia_id)
        .fetch_one(executor)
        .await?;

        Ok(existe)
    }

    /// Trava (`FOR UPDATE`) os vigias escalados no percurso e devolve seus ids.
    pub async fn travar_vigias_escalados<'e, E>(
        &self,
        executor: E,
        percurso_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT usuario_id FROM vigias
            WHERE usuario_id IN (SELECT vigia_id FROM realiza_percurso WHERE percurso_id = $1)
            ORDER BY usuario_id
            FOR UPDATE
            "#,
        )
        .bind(percurso_id)
        .fetch_all(executor)
        .await?;

        Ok(ids)
    }

    /// Os outros percursos em que o vigia já está escalado.
    pub async fn list_percursos_do_vigia<'e, E>(
        &self,
        executor: E,
        vigia_id: Uuid,
        exceto_percurso_id: Uuid,
    ) -> Result<Vec<Percurso>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let percursos = sqlx::query_as::<_, Percurso>(
            r#"
            SELECT p.*
            FROM percursos p
            INNER JOIN realiza_percurso rp ON rp.percurso_id = p.id
            WHERE rp.vigia_id = $1 AND p.id <> $2
            ORDER BY p.data_inicio ASC, p.id ASC
            "#,
        )
        .bind(vigia_id)
        .bind(exceto_percurso_id)
        .fetch_all(executor)
        .await?;

        Ok(percursos)
    }

    pub async fn insert_atribuicao<'e, E>(
        &self,
        executor: E,
        percurso_id: Uuid,
        vigia_id: Uuid,
    ) -> Result<RealizaPercurso, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atribuicao = sqlx::query_as::<_, RealizaPercurso>(
            r#"
            INSERT INTO realiza_percurso (percurso_id, vigia_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(percurso_id)
        .bind(vigia_id)
        .fetch_one(executor)
        .await?;

        Ok(atribuicao)
    }

    pub async fn list_vigias<'e, E>(
        &self,
        executor: E,
        percurso_id: Uuid,
    ) -> Result<Vec<VigiaEscalado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vigias = sqlx::query_as::<_, VigiaEscalado>(
            r#"
            SELECT rp.vigia_id, u.nome, v.disponivel, rp.atribuido_em
            FROM realiza_percurso rp
            INNER JOIN vigias v ON v.usuario_id = rp.vigia_id
            INNER JOIN usuarios u ON u.id = v.usuario_id
            WHERE rp.percurso_id = $1
            ORDER BY rp.atribuido_em ASC, rp.vigia_id ASC
            "#,
        )
        .bind(percurso_id)
        .fetch_all(executor)
        .await?;

        Ok(vigias)
    }

    pub async fn delete_atribuicao(&self, percurso_id: Uuid, vigia_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM realiza_percurso WHERE percurso_id = $1 AND vigia_id = $2",
        )
        .bind(percurso_id)
        .bind(vigia_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
