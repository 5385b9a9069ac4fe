// src/db/papel_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::papel::{Administrador, Vigia},
};

// Tabelas dos subtipos de usuário: 'vigias' e 'administradores'
#[derive(Clone)]
pub struct PapelRepository {
    pool: PgPool,
}

impl PapelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  VIGIAS
    // =========================================================================

    pub async fn create_vigia<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        disponivel: bool,
    ) -> Result<Vigia, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vigia = sqlx::query_as::<_, Vigia>(
            "INSERT INTO vigias (usuario_id, disponivel) VALUES ($1, $2) RETURNING *",
        )
        .bind(usuario_id)
        .bind(disponivel)
        .fetch_one(executor)
        .await?;

        Ok(vigia)
    }

    pub async fn list_vigias(&self) -> Result<Vec<Vigia>, AppError> {
        let vigias = sqlx::query_as::<_, Vigia>("SELECT * FROM vigias ORDER BY data_criacao ASC, usuario_id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(vigias)
    }

    pub async fn find_vigia<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Vigia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vigia = sqlx::query_as::<_, Vigia>("SELECT * FROM vigias WHERE usuario_id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(vigia)
    }

    /// Serializa atribuições concorrentes do mesmo vigia.
    pub async fn find_vigia_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Vigia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vigia =
            sqlx::query_as::<_, Vigia>("SELECT * FROM vigias WHERE usuario_id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(vigia)
    }

    pub async fn update_vigia(
        &self,
        id: Uuid,
        disponivel: Option<bool>,
    ) -> Result<Option<Vigia>, AppError> {
        let vigia = sqlx::query_as::<_, Vigia>(
            r#"
            UPDATE vigias SET disponivel = COALESCE($2, disponivel)
            WHERE usuario_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(disponivel)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vigia)
    }

    pub async fn delete_vigia<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM vigias WHERE usuario_id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ADMINISTRADORES
    // =========================================================================

    pub async fn create_administrador<'e, E>(
        &self,
        executor: E,
        usuario_id: Uuid,
        nivel_acesso: i32,
    ) -> Result<Administrador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let administrador = sqlx::query_as::<_, Administrador>(
            "INSERT INTO administradores (usuario_id, nivel_acesso) VALUES ($1, $2) RETURNING *",
        )
        .bind(usuario_id)
        .bind(nivel_acesso)
        .fetch_one(executor)
        .await?;

        Ok(administrador)
    }

    pub async fn list_administradores(&self) -> Result<Vec<Administrador>, AppError> {
        let administradores = sqlx::query_as::<_, Administrador>(
            "SELECT * FROM administradores ORDER BY nivel_acesso DESC, usuario_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(administradores)
    }

    pub async fn find_administrador<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Administrador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let administrador = sqlx::query_as::<_, Administrador>(
            "SELECT * FROM administradores WHERE usuario_id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(administrador)
    }

    pub async fn update_administrador(
        &self,
        id: Uuid,
        nivel_acesso: Option<i32>,
    ) -> Result<Option<Administrador>, AppError> {
        let administrador = sqlx::query_as::<_, Administrador>(
            r#"
            UPDATE administradores SET nivel_acesso = COALESCE($2, nivel_acesso)
            WHERE usuario_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nivel_acesso)
        .fetch_optional(&self.pool)
        .await?;

        Ok(administrador)
    }

    pub async fn delete_administrador<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM administradores WHERE usuario_id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
