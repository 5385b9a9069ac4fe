// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::usuario::{CreateUsuarioPayload, PapelTipo, UpdateUsuarioPayload, Usuario},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Recebe a senha já com hash; o texto puro nunca chega aqui
    pub async fn create(
        &self,
        input: &CreateUsuarioPayload,
        senha_hash: &str,
    ) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nome, cpf, telefone, email, login, senha_hash, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.nome)
        .bind(&input.cpf)
        .bind(&input.telefone)
        .bind(&input.email)
        .bind(&input.login)
        .bind(senha_hash)
        .bind(input.ativo)
        .fetch_one(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY nome ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(usuarios)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    /// Trava a linha do usuário até o fim da transação.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Usuario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario =
            sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(usuario)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateUsuarioPayload,
        senha_hash: Option<&str>,
    ) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios SET
                nome          = COALESCE($2, nome),
                cpf           = COALESCE($3, cpf),
                telefone      = COALESCE($4, telefone),
                email         = COALESCE($5, email),
                login         = COALESCE($6, login),
                senha_hash    = COALESCE($7, senha_hash),
                ativo         = COALESCE($8, ativo),
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.cpf)
        .bind(&input.telefone)
        .bind(&input.email)
        .bind(&input.login)
        .bind(senha_hash)
        .bind(input.ativo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn set_papel<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        papel: Option<PapelTipo>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE usuarios SET papel = $2, atualizado_em = NOW() WHERE id = $1")
            .bind(id)
            .bind(papel)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
