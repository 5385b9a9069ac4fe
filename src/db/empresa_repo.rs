// src/db/empresa_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::empresa::{CreateEmpresaPayload, Empresa, UpdateEmpresaPayload},
};

// Responsável por todas as interações com a tabela 'empresas'
#[derive(Clone)]
pub struct EmpresaRepository {
    pool: PgPool,
}

impl EmpresaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateEmpresaPayload) -> Result<Empresa, AppError> {
        let empresa = sqlx::query_as::<_, Empresa>(
            r#"
            INSERT INTO empresas (nome, cnpj, endereco, telefone, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.nome)
        .bind(&input.cnpj)
        .bind(&input.endereco)
        .bind(&input.telefone)
        .bind(&input.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(empresa)
    }

    pub async fn list(&self) -> Result<Vec<Empresa>, AppError> {
        let empresas = sqlx::query_as::<_, Empresa>("SELECT * FROM empresas ORDER BY nome ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(empresas)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<_, Empresa>("SELECT * FROM empresas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(empresa)
    }

    // Atualização parcial: o que vier nulo mantém o valor atual
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateEmpresaPayload,
    ) -> Result<Option<Empresa>, AppError> {
        let empresa = sqlx::query_as::<_, Empresa>(
            r#"
            UPDATE empresas SET
                nome     = COALESCE($2, nome),
                cnpj     = COALESCE($3, cnpj),
                endereco = COALESCE($4, endereco),
                telefone = COALESCE($5, telefone),
                email    = COALESCE($6, email)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.nome)
        .bind(&input.cnpj)
        .bind(&input.endereco)
        .bind(&input.telefone)
        .bind(&input.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(empresa)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM empresas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
