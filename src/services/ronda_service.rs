// src/services/ronda_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::ensure_deleted, error::AppError},
    db::RondaRepository,
    models::ronda::{CreateRondaPayload, PontoDaRonda, Ronda, UpdateRondaPayload},
};

#[derive(Clone)]
pub struct RondaService {
    repo: RondaRepository,
    pool: PgPool,
}

impl RondaService {
    pub fn new(repo: RondaRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    /// Cria a ronda e a sequência de pontos atomicamente.
    /// Um ponto inexistente derruba tudo com violação de chave estrangeira.
    pub async fn create(&self, input: &CreateRondaPayload) -> Result<Ronda, AppError> {
        let mut tx = self.pool.begin().await?;

        let id = self.repo.insert(&mut *tx, input).await?;
        if !input.sequencia_pontos.is_empty() {
            self.repo
                .insert_sequencia(&mut *tx, id, &input.sequencia_pontos)
                .await?;
        }

        let ronda = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("ronda"))?;

        tx.commit().await?;

        tracing::info!("🗺️ Ronda '{}' criada com {} pontos", ronda.nome, ronda.sequencia_pontos.len());
        Ok(ronda)
    }

    pub async fn list(&self) -> Result<Vec<Ronda>, AppError> {
        self.repo.list().await
    }

    pub async fn list_by_empresa(&self, empresa_id: Uuid) -> Result<Vec<Ronda>, AppError> {
        self.repo.list_by_empresa(empresa_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Ronda, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("ronda"))
    }

    /// Atualização parcial; `sequencia_pontos`, quando enviada, substitui a sequência inteira.
    pub async fn update(&self, id: Uuid, input: &UpdateRondaPayload) -> Result<Ronda, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.repo.update(&mut *tx, id, input).await? {
            return Err(AppError::NotFound("ronda"));
        }

        if let Some(pontos) = &input.sequencia_pontos {
            self.repo.clear_sequencia(&mut *tx, id).await?;
            if !pontos.is_empty() {
                self.repo.insert_sequencia(&mut *tx, id, pontos).await?;
            }
        }

        let ronda = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("ronda"))?;

        tx.commit().await?;
        Ok(ronda)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.delete(id).await?;
        ensure_deleted(removidos, "ronda")
    }

    /// Pontos completos, na ordem de visita.
    pub async fn list_pontos(&self, id: Uuid) -> Result<Vec<PontoDaRonda>, AppError> {
        // Diferencia "ronda sem pontos" de "ronda inexistente"
        self.get(id).await?;
        self.repo.list_pontos(id).await
    }
}
