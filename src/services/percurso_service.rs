// src/services/percurso_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::ensure_deleted, error::AppError},
    db::{OcorrenciaRepository, PapelRepository, PercursoRepository},
    models::{
        ocorrencia::Ocorrencia,
        percurso::{
            CreatePercursoPayload, Janela, Percurso, RealizaPercurso, UpdatePercursoPayload,
            VigiaEscalado,
        },
    },
};

#[derive(Clone)]
pub struct PercursoService {
    repo: PercursoRepository,
    papel_repo: PapelRepository,
    ocorrencia_repo: OcorrenciaRepository,
    pool: PgPool,
}

impl PercursoService {
    pub fn new(
        repo: PercursoRepository,
        papel_repo: PapelRepository,
        ocorrencia_repo: OcorrenciaRepository,
        pool: PgPool,
    ) -> Self {
        Self { repo, papel_repo, ocorrencia_repo, pool }
    }

    pub async fn create(&self, input: &CreatePercursoPayload) -> Result<Percurso, AppError> {
        self.repo.create(input).await
    }

    pub async fn list(&self) -> Result<Vec<Percurso>, AppError> {
        self.repo.list().await
    }

    pub async fn list_by_ronda(&self, ronda_id: Uuid) -> Result<Vec<Percurso>, AppError> {
        self.repo.list_by_ronda(ronda_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Percurso, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("percurso"))
    }

    /// Mescla o payload com o registro atual e só grava se as datas continuarem coerentes.
    pub async fn update(&self, id: Uuid, input: &UpdatePercursoPayload) -> Result<Percurso, AppError> {
        let mut tx = self.pool.begin().await?;

        let atual = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("percurso"))?;

        let janela = Janela {
            inicio: input.data_inicio.unwrap_or(atual.data_inicio),
            fim: input.data_fim.or(atual.data_fim),
        };
        if !janela.valida() {
            let mut errors = validator::ValidationErrors::new();
            errors.add(
                "data_fim",
                validator::ValidationError::new("invalid_date_range")
                    .with_message("A data de fim não pode ser anterior à data de início.".into()),
            );
            return Err(AppError::ValidationError(errors));
        }

        // A nova janela não pode gerar dupla escala para quem já está no percurso
        let vigias = self.repo.travar_vigias_escalados(&mut *tx, id).await?;
        for vigia_id in vigias {
            let outros = self
                .repo
                .list_percursos_do_vigia(&mut *tx, vigia_id, id)
                .await?;
            if let Some(conflito) = outros.iter().find(|outro| outro.janela().sobrepoe(&janela)) {
                tracing::warn!(
                    "⛔ Nova janela do percurso {} sobrepõe o percurso {} do vigia {}",
                    id, conflito.id, vigia_id
                );
                return Err(AppError::ConflitoDeEscala(conflito.id));
            }
        }

        let percurso = self
            .repo
            .update(&mut *tx, id, input)
            .await?
            .ok_or(AppError::NotFound("percurso"))?;

        tx.commit().await?;
        Ok(percurso)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.delete(id).await?;
        ensure_deleted(removidos, "percurso")
    }

    pub async fn list_ocorrencias(&self, id: Uuid) -> Result<Vec<Ocorrencia>, AppError> {
        self.get(id).await?;
        self.ocorrencia_repo.list_by_percurso(&self.pool, id).await
    }

    // =========================================================================
    //  ESCALA DE VIGIAS
    // =========================================================================

    /// LÓGICA DE NEGÓCIO: escala um vigia num percurso.
    ///
    /// Tudo numa transação, com o vigia travado (`FOR UPDATE`): duas escalas
    /// simultâneas do mesmo vigia são avaliadas uma depois da outra.
    pub async fn atribuir_vigia(
        &self,
        percurso_id: Uuid,
        vigia_id: Uuid,
    ) -> Result<RealizaPercurso, AppError> {
        let mut tx = self.pool.begin().await?;

        let percurso = self
            .repo
            .find_by_id(&mut *tx, percurso_id)
            .await?
            .ok_or(AppError::NotFound("percurso"))?;

        let vigia = self
            .papel_repo
            .find_vigia_for_update(&mut *tx, vigia_id)
            .await?
            .ok_or(AppError::NotFound("vigia"))?;

        if !vigia.disponivel {
            return Err(AppError::VigiaIndisponivel);
        }

        if self.repo.atribuicao_existe(&mut *tx, percurso_id, vigia_id).await? {
            return Err(AppError::VigiaJaAtribuido);
        }

        // Dupla escala: outro percurso do vigia com horário sobreposto
        let janela = percurso.janela();
        let outros = self
            .repo
            .list_percursos_do_vigia(&mut *tx, vigia_id, percurso_id)
            .await?;
        if let Some(conflito) = outros.iter().find(|outro| outro.janela().sobrepoe(&janela)) {
            tracing::warn!(
                "⛔ Vigia {} já escalado no percurso {} (sobrepõe {})",
                vigia_id, conflito.id, percurso_id
            );
            return Err(AppError::ConflitoDeEscala(conflito.id));
        }

        let atribuicao = self
            .repo
            .insert_atribuicao(&mut *tx, percurso_id, vigia_id)
            .await?;

        tx.commit().await?;

        tracing::info!("📋 Vigia {} escalado no percurso {}", vigia_id, percurso_id);
        Ok(atribuicao)
    }

    pub async fn list_vigias(&self, percurso_id: Uuid) -> Result<Vec<VigiaEscalado>, AppError> {
        self.get(percurso_id).await?;
        self.repo.list_vigias(&self.pool, percurso_id).await
    }

    pub async fn remover_vigia(&self, percurso_id: Uuid, vigia_id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.delete_atribuicao(percurso_id, vigia_id).await?;
        ensure_deleted(removidos, "atribuicao")
    }
}
