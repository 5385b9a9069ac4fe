// src/services/cadastro_service.rs

use uuid::Uuid;

use crate::{
    common::{db_utils::ensure_deleted, error::AppError},
    db::{
        EmpresaRepository, LogAcessoRepository, MensagemRepository, OcorrenciaRepository,
        PontoRondaRepository,
    },
    models::{
        data_hora_ou_agora,
        empresa::{CreateEmpresaPayload, Empresa, UpdateEmpresaPayload},
        log_acesso::{CreateLogAcessoPayload, LogAcesso, UpdateLogAcessoPayload},
        mensagem::{CreateMensagemPayload, Mensagem, UpdateMensagemPayload},
        ocorrencia::{CreateOcorrenciaPayload, Ocorrencia, OcorrenciaFiltro, UpdateOcorrenciaPayload},
        ronda::{CreatePontoRondaPayload, PontoRonda, UpdatePontoRondaPayload},
    },
};

// Cadastros simples: sem regra além de "existe ou não existe"
#[derive(Clone)]
pub struct CadastroService {
    empresa_repo: EmpresaRepository,
    ponto_repo: PontoRondaRepository,
    ocorrencia_repo: OcorrenciaRepository,
    mensagem_repo: MensagemRepository,
    log_repo: LogAcessoRepository,
}

impl CadastroService {
    pub fn new(
        empresa_repo: EmpresaRepository,
        ponto_repo: PontoRondaRepository,
        ocorrencia_repo: OcorrenciaRepository,
        mensagem_repo: MensagemRepository,
        log_repo: LogAcessoRepository,
    ) -> Self {
        Self { empresa_repo, ponto_repo, ocorrencia_repo, mensagem_repo, log_repo }
    }

    // =========================================================================
    //  EMPRESAS
    // =========================================================================

    pub async fn create_empresa(&self, input: &CreateEmpresaPayload) -> Result<Empresa, AppError> {
        let empresa = self.empresa_repo.create(input).await?;
        tracing::info!("🏢 Empresa '{}' cadastrada", empresa.nome);
        Ok(empresa)
    }

    pub async fn list_empresas(&self) -> Result<Vec<Empresa>, AppError> {
        self.empresa_repo.list().await
    }

    pub async fn get_empresa(&self, id: Uuid) -> Result<Empresa, AppError> {
        self.empresa_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("empresa"))
    }

    pub async fn update_empresa(
        &self,
        id: Uuid,
        input: &UpdateEmpresaPayload,
    ) -> Result<Empresa, AppError> {
        self.empresa_repo
            .update(id, input)
            .await?
            .ok_or(AppError::NotFound("empresa"))
    }

    pub async fn delete_empresa(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.empresa_repo.delete(id).await?;
        ensure_deleted(removidos, "empresa")
    }

    // =========================================================================
    //  PONTOS DE RONDA
    // =========================================================================

    pub async fn create_ponto(&self, input: &CreatePontoRondaPayload) -> Result<PontoRonda, AppError> {
        self.ponto_repo.create(input).await
    }

    pub async fn list_pontos(&self) -> Result<Vec<PontoRonda>, AppError> {
        self.ponto_repo.list().await
    }

    pub async fn get_ponto(&self, id: Uuid) -> Result<PontoRonda, AppError> {
        self.ponto_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("ponto_ronda"))
    }

    pub async fn update_ponto(
        &self,
        id: Uuid,
        input: &UpdatePontoRondaPayload,
    ) -> Result<PontoRonda, AppError> {
        self.ponto_repo
            .update(id, input)
            .await?
            .ok_or(AppError::NotFound("ponto_ronda"))
    }

    // Ponto ainda usado em alguma ronda: a FK barra com 409
    pub async fn delete_ponto(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.ponto_repo.delete(id).await?;
        ensure_deleted(removidos, "ponto_ronda")
    }

    // =========================================================================
    //  OCORRÊNCIAS
    // =========================================================================

    pub async fn create_ocorrencia(
        &self,
        input: &CreateOcorrenciaPayload,
    ) -> Result<Ocorrencia, AppError> {
        let (data, hora) = data_hora_ou_agora(input.data, input.hora);
        self.ocorrencia_repo.create(input, data, hora).await
    }

    pub async fn list_ocorrencias(&self, filtro: &OcorrenciaFiltro) -> Result<Vec<Ocorrencia>, AppError> {
        self.ocorrencia_repo.list(filtro).await
    }

    pub async fn get_ocorrencia(&self, id: Uuid) -> Result<Ocorrencia, AppError> {
        self.ocorrencia_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("ocorrencia"))
    }

    pub async fn update_ocorrencia(
        &self,
        id: Uuid,
        input: &UpdateOcorrenciaPayload,
    ) -> Result<Ocorrencia, AppError> {
        self.ocorrencia_repo
            .update(id, input)
            .await?
            .ok_or(AppError::NotFound("ocorrencia"))
    }

    pub async fn delete_ocorrencia(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.ocorrencia_repo.delete(id).await?;
        ensure_deleted(removidos, "ocorrencia")
    }

    // =========================================================================
    //  MENSAGENS
    // =========================================================================

    pub async fn create_mensagem(&self, input: &CreateMensagemPayload) -> Result<Mensagem, AppError> {
        let (data, hora) = data_hora_ou_agora(input.data, input.hora);
        self.mensagem_repo.create(input, data, hora).await
    }

    pub async fn list_mensagens(&self) -> Result<Vec<Mensagem>, AppError> {
        self.mensagem_repo.list().await
    }

    pub async fn list_mensagens_da_ronda(&self, ronda_id: Uuid) -> Result<Vec<Mensagem>, AppError> {
        self.mensagem_repo.list_by_ronda(ronda_id).await
    }

    pub async fn get_mensagem(&self, id: Uuid) -> Result<Mensagem, AppError> {
        self.mensagem_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("mensagem"))
    }

    pub async fn update_mensagem(
        &self,
        id: Uuid,
        input: &UpdateMensagemPayload,
    ) -> Result<Mensagem, AppError> {
        self.mensagem_repo
            .update(id, input)
            .await?
            .ok_or(AppError::NotFound("mensagem"))
    }

    pub async fn delete_mensagem(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.mensagem_repo.delete(id).await?;
        ensure_deleted(removidos, "mensagem")
    }

    // =========================================================================
    //  LOGS DE ACESSO
    // =========================================================================

    pub async fn create_log(&self, input: &CreateLogAcessoPayload) -> Result<LogAcesso, AppError> {
        let (data, hora) = data_hora_ou_agora(input.data, input.hora);
        let log = self.log_repo.create(input, data, hora).await?;

        if !log.sucesso {
            tracing::warn!("🚫 Acesso negado para o usuário {} a partir de {}", log.usuario_id, log.ip);
        }
        Ok(log)
    }

    pub async fn list_logs(&self) -> Result<Vec<LogAcesso>, AppError> {
        self.log_repo.list().await
    }

    pub async fn list_logs_do_usuario(&self, usuario_id: Uuid) -> Result<Vec<LogAcesso>, AppError> {
        self.log_repo.list_by_usuario(usuario_id).await
    }

    pub async fn get_log(&self, id: Uuid) -> Result<LogAcesso, AppError> {
        self.log_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("log_acesso"))
    }

    pub async fn update_log(
        &self,
        id: Uuid,
        input: &UpdateLogAcessoPayload,
    ) -> Result<LogAcesso, AppError> {
        self.log_repo
            .update(id, input)
            .await?
            .ok_or(AppError::NotFound("log_acesso"))
    }

    pub async fn delete_log(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.log_repo.delete(id).await?;
        ensure_deleted(removidos, "log_acesso")
    }
}
