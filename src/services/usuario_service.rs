// src/services/usuario_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::ensure_deleted, error::AppError},
    db::{PapelRepository, UsuarioRepository},
    models::{
        papel::{Administrador, PapelUsuario, Vigia},
        usuario::{CreateUsuarioPayload, PapelTipo, UpdateUsuarioPayload, Usuario},
    },
};

#[derive(Clone)]
pub struct UsuarioService {
    usuario_repo: UsuarioRepository,
    papel_repo: PapelRepository,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl UsuarioService {
    pub fn new(usuario_repo: UsuarioRepository, papel_repo: PapelRepository, pool: PgPool) -> Self {
        Self { usuario_repo, papel_repo, pool }
    }

    // =========================================================================
    //  USUÁRIOS
    // =========================================================================

    pub async fn create(&self, input: &CreateUsuarioPayload) -> Result<Usuario, AppError> {
        let senha_hash = hash_senha(&input.senha).await?;
        let usuario = self.usuario_repo.create(input, &senha_hash).await?;

        tracing::info!("👤 Usuário {} criado", usuario.id);
        Ok(usuario)
    }

    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        self.usuario_repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Usuario, AppError> {
        self.usuario_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("usuario"))
    }

    pub async fn update(&self, id: Uuid, input: &UpdateUsuarioPayload) -> Result<Usuario, AppError> {
        let senha_hash = match &input.senha {
            Some(senha) => Some(hash_senha(senha).await?),
            None => None,
        };

        self.usuario_repo
            .update(id, input, senha_hash.as_deref())
            .await?
            .ok_or(AppError::NotFound("usuario"))
    }

    // Usuário com papel, mensagens ou logs não sai: a FK barra com 409
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let removidos = self.usuario_repo.delete(id).await?;
        ensure_deleted(removidos, "usuario")
    }

    // =========================================================================
    //  PAPEL (vigia OU administrador)
    // =========================================================================

    pub async fn get_papel(&self, usuario_id: Uuid) -> Result<PapelUsuario, AppError> {
        let usuario = self.get(usuario_id).await?;

        let papel = match usuario.papel {
            Some(PapelTipo::Vigia) => self
                .papel_repo
                .find_vigia(&self.pool, usuario_id)
                .await?
                .map(PapelUsuario::Vigia),
            Some(PapelTipo::Administrador) => self
                .papel_repo
                .find_administrador(&self.pool, usuario_id)
                .await?
                .map(PapelUsuario::Administrador),
            None => None,
        };

        let papel = papel.ok_or(AppError::NotFound("papel"))?;
        tracing::debug!("Usuário {} consultado como {}", usuario_id, papel.tipo());
        Ok(papel)
    }

    /// LÓGICA DE NEGÓCIO: torna o usuário um vigia, se ele ainda não tem papel.
    pub async fn create_vigia(&self, usuario_id: Uuid, disponivel: bool) -> Result<Vigia, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava o usuário para que duas requisições não atribuam papéis ao mesmo tempo
        let usuario = self
            .usuario_repo
            .find_by_id_for_update(&mut *tx, usuario_id)
            .await?
            .ok_or(AppError::NotFound("usuario"))?;

        if let Some(papel) = usuario.papel {
            return Err(AppError::PapelJaAtribuido(papel.to_string()));
        }

        let vigia = self.papel_repo.create_vigia(&mut *tx, usuario_id, disponivel).await?;
        self.usuario_repo
            .set_papel(&mut *tx, usuario_id, Some(PapelTipo::Vigia))
            .await?;

        tx.commit().await?;

        tracing::info!("🛡️ Usuário {} agora é vigia", usuario_id);
        Ok(vigia)
    }

    pub async fn create_administrador(
        &self,
        usuario_id: Uuid,
        nivel_acesso: i32,
    ) -> Result<Administrador, AppError> {
        let mut tx = self.pool.begin().await?;

        let usuario = self
            .usuario_repo
            .find_by_id_for_update(&mut *tx, usuario_id)
            .await?
            .ok_or(AppError::NotFound("usuario"))?;

        if let Some(papel) = usuario.papel {
            return Err(AppError::PapelJaAtribuido(papel.to_string()));
        }

        let administrador = self
            .papel_repo
            .create_administrador(&mut *tx, usuario_id, nivel_acesso)
            .await?;
        self.usuario_repo
            .set_papel(&mut *tx, usuario_id, Some(PapelTipo::Administrador))
            .await?;

        tx.commit().await?;

        tracing::info!("🔑 Usuário {} agora é administrador (nível {})", usuario_id, nivel_acesso);
        Ok(administrador)
    }

    pub async fn list_vigias(&self) -> Result<Vec<Vigia>, AppError> {
        self.papel_repo.list_vigias().await
    }

    pub async fn get_vigia(&self, usuario_id: Uuid) -> Result<Vigia, AppError> {
        self.papel_repo
            .find_vigia(&self.pool, usuario_id)
            .await?
            .ok_or(AppError::NotFound("vigia"))
    }

    pub async fn update_vigia(&self, usuario_id: Uuid, disponivel: Option<bool>) -> Result<Vigia, AppError> {
        self.papel_repo
            .update_vigia(usuario_id, disponivel)
            .await?
            .ok_or(AppError::NotFound("vigia"))
    }

    pub async fn list_administradores(&self) -> Result<Vec<Administrador>, AppError> {
        self.papel_repo.list_administradores().await
    }

    pub async fn get_administrador(&self, usuario_id: Uuid) -> Result<Administrador, AppError> {
        self.papel_repo
            .find_administrador(&self.pool, usuario_id)
            .await?
            .ok_or(AppError::NotFound("administrador"))
    }

    pub async fn update_administrador(
        &self,
        usuario_id: Uuid,
        nivel_acesso: Option<i32>,
    ) -> Result<Administrador, AppError> {
        self.papel_repo
            .update_administrador(usuario_id, nivel_acesso)
            .await?
            .ok_or(AppError::NotFound("administrador"))
    }

    /// Remove o vigia e limpa o papel do usuário na mesma transação.
    pub async fn delete_vigia(&self, usuario_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let removidos = self.papel_repo.delete_vigia(&mut *tx, usuario_id).await?;
        ensure_deleted(removidos, "vigia")?;
        self.usuario_repo.set_papel(&mut *tx, usuario_id, None).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_administrador(&self, usuario_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let removidos = self.papel_repo.delete_administrador(&mut *tx, usuario_id).await?;
        ensure_deleted(removidos, "administrador")?;
        self.usuario_repo.set_papel(&mut *tx, usuario_id, None).await?;

        tx.commit().await?;
        Ok(())
    }
}

// O bcrypt é pesado: roda fora das threads do runtime
async fn hash_senha(senha: &str) -> Result<String, AppError> {
    let senha = senha.to_owned();
    let senha_hash = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    Ok(senha_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn password_hash_verifies_and_hides_plain_text() {
        let senha_hash = hash_senha("s3nh4-f0rte").await.unwrap();
        assert!(!senha_hash.contains("s3nh4-f0rte"));
        assert!(bcrypt::verify("s3nh4-f0rte", &senha_hash).unwrap());
        assert!(!bcrypt::verify("outra", &senha_hash).unwrap());
    }
}
