// src/config.rs

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        EmpresaRepository, LogAcessoRepository, MensagemRepository, OcorrenciaRepository,
        PapelRepository, PercursoRepository, PontoRondaRepository, RondaRepository,
        UsuarioRepository,
    },
    services::{CadastroService, PercursoService, RelatorioService, RondaService, UsuarioService},
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub fonts_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do ambiente real para poder ser testado
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            fonts_dir: lookup("FONTS_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./fonts")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválida ('{}'): {}", key, raw, e)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Config,
    pub i18n_store: I18nStore,

    pub usuario_service: UsuarioService,
    pub cadastro_service: CadastroService,
    pub ronda_service: RondaService,
    pub percurso_service: PercursoService,
    pub relatorio_service: RelatorioService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool, config)
    }

    /// Monta o gráfico de dependências sobre uma pool já criada (usado também nos testes).
    pub fn from_pool(db_pool: PgPool, config: Config) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let papel_repo = PapelRepository::new(db_pool.clone());
        let empresa_repo = EmpresaRepository::new(db_pool.clone());
        let ponto_repo = PontoRondaRepository::new(db_pool.clone());
        let ronda_repo = RondaRepository::new(db_pool.clone());
        let percurso_repo = PercursoRepository::new(db_pool.clone());
        let ocorrencia_repo = OcorrenciaRepository::new(db_pool.clone());
        let mensagem_repo = MensagemRepository::new(db_pool.clone());
        let log_repo = LogAcessoRepository::new(db_pool.clone());

        let usuario_service =
            UsuarioService::new(usuario_repo, papel_repo.clone(), db_pool.clone());
        let cadastro_service = CadastroService::new(
            empresa_repo.clone(),
            ponto_repo.clone(),
            ocorrencia_repo.clone(),
            mensagem_repo,
            log_repo,
        );
        let ronda_service = RondaService::new(ronda_repo.clone(), db_pool.clone());
        let percurso_service = PercursoService::new(
            percurso_repo.clone(),
            papel_repo,
            ocorrencia_repo.clone(),
            db_pool.clone(),
        );
        let relatorio_service = RelatorioService::new(
            percurso_repo,
            ronda_repo,
            empresa_repo,
            ocorrencia_repo,
            ponto_repo,
            db_pool.clone(),
            config.fonts_dir.clone(),
        );

        Ok(Self {
            db_pool,
            config,
            i18n_store,
            usuario_service,
            cadastro_service,
            ronda_service,
            percurso_service,
            relatorio_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/rondas")])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.fonts_dir, PathBuf::from("./fonts"));
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rondas"),
            ("PORT", "porta"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rondas"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 20);
    }
}
