//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ronda_backend::{
    config::{AppState, Config},
    routes::create_router,
};

#[tokio::main]
async fn main() {
    // RUST_LOG controla o filtro; sem ele, nível info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a inicialização falhar, a aplicação loga o motivo e sai com código 1
    if let Err(e) = run().await {
        tracing::error!("🔥 Falha ao iniciar o servidor: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let app_state = AppState::new(config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .map_err(|e| anyhow::anyhow!("Falha ao rodar as migrações do banco de dados: {}", e))?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let addr = app_state.config.bind_addr();
    let app = create_router(app_state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Documentação em http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
