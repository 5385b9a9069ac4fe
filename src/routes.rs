// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState, docs::ApiDoc, handlers, middleware::logging::request_logger,
};

/// Router completo da API, com documentação e log de requisições.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/usuarios", usuario_routes())
        .nest("/api/empresas", empresa_routes())
        .nest("/api/vigias", vigia_routes())
        .nest("/api/administradores", administrador_routes())
        .nest("/api/rondas", ronda_routes())
        .nest("/api/pontos-ronda", ponto_ronda_routes())
        .nest("/api/percursos", percurso_routes())
        .nest("/api/ocorrencias", ocorrencia_routes())
        .nest("/api/mensagens", mensagem_routes())
        .nest("/api/logs-acesso", log_acesso_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(request_logger))
        .with_state(app_state)
}

fn usuario_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::usuarios::create_usuario)
               .get(handlers::usuarios::list_usuarios)
        )
        .route("/todos", get(handlers::usuarios::list_usuarios))
        .route("/{id}"
               ,get(handlers::usuarios::get_usuario)
               .put(handlers::usuarios::update_usuario)
               .delete(handlers::usuarios::delete_usuario)
        )
        .route("/{id}/papel", get(handlers::usuarios::get_papel_do_usuario))
        .route("/{id}/logs-acesso", get(handlers::usuarios::list_logs_do_usuario))
}

fn empresa_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::empresas::create_empresa)
               .get(handlers::empresas::list_empresas)
        )
        .route("/todos", get(handlers::empresas::list_empresas))
        .route("/{id}"
               ,get(handlers::empresas::get_empresa)
               .put(handlers::empresas::update_empresa)
               .delete(handlers::empresas::delete_empresa)
        )
        .route("/{id}/rondas", get(handlers::empresas::list_rondas_da_empresa))
}

fn vigia_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::papeis::create_vigia)
               .get(handlers::papeis::list_vigias)
        )
        .route("/todos", get(handlers::papeis::list_vigias))
        .route("/{id}"
               ,get(handlers::papeis::get_vigia)
               .put(handlers::papeis::update_vigia)
               .delete(handlers::papeis::delete_vigia)
        )
}

fn administrador_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::papeis::create_administrador)
               .get(handlers::papeis::list_administradores)
        )
        .route("/todos", get(handlers::papeis::list_administradores))
        .route("/{id}"
               ,get(handlers::papeis::get_administrador)
               .put(handlers::papeis::update_administrador)
               .delete(handlers::papeis::delete_administrador)
        )
}

fn ronda_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::rondas::create_ronda)
               .get(handlers::rondas::list_rondas)
        )
        .route("/todos", get(handlers::rondas::list_rondas))
        .route("/{id}"
               ,get(handlers::rondas::get_ronda)
               .put(handlers::rondas::update_ronda)
               .delete(handlers::rondas::delete_ronda)
        )
        .route("/{id}/pontos", get(handlers::rondas::list_pontos_da_ronda))
        .route("/{id}/percursos", get(handlers::rondas::list_percursos_da_ronda))
        .route("/{id}/mensagens", get(handlers::rondas::list_mensagens_da_ronda))
}

fn ponto_ronda_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::pontos_ronda::create_ponto)
               .get(handlers::pontos_ronda::list_pontos)
        )
        .route("/todos", get(handlers::pontos_ronda::list_pontos))
        .route("/{id}"
               ,get(handlers::pontos_ronda::get_ponto)
               .put(handlers::pontos_ronda::update_ponto)
               .delete(handlers::pontos_ronda::delete_ponto)
        )
        .route("/{id}/qrcode", get(handlers::relatorios::qrcode_do_ponto))
}

fn percurso_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::percursos::create_percurso)
               .get(handlers::percursos::list_percursos)
        )
        .route("/todos", get(handlers::percursos::list_percursos))
        .route("/{id}"
               ,get(handlers::percursos::get_percurso)
               .put(handlers::percursos::update_percurso)
               .delete(handlers::percursos::delete_percurso)
        )
        // Escala de vigias
        .route("/{id}/atribuir-vigia", post(handlers::percursos::atribuir_vigia))
        .route("/{id}/vigias", get(handlers::percursos::list_vigias_do_percurso))
        .route("/{id}/vigias/{vigia_id}", delete(handlers::percursos::remover_vigia))
        .route("/{id}/ocorrencias", get(handlers::percursos::list_ocorrencias_do_percurso))
        .route("/{id}/relatorio", get(handlers::relatorios::relatorio_percurso))
}

fn ocorrencia_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::ocorrencias::create_ocorrencia)
               .get(handlers::ocorrencias::list_ocorrencias)
        )
        .route("/todos", get(handlers::ocorrencias::list_ocorrencias))
        .route("/{id}"
               ,get(handlers::ocorrencias::get_ocorrencia)
               .put(handlers::ocorrencias::update_ocorrencia)
               .delete(handlers::ocorrencias::delete_ocorrencia)
        )
}

fn mensagem_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::mensagens::create_mensagem)
               .get(handlers::mensagens::list_mensagens)
        )
        .route("/todos", get(handlers::mensagens::list_mensagens))
        .route("/{id}"
               ,get(handlers::mensagens::get_mensagem)
               .put(handlers::mensagens::update_mensagem)
               .delete(handlers::mensagens::delete_mensagem)
        )
}

fn log_acesso_routes() -> Router<AppState> {
    Router::new()
        .route("/"
               ,post(handlers::logs_acesso::create_log)
               .get(handlers::logs_acesso::list_logs)
        )
        .route("/todos", get(handlers::logs_acesso::list_logs))
        .route("/{id}"
               ,get(handlers::logs_acesso::get_log)
               .put(handlers::logs_acesso::update_log)
               .delete(handlers::logs_acesso::delete_log)
        )
}
