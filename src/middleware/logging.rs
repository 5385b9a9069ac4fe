// src/middleware/logging.rs

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Registra uma linha por requisição: método, caminho, status e duração.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), elapsed_ms, "requisição falhou");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "requisição atendida");
    }

    response
}
