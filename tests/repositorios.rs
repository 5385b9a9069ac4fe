// Testes contra um PostgreSQL de verdade.
// Rodar com: DATABASE_URL=postgres://... cargo test -- --ignored

use std::{path::PathBuf, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use ronda_backend::{
    common::error::AppError,
    config::{AppState, Config},
    models::{
        empresa::CreateEmpresaPayload,
        ocorrencia::CreateOcorrenciaPayload,
        percurso::{CreatePercursoPayload, UpdatePercursoPayload},
        ronda::{CreatePontoRondaPayload, CreateRondaPayload, UpdateRondaPayload},
        usuario::CreateUsuarioPayload,
    },
    routes::create_router,
};

fn state(pool: PgPool) -> AppState {
    let config = Config {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        db_max_connections: 1,
        db_acquire_timeout: Duration::from_secs(3),
        fonts_dir: PathBuf::from("./fonts"),
    };
    AppState::from_pool(pool, config).unwrap()
}

fn nova_empresa(cnpj: &str) -> CreateEmpresaPayload {
    CreateEmpresaPayload {
        nome: "Acme".to_string(),
        cnpj: cnpj.to_string(),
        endereco: Some("Rua das Flores, 100".to_string()),
        telefone: None,
        email: Some("contato@acme.com".to_string()),
    }
}

fn novo_usuario(sufixo: &str) -> CreateUsuarioPayload {
    CreateUsuarioPayload {
        nome: format!("Vigia {sufixo}"),
        cpf: format!("{:0>11}", sufixo),
        telefone: None,
        email: format!("vigia{sufixo}@acme.com"),
        login: format!("vigia{sufixo}"),
        senha: "s3nh4-f0rte".to_string(),
        ativo: true,
    }
}

fn hora(h: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap()
}

async fn ronda_da_empresa(app: &AppState) -> Uuid {
    let empresa = app.cadastro_service.create_empresa(&nova_empresa("12345678000199")).await.unwrap();
    let ronda = app
        .ronda_service
        .create(&CreateRondaPayload {
            nome: "Ronda noturna".to_string(),
            sequencia_pontos: vec![],
            tempo_estimado: 45,
            periodo: "Noturno".to_string(),
            empresa_id: empresa.id,
            administrador_id: None,
        })
        .await
        .unwrap();
    ronda.id
}

async fn percurso(app: &AppState, ronda_id: Uuid, inicio: u32, fim: Option<u32>) -> Uuid {
    app.percurso_service
        .create(&CreatePercursoPayload {
            data_inicio: hora(inicio),
            data_fim: fim.map(hora),
            km_percorrido: None,
            observacoes: None,
            ronda_id,
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn empresa_round_trip(pool: PgPool) {
    let app = state(pool);

    let criada = app.cadastro_service.create_empresa(&nova_empresa("12345678000199")).await.unwrap();
    let lida = app.cadastro_service.get_empresa(criada.id).await.unwrap();

    assert_eq!(lida.nome, "Acme");
    assert_eq!(lida.cnpj, "12345678000199");
    assert_eq!(lida.endereco.as_deref(), Some("Rua das Flores, 100"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn unknown_empresa_is_a_json_404(pool: PgPool) {
    let router = create_router(state(pool));
    let uri = format!("/api/empresas/{}", Uuid::new_v4());

    let response = router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "not_found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn create_via_http_returns_201_and_delete_returns_204(pool: PgPool) {
    let router = create_router(state(pool));

    let request = Request::builder()
        .method("POST")
        .uri("/api/empresas")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"nome": "Acme", "cnpj": "12345678000199"}).to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let empresa: Value = serde_json::from_slice(&bytes).unwrap();
    let id = empresa["id"].as_str().unwrap();

    let uri = format!("/api/empresas/{id}");
    let response = router
        .clone()
        .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn duplicate_cnpj_is_a_unique_violation(pool: PgPool) {
    let app = state(pool);
    app.cadastro_service.create_empresa(&nova_empresa("12345678000199")).await.unwrap();

    let err = app
        .cadastro_service
        .create_empresa(&nova_empresa("12345678000199"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueConstraintViolation(_)), "{:?}", err);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn partial_update_keeps_other_fields(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let id = percurso(&app, ronda_id, 20, Some(23)).await;

    let atualizado = app
        .percurso_service
        .update(id, &UpdatePercursoPayload { observacoes: Some("x".to_string()), ..Default::default() })
        .await
        .unwrap();

    assert_eq!(atualizado.observacoes.as_deref(), Some("x"));
    assert_eq!(atualizado.data_inicio, hora(20));
    assert_eq!(atualizado.data_fim, Some(hora(23)));
    assert_eq!(atualizado.ronda_id, ronda_id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn update_cannot_move_the_end_before_the_start(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let id = percurso(&app, ronda_id, 20, None).await;

    let err = app
        .percurso_service
        .update(id, &UpdatePercursoPayload { data_fim: Some(hora(19)), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)), "{:?}", err);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn user_with_a_role_cannot_be_deleted(pool: PgPool) {
    let app = state(pool);
    let usuario = app.usuario_service.create(&novo_usuario("1")).await.unwrap();
    app.usuario_service.create_vigia(usuario.id, true).await.unwrap();

    let err = app.usuario_service.delete(usuario.id).await.unwrap_err();
    assert!(matches!(err, AppError::ForeignKeyViolation(_)), "{:?}", err);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn a_user_holds_at_most_one_role(pool: PgPool) {
    let app = state(pool);
    let usuario = app.usuario_service.create(&novo_usuario("2")).await.unwrap();
    app.usuario_service.create_administrador(usuario.id, 5).await.unwrap();

    let err = app.usuario_service.create_vigia(usuario.id, true).await.unwrap_err();
    assert!(matches!(err, AppError::PapelJaAtribuido(_)), "{:?}", err);

    let papel = app.usuario_service.get_papel(usuario.id).await.unwrap();
    assert_eq!(papel.tipo(), ronda_backend::models::usuario::PapelTipo::Administrador);

    // Sem o papel antigo, o novo é aceito
    app.usuario_service.delete_administrador(usuario.id).await.unwrap();
    app.usuario_service.create_vigia(usuario.id, true).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn password_is_stored_hashed(pool: PgPool) {
    let app = state(pool.clone());
    let usuario = app.usuario_service.create(&novo_usuario("3")).await.unwrap();

    let senha_hash: String = sqlx::query_scalar("SELECT senha_hash FROM usuarios WHERE id = $1")
        .bind(usuario.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(senha_hash, "s3nh4-f0rte");
    assert!(bcrypt::verify("s3nh4-f0rte", &senha_hash).unwrap());

    let json = serde_json::to_value(&usuario).unwrap();
    assert!(json.get("senhaHash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn double_booking_is_rejected(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let primeiro = percurso(&app, ronda_id, 20, Some(23)).await;
    let sobreposto = percurso(&app, ronda_id, 22, Some(23)).await;
    let seguinte = percurso(&app, ronda_id, 23, None).await;

    let usuario = app.usuario_service.create(&novo_usuario("4")).await.unwrap();
    let vigia = app.usuario_service.create_vigia(usuario.id, true).await.unwrap();

    app.percurso_service.atribuir_vigia(primeiro, vigia.usuario_id).await.unwrap();

    let err = app
        .percurso_service
        .atribuir_vigia(primeiro, vigia.usuario_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::VigiaJaAtribuido), "{:?}", err);

    let err = app
        .percurso_service
        .atribuir_vigia(sobreposto, vigia.usuario_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ConflitoDeEscala(id) if id == primeiro), "{:?}", err);

    // Começa exatamente quando o primeiro termina
    app.percurso_service.atribuir_vigia(seguinte, vigia.usuario_id).await.unwrap();

    let escalados = app.percurso_service.list_vigias(primeiro).await.unwrap();
    assert_eq!(escalados.len(), 1);
    assert_eq!(escalados[0].vigia_id, vigia.usuario_id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn unavailable_guard_cannot_be_assigned(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let id = percurso(&app, ronda_id, 20, Some(23)).await;

    let usuario = app.usuario_service.create(&novo_usuario("5")).await.unwrap();
    app.usuario_service.create_vigia(usuario.id, false).await.unwrap();

    let err = app.percurso_service.atribuir_vigia(id, usuario.id).await.unwrap_err();
    assert!(matches!(err, AppError::VigiaIndisponivel), "{:?}", err);

    let err = app.percurso_service.atribuir_vigia(id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("vigia")), "{:?}", err);

    let err = app.percurso_service.atribuir_vigia(Uuid::new_v4(), usuario.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("percurso")), "{:?}", err);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn checkpoint_sequence_keeps_its_order(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;

    let mut ids = Vec::new();
    for codigo in ["C", "A", "B"] {
        let ponto = app
            .cadastro_service
            .create_ponto(&CreatePontoRondaPayload {
                descricao: format!("Ponto {codigo}"),
                latitude: -23.5,
                longitude: -46.6,
                qrcode: format!("PONTO-{codigo}"),
                obrigatorio: true,
                data: None,
                hora: None,
            })
            .await
            .unwrap();
        ids.push(ponto.id);
    }

    let ronda = app
        .ronda_service
        .update(ronda_id, &UpdateRondaPayload { sequencia_pontos: Some(ids.clone()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(ronda.sequencia_pontos, ids);

    let pontos = app.ronda_service.list_pontos(ronda_id).await.unwrap();
    let ordem: Vec<i32> = pontos.iter().map(|p| p.ordem).collect();
    assert_eq!(ordem, vec![0, 1, 2]);
    assert_eq!(pontos[0].ponto.descricao, "Ponto C");

    // Ponto em uso não pode ser apagado
    let err = app.cadastro_service.delete_ponto(ids[0]).await.unwrap_err();
    assert!(matches!(err, AppError::ForeignKeyViolation(_)), "{:?}", err);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn moving_a_run_onto_another_shift_is_a_double_booking(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let manha = percurso(&app, ronda_id, 8, Some(10)).await;
    let noite = percurso(&app, ronda_id, 20, Some(22)).await;

    let usuario = app.usuario_service.create(&novo_usuario("6")).await.unwrap();
    let vigia = app.usuario_service.create_vigia(usuario.id, true).await.unwrap();
    app.percurso_service.atribuir_vigia(manha, vigia.usuario_id).await.unwrap();
    app.percurso_service.atribuir_vigia(noite, vigia.usuario_id).await.unwrap();

    let err = app
        .percurso_service
        .update(
            noite,
            &UpdatePercursoPayload {
                data_inicio: Some(hora(9)),
                data_fim: Some(hora(11)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ConflitoDeEscala(id) if id == manha), "{:?}", err);

    // Nada foi gravado
    let atual = app.percurso_service.get(noite).await.unwrap();
    assert_eq!(atual.data_inicio, hora(20));

    // Encostar no fim do outro turno continua permitido
    let movido = app
        .percurso_service
        .update(noite, &UpdatePercursoPayload { data_inicio: Some(hora(10)), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(movido.data_inicio, hora(10));
}

async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn sos_filter_returns_only_sos_incidents(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let percurso_id = percurso(&app, ronda_id, 20, Some(23)).await;

    for (tipo, sos) in [("Portão aberto", false), ("Invasão", true), ("Lâmpada queimada", false)] {
        app.cadastro_service
            .create_ocorrencia(&CreateOcorrenciaPayload {
                tipo: tipo.to_string(),
                descricao: format!("{tipo} no bloco B"),
                data: None,
                hora: None,
                latitude: None,
                longitude: None,
                sos,
                percurso_id,
            })
            .await
            .unwrap();
    }

    let router = create_router(app);

    let (status, body) = get_json(&router, "/api/ocorrencias?sos=true").await;
    assert_eq!(status, StatusCode::OK);
    let sos = body.as_array().unwrap();
    assert_eq!(sos.len(), 1);
    assert_eq!(sos[0]["tipo"], "Invasão");
    assert_eq!(sos[0]["sos"], true);

    let (_, body) = get_json(&router, "/api/ocorrencias?sos=false").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get_json(&router, "/api/ocorrencias").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn unknown_checkpoint_in_sequence_is_a_foreign_key_violation(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;

    let err = app
        .ronda_service
        .update(
            ronda_id,
            &UpdateRondaPayload { sequencia_pontos: Some(vec![Uuid::new_v4()]), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForeignKeyViolation(_)), "{:?}", err);
    assert_eq!(err.status(), StatusCode::CONFLICT);

    // A sequência anterior (vazia) continua valendo
    let ronda = app.ronda_service.get(ronda_id).await.unwrap();
    assert!(ronda.sequencia_pontos.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn deleting_a_route_drops_its_checkpoint_sequence(pool: PgPool) {
    let app = state(pool.clone());
    let ronda_id = ronda_da_empresa(&app).await;

    let ponto = app
        .cadastro_service
        .create_ponto(&CreatePontoRondaPayload {
            descricao: "Guarita".to_string(),
            latitude: -23.5,
            longitude: -46.6,
            qrcode: "PONTO-GUARITA".to_string(),
            obrigatorio: true,
            data: None,
            hora: None,
        })
        .await
        .unwrap();
    app.ronda_service
        .update(ronda_id, &UpdateRondaPayload { sequencia_pontos: Some(vec![ponto.id]), ..Default::default() })
        .await
        .unwrap();

    app.ronda_service.delete(ronda_id).await.unwrap();

    let restantes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ronda_pontos WHERE ronda_id = $1")
        .bind(ronda_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(restantes, 0);

    // O ponto em si sobrevive e, sem rondas, pode ser apagado
    app.cadastro_service.get_ponto(ponto.id).await.unwrap();
    app.cadastro_service.delete_ponto(ponto.id).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn removing_a_guard_returns_204_then_404(pool: PgPool) {
    let app = state(pool);
    let ronda_id = ronda_da_empresa(&app).await;
    let percurso_id = percurso(&app, ronda_id, 20, Some(23)).await;

    let usuario = app.usuario_service.create(&novo_usuario("7")).await.unwrap();
    let vigia = app.usuario_service.create_vigia(usuario.id, true).await.unwrap();
    app.percurso_service.atribuir_vigia(percurso_id, vigia.usuario_id).await.unwrap();

    let router = create_router(app);
    let uri = format!("/api/percursos/{}/vigias/{}", percurso_id, vigia.usuario_id);

    let response = router
        .clone()
        .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, body) = get_json(&router, &format!("/api/percursos/{percurso_id}/vigias")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let response = router
        .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requer PostgreSQL (DATABASE_URL)"]
async fn lists_break_ties_by_id(pool: PgPool) {
    let app = state(pool);
    // Mesmo nome, CNPJs diferentes
    for cnpj in ["11111111000111", "22222222000122", "33333333000133"] {
        app.cadastro_service.create_empresa(&nova_empresa(cnpj)).await.unwrap();
    }

    let ids: Vec<Uuid> = app.cadastro_service.list_empresas().await.unwrap().iter().map(|e| e.id).collect();
    let mut ordenados = ids.clone();
    ordenados.sort();
    assert_eq!(ids, ordenados);

    let ronda_id = ronda_da_empresa(&app).await;
    percurso(&app, ronda_id, 20, None).await;
    percurso(&app, ronda_id, 20, None).await;
    let ids: Vec<Uuid> = app.percurso_service.list().await.unwrap().iter().map(|p| p.id).collect();
    let mut ordenados = ids.clone();
    ordenados.sort();
    assert_eq!(ids, ordenados);
}
