// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Ronda Backend", description = "API de monitoramento de rondas de vigilância"),
    paths(
        // --- Usuários ---
        handlers::usuarios::create_usuario,
        handlers::usuarios::list_usuarios,
        handlers::usuarios::get_usuario,
        handlers::usuarios::update_usuario,
        handlers::usuarios::delete_usuario,
        handlers::usuarios::get_papel_do_usuario,
        handlers::usuarios::list_logs_do_usuario,

        // --- Empresas ---
        handlers::empresas::create_empresa,
        handlers::empresas::list_empresas,
        handlers::empresas::get_empresa,
        handlers::empresas::update_empresa,
        handlers::empresas::delete_empresa,
        handlers::empresas::list_rondas_da_empresa,

        // --- Papéis ---
        handlers::papeis::create_vigia,
        handlers::papeis::list_vigias,
        handlers::papeis::get_vigia,
        handlers::papeis::update_vigia,
        handlers::papeis::delete_vigia,
        handlers::papeis::create_administrador,
        handlers::papeis::list_administradores,
        handlers::papeis::get_administrador,
        handlers::papeis::update_administrador,
        handlers::papeis::delete_administrador,

        // --- Rondas ---
        handlers::rondas::create_ronda,
        handlers::rondas::list_rondas,
        handlers::rondas::get_ronda,
        handlers::rondas::update_ronda,
        handlers::rondas::delete_ronda,
        handlers::rondas::list_pontos_da_ronda,
        handlers::rondas::list_percursos_da_ronda,
        handlers::rondas::list_mensagens_da_ronda,

        // --- Pontos de Ronda ---
        handlers::pontos_ronda::create_ponto,
        handlers::pontos_ronda::list_pontos,
        handlers::pontos_ronda::get_ponto,
        handlers::pontos_ronda::update_ponto,
        handlers::pontos_ronda::delete_ponto,

        // --- Percursos ---
        handlers::percursos::create_percurso,
        handlers::percursos::list_percursos,
        handlers::percursos::get_percurso,
        handlers::percursos::update_percurso,
        handlers::percursos::delete_percurso,
        handlers::percursos::list_ocorrencias_do_percurso,
        handlers::percursos::atribuir_vigia,
        handlers::percursos::list_vigias_do_percurso,
        handlers::percursos::remover_vigia,

        // --- Ocorrências ---
        handlers::ocorrencias::create_ocorrencia,
        handlers::ocorrencias::list_ocorrencias,
        handlers::ocorrencias::get_ocorrencia,
        handlers::ocorrencias::update_ocorrencia,
        handlers::ocorrencias::delete_ocorrencia,

        // --- Mensagens ---
        handlers::mensagens::create_mensagem,
        handlers::mensagens::list_mensagens,
        handlers::mensagens::get_mensagem,
        handlers::mensagens::update_mensagem,
        handlers::mensagens::delete_mensagem,

        // --- Logs de Acesso ---
        handlers::logs_acesso::create_log,
        handlers::logs_acesso::list_logs,
        handlers::logs_acesso::get_log,
        handlers::logs_acesso::update_log,
        handlers::logs_acesso::delete_log,

        // --- Relatórios ---
        handlers::relatorios::qrcode_do_ponto,
        handlers::relatorios::relatorio_percurso,
    ),
    components(
        schemas(
            // --- Usuários e Papéis ---
            models::usuario::PapelTipo,
            models::usuario::Usuario,
            models::usuario::CreateUsuarioPayload,
            models::usuario::UpdateUsuarioPayload,
            models::papel::Vigia,
            models::papel::Administrador,
            models::papel::PapelUsuario,
            models::papel::CreateVigiaPayload,
            models::papel::UpdateVigiaPayload,
            models::papel::CreateAdministradorPayload,
            models::papel::UpdateAdministradorPayload,

            // --- Empresas ---
            models::empresa::Empresa,
            models::empresa::CreateEmpresaPayload,
            models::empresa::UpdateEmpresaPayload,

            // --- Rondas ---
            models::ronda::Ronda,
            models::ronda::CreateRondaPayload,
            models::ronda::UpdateRondaPayload,
            models::ronda::PontoRonda,
            models::ronda::PontoDaRonda,
            models::ronda::CreatePontoRondaPayload,
            models::ronda::UpdatePontoRondaPayload,

            // --- Percursos ---
            models::percurso::Percurso,
            models::percurso::CreatePercursoPayload,
            models::percurso::UpdatePercursoPayload,
            models::percurso::RealizaPercurso,
            models::percurso::VigiaEscalado,
            models::percurso::AtribuirVigiaPayload,

            // --- Registros de campo ---
            models::ocorrencia::Ocorrencia,
            models::ocorrencia::CreateOcorrenciaPayload,
            models::ocorrencia::UpdateOcorrenciaPayload,
            models::mensagem::Mensagem,
            models::mensagem::CreateMensagemPayload,
            models::mensagem::UpdateMensagemPayload,
            models::log_acesso::LogAcesso,
            models::log_acesso::CreateLogAcessoPayload,
            models::log_acesso::UpdateLogAcessoPayload,
        )
    ),
    tags(
        (name = "Usuários", description = "Cadastro de usuários e consulta de papel"),
        (name = "Empresas", description = "Empresas contratantes"),
        (name = "Vigias", description = "Usuários que executam as rondas"),
        (name = "Administradores", description = "Usuários que planejam as rondas"),
        (name = "Rondas", description = "Rotas de patrulha e sequência de pontos"),
        (name = "Pontos de Ronda", description = "Pontos físicos com QR Code"),
        (name = "Percursos", description = "Execuções de rondas e escala de vigias"),
        (name = "Ocorrências", description = "Incidentes e chamados de SOS"),
        (name = "Mensagens", description = "Comunicação durante a ronda"),
        (name = "Logs de Acesso", description = "Tentativas de acesso ao sistema"),
        (name = "Relatórios", description = "QR Codes e relatórios em PDF")
    )
)]
pub struct ApiDoc;
