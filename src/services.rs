pub mod cadastro_service;
pub use cadastro_service::CadastroService;
pub mod percurso_service;
pub use percurso_service::PercursoService;
pub mod relatorio_service;
pub use relatorio_service::RelatorioService;
pub mod ronda_service;
pub use ronda_service::RondaService;
pub mod usuario_service;
pub use usuario_service::UsuarioService;
