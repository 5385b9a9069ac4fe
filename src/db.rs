pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
pub mod log_acesso_repo;
pub use log_acesso_repo::LogAcessoRepository;
pub mod mensagem_repo;
pub use mensagem_repo::MensagemRepository;
pub mod ocorrencia_repo;
pub use ocorrencia_repo::OcorrenciaRepository;
pub mod papel_repo;
pub use papel_repo::PapelRepository;
pub mod percurso_repo;
pub use percurso_repo::PercursoRepository;
pub mod ponto_ronda_repo;
pub use ponto_ronda_repo::PontoRondaRepository;
pub mod ronda_repo;
pub use ronda_repo::RondaRepository;
pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
