pub mod empresas;
pub mod logs_acesso;
pub mod mensagens;
pub mod ocorrencias;
pub mod papeis;
pub mod percursos;
pub mod pontos_ronda;
pub mod relatorios;
pub mod rondas;
pub mod usuarios;
