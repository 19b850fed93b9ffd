pub mod downloads;
pub mod relatorio_historico;
