pub mod dietas;
pub mod downloads;
pub mod relatorio;
