pub mod error;
pub mod parametros;
